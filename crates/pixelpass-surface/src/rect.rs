//! Integer rectangles used by drawing operations.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip against a `width` x `height` area anchored at the origin.
    ///
    /// Returns the visible span as `(x0, y0, x1, y1)` with exclusive upper
    /// bounds, or `None` when nothing is visible.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = (self.x as i64 + self.width as i64).min(width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_inside_is_unchanged() {
        assert_eq!(Rect::new(1, 2, 3, 4).clip_to(10, 10), Some((1, 2, 4, 6)));
    }

    #[test]
    fn clip_trims_negative_origin_and_overflow() {
        assert_eq!(Rect::new(-2, -3, 5, 100).clip_to(8, 8), Some((0, 0, 3, 8)));
    }

    #[test]
    fn clip_outside_is_none() {
        assert_eq!(Rect::new(10, 0, 4, 4).clip_to(10, 10), None);
        assert_eq!(Rect::new(-4, 0, 4, 4).clip_to(10, 10), None);
        assert_eq!(Rect::new(0, 0, 0, 4).clip_to(10, 10), None);
    }
}
