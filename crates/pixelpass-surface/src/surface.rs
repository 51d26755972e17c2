//! [`PixelSurface`]: the CPU pixel buffer the compositor presents.

use std::fmt::{Debug, Formatter};
use std::ops::RangeInclusive;

use crate::{Canvas, Color, ImageRef, Rect};

const BYTES_PER_PIXEL: usize = 4;

/// Fixed-size 2D buffer of BGRA8 pixels, rows top to bottom, no padding.
///
/// The surface never changes size after creation. A new surface is fully
/// transparent.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Debug for PixelSurface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row stride in bytes.
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Raw pixel bytes in blue-green-red-alpha order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn as_image(&self) -> ImageRef<'_> {
        ImageRef::bgra8(self.width, self.height, &self.data)
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.pitch() + x as usize * BYTES_PER_PIXEL)
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            self.set_at(x, y, color);
        }
    }
}

impl Canvas for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn get_at(&self, x: u32, y: u32) -> Option<Color> {
        let at = self.offset(x, y)?;
        let px = &self.data[at..at + BYTES_PER_PIXEL];
        Some(Color::from_bgra([px[0], px[1], px[2], px[3]]))
    }

    fn set_at(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.offset(x, y) {
            Some(at) => {
                self.data[at..at + BYTES_PER_PIXEL].copy_from_slice(&color.to_bgra());
                true
            }
            None => false,
        }
    }

    fn fill(&mut self, color: Color) {
        let px = color.to_bgra();
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&px);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.width, self.height) else {
            return;
        };

        let px = color.to_bgra();
        let pitch = self.pitch();
        for y in y0..y1 {
            let row = y as usize * pitch;
            let start = row + x0 as usize * BYTES_PER_PIXEL;
            let end = row + x1 as usize * BYTES_PER_PIXEL;
            for chunk in self.data[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let (x0, y0) = (i64::from(from.0), i64::from(from.1));
        let (x1, y1) = (i64::from(to.0), i64::from(to.1));
        let (dx, dy) = (x1 - x0, y1 - y0);

        // One pixel per step along the major axis, restricted to the part of
        // that axis the surface covers.
        if dx.abs() >= dy.abs() {
            for x in visible_span(x0, x1, self.width) {
                let y = y0 + line_offset(x - x0, dx, dy);
                self.put(x, y, color);
            }
        } else {
            for y in visible_span(y0, y1, self.height) {
                let x = x0 + line_offset(y - y0, dy, dx);
                self.put(x, y, color);
            }
        }
    }

    fn blit(&mut self, source: &PixelSurface, dest: (i32, i32)) {
        let area = Rect::new(dest.0, dest.1, source.width, source.height);
        let Some((x0, y0, x1, y1)) = area.clip_to(self.width, self.height) else {
            return;
        };

        for y in y0..y1 {
            let sy = (y as i64 - dest.1 as i64) as u32;
            for x in x0..x1 {
                let sx = (x as i64 - dest.0 as i64) as u32;
                let (Some(src), Some(dst)) = (source.get_at(sx, sy), self.get_at(x, y)) else {
                    continue;
                };
                self.set_at(x, y, src.over(dst));
            }
        }
    }
}

/// The coordinates between `a` and `b` (inclusive) that fall inside
/// `0..limit`.
fn visible_span(a: i64, b: i64, limit: u32) -> RangeInclusive<i64> {
    a.min(b).max(0)..=a.max(b).min(i64::from(limit) - 1)
}

/// Minor-axis offset after `step` major-axis steps, rounded half up.
fn line_offset(step: i64, major: i64, minor: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let (step, major) = if major < 0 { (-step, -major) } else { (step, major) };
    let num = 2 * i128::from(step) * i128::from(minor) + i128::from(major);
    // |result| <= |minor|, which came from an i64.
    num.div_euclid(2 * i128::from(major)) as i64
}
