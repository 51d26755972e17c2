//! The drawing operations shared by pixel surfaces and anything that wraps
//! one.

use crate::{Color, PixelSurface, Rect};

/// Pixel-level drawing on a fixed-size RGBA canvas.
///
/// Coordinates grow right and down from the top-left corner. Every operation
/// clips against the canvas bounds; nothing here panics on out-of-range input.
pub trait Canvas {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Color at `(x, y)`, or `None` outside the canvas.
    fn get_at(&self, x: u32, y: u32) -> Option<Color>;

    /// Write one pixel. Returns `false` when `(x, y)` is outside the canvas.
    fn set_at(&mut self, x: u32, y: u32, color: Color) -> bool;

    /// Overwrite every pixel.
    fn fill(&mut self, color: Color);

    /// Overwrite the pixels covered by `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Inclusive line from `from` to `to`.
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color);

    /// Composite `source` with its top-left corner at `dest` (source-over).
    fn blit(&mut self, source: &PixelSurface, dest: (i32, i32));
}
