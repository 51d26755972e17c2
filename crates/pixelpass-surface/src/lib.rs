//! CPU-side pixel surfaces for pixelpass.
//!
//! A [`PixelSurface`] is a fixed-size buffer of 8-bit pixels stored in the
//! blue-green-red-alpha byte order that little-endian ARGB32 surfaces use.
//! Rendering code draws into it through the [`Canvas`] trait; the GPU side
//! only ever sees it as an [`ImageRef`] of raw bytes.

pub mod canvas;
pub mod color;
pub mod image;
pub mod rect;
pub mod surface;

pub use canvas::Canvas;
pub use color::Color;
pub use image::ImageRef;
pub use rect::Rect;
pub use surface::PixelSurface;
