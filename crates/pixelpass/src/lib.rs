//! Present a CPU-drawn pixel surface through a user shader pass.
//!
//! A [`FrameCompositor`] owns a window, an OpenGL program built from a
//! vertex and a fragment shader, and a [`PixelSurface`]. Each call to
//! [`FrameCompositor::update`] uploads the surface (and any extra images the
//! caller passes) as textures, draws one full-screen quad, frees the
//! textures again and swaps buffers.
//!
//! The surface is bound to the sampler `screen_texture` unless the caller
//! binds something else under that name. Every sampler name gets a texture
//! slot the first time it is seen and keeps it for the compositor's
//! lifetime.
//!
//! ```no_run
//! use pixelpass::{Canvas, Color, CompositorConfig, FrameCompositor, Rect, Uniforms};
//!
//! # fn main() -> pixelpass::Result<()> {
//! pixelpass::logging::init();
//!
//! let config = CompositorConfig::new((512, 512)).with_logical_resolution((128, 128));
//! let mut compositor = FrameCompositor::open(&config)?;
//!
//! compositor.fill(Color::BLACK);
//! compositor.fill_rect(Rect::new(32, 32, 64, 64), Color::RED);
//! compositor.update(&Uniforms::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! Rendering happens on the calling thread; the compositor is neither `Send`
//! nor `Sync` when backed by [`GliumDevice`].

pub mod bindings;
pub mod compositor;
pub mod config;
mod delegate;
pub mod logging;
pub mod uniforms;

#[cfg(test)]
mod testing;

pub use bindings::BindingTable;
pub use compositor::{FrameCompositor, SCREEN_TEXTURE};
pub use config::CompositorConfig;
pub use uniforms::{Uniform, Uniforms};

pub use pixelpass_glium::{
    CompileError, Error, FrameCapture, GliumDevice, GpuDevice, Result, TextureHandle,
    UniformValue,
};
pub use pixelpass_surface::{Canvas, Color, ImageRef, PixelSurface, Rect};
