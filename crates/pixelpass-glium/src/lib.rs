//! GPU side of pixelpass, built on glium.
//!
//! [`GpuDevice`] is the seam the compositor drives: texture upload, sampler
//! slots, uniform values, one quad draw and a buffer swap per frame.
//! [`GliumDevice`] implements it with a glium window and OpenGL context.
//!
//! ### Warning
//!
//! The BGRA texture swizzle is applied with raw GL calls on glium-owned
//! textures. This assumes the device's context is the current one, which
//! holds as long as a single device exists in the process.

pub mod device;
pub mod error;
pub mod glium_device;
pub mod glsl;
pub mod quad;
pub mod shader;
mod swizzle;
pub mod uniform;

pub use device::{DeviceSettings, FrameCapture, GpuDevice, TextureHandle};
pub use error::{CompileError, Error, Result};
pub use glium_device::GliumDevice;
pub use shader::{ShaderSources, ShaderStage, DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER};
pub use uniform::UniformValue;
