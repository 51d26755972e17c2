//! The [`GpuDevice`] seam between the compositor and a GPU API.

use std::fmt::{Display, Formatter};

use pixelpass_surface::ImageRef;

use crate::error::Result;
use crate::uniform::UniformValue;

/// Opaque id of a texture owned by a [`GpuDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub(crate) u64);

impl TextureHandle {
    /// Build a handle from a raw id. Only meaningful to the device that
    /// issued the id.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for TextureHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// Window and context settings for opening a device.
#[derive(Debug, Clone)]
pub struct DeviceSettings {
    /// Size of the presented frame buffer in physical pixels.
    pub output_resolution: (u32, u32),
    pub title: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            output_resolution: (640, 480),
            title: "pixelpass".to_string(),
        }
    }
}

/// RGBA8 copy of a presented frame, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCapture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl FrameCapture {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(at..at + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Iterate pixels row by row.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// GPU operations needed to composite one full-screen quad per frame.
///
/// An implementation owns the presentation surface, the GPU context, the
/// compiled program and the quad geometry. Textures it hands out stay alive
/// until [`GpuDevice::release_texture`] is called for them.
///
/// Calls for one frame arrive in this order: uploads, sampler assignments,
/// binds and values, then [`draw_quad`](GpuDevice::draw_quad), then releases,
/// then [`present`](GpuDevice::present).
pub trait GpuDevice {
    /// Create a texture with the image's exact dimensions and upload its
    /// bytes verbatim.
    ///
    /// The texture samples with nearest filtering for both minification and
    /// magnification and swizzles channels blue-green-red-alpha, so the
    /// surface's native byte order reads back as RGBA in the shader. Callers
    /// must pass a packed 4-byte-per-pixel image.
    fn upload_texture(&mut self, image: ImageRef<'_>) -> Result<TextureHandle>;

    /// Record that the sampler `name` is fed from `slot`.
    ///
    /// Called once per name for the lifetime of the caller's binding table.
    /// Slots are logical: how they map onto hardware texture units is up to
    /// the implementation, as long as each name samples the texture bound to
    /// its slot.
    fn assign_sampler(&mut self, name: &str, slot: u32) -> Result<()>;

    /// Attach `texture` to `slot` for the next draw.
    fn bind_texture(&mut self, slot: u32, texture: TextureHandle) -> Result<()>;

    /// Write a non-sampler uniform.
    ///
    /// Fails with [`Error::UnknownUniform`](crate::Error::UnknownUniform)
    /// when the program declares no uniform named `name`.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()>;

    /// Render the quad once as a triangle strip with the current bindings.
    fn draw_quad(&mut self) -> Result<()>;

    /// Free a texture. Unknown handles are ignored.
    fn release_texture(&mut self, texture: TextureHandle);

    /// Swap buffers, showing the last drawn frame.
    fn present(&mut self) -> Result<()>;

    /// Number of textures currently alive on the device.
    fn live_textures(&self) -> usize;

    fn output_size(&self) -> (u32, u32);

    /// Read back the most recently presented frame.
    fn capture_frame(&mut self) -> Result<FrameCapture>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_pixel_lookup() {
        let capture = FrameCapture {
            width: 2,
            height: 1,
            pixels: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        assert_eq!(capture.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(capture.pixel(2, 0), None);
        assert_eq!(capture.pixels().count(), 2);
    }

    #[test]
    fn handle_displays_its_id() {
        assert_eq!(TextureHandle::from_raw(7).to_string(), "texture#7");
    }
}
