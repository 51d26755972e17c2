//! Borrowed views of raw image bytes.

/// A borrowed image: dimensions, layout and the bytes behind it.
///
/// The layout is not validated on construction. Anything can be described
/// here (24-bit buffers, padded rows); only packed 4-byte-per-pixel images
/// can be uploaded to the GPU, see [`ImageRef::is_packed_bgra8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub width: u32,
    pub height: u32,
    pub bytes_per_pixel: usize,
    /// Row stride in bytes.
    pub pitch: usize,
    pub data: &'a [u8],
}

impl<'a> ImageRef<'a> {
    pub fn new(
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
        pitch: usize,
        data: &'a [u8],
    ) -> Self {
        Self {
            width,
            height,
            bytes_per_pixel,
            pitch,
            data,
        }
    }

    /// A tightly packed blue-green-red-alpha image.
    pub fn bgra8(width: u32, height: u32, data: &'a [u8]) -> Self {
        Self::new(width, height, 4, width as usize * 4, data)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the bytes form a contiguous, non-empty 4-byte-per-pixel image
    /// with no row padding.
    pub fn is_packed_bgra8(&self) -> bool {
        self.layout_problem().is_none()
    }

    /// Describes why the image is not packed BGRA8, if it isn't.
    pub fn layout_problem(&self) -> Option<String> {
        if self.width == 0 || self.height == 0 {
            return Some(format!("empty image {}x{}", self.width, self.height));
        }
        if self.bytes_per_pixel != 4 {
            return Some(format!(
                "{} bytes per pixel, expected 4",
                self.bytes_per_pixel
            ));
        }
        let row = self.width as usize * 4;
        if self.pitch != row {
            return Some(format!("row pitch {} bytes, expected {row}", self.pitch));
        }
        let expected = row * self.height as usize;
        if self.data.len() != expected {
            return Some(format!(
                "{} bytes of pixel data, expected {expected}",
                self.data.len()
            ));
        }
        None
    }
}
