//! Compositor configuration.

use std::path::PathBuf;

use pixelpass_glium::{Error, Result, DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER};

/// Everything needed to open a [`FrameCompositor`](crate::FrameCompositor).
///
/// `output_resolution` is the window size in physical pixels;
/// `logical_resolution` is the size of the CPU surface that gets drawn into
/// and stretched over the window. It defaults to the output resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositorConfig {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub output_resolution: (u32, u32),
    pub logical_resolution: Option<(u32, u32)>,
    pub title: String,
}

impl CompositorConfig {
    pub fn new(output_resolution: (u32, u32)) -> Self {
        Self {
            vertex_shader: PathBuf::from(DEFAULT_VERTEX_SHADER),
            fragment_shader: PathBuf::from(DEFAULT_FRAGMENT_SHADER),
            output_resolution,
            logical_resolution: None,
            title: "pixelpass".to_string(),
        }
    }

    pub fn with_shaders(
        mut self,
        vertex_shader: impl Into<PathBuf>,
        fragment_shader: impl Into<PathBuf>,
    ) -> Self {
        self.vertex_shader = vertex_shader.into();
        self.fragment_shader = fragment_shader.into();
        self
    }

    pub fn with_logical_resolution(mut self, logical_resolution: (u32, u32)) -> Self {
        self.logical_resolution = Some(logical_resolution);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Surface size, falling back to the output resolution.
    pub fn logical_resolution(&self) -> (u32, u32) {
        self.logical_resolution.unwrap_or(self.output_resolution)
    }

    pub fn validate(&self) -> Result<()> {
        check_resolution(self.output_resolution)?;
        check_resolution(self.logical_resolution())
    }
}

pub(crate) fn check_resolution((width, height): (u32, u32)) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidResolution { width, height });
    }
    Ok(())
}
