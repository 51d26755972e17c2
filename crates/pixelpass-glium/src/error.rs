//! Error taxonomy shared by the GPU device and the compositor.

use std::path::PathBuf;

use crate::device::TextureHandle;
use crate::shader::ShaderStage;

/// Why a shader program could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to read shader source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader failed to compile:\n{log}")]
    Stage { stage: String, log: String },

    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    #[error("{stage} shader requests GLSL {requested}, context supports: {supported}")]
    UnsupportedVersion {
        stage: ShaderStage,
        requested: String,
        supported: String,
    },

    #[error("shader program could not be created: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("shader compilation failed: {0}")]
    Compilation(#[from] CompileError),

    #[error("shader program declares no uniform named `{name}`")]
    UnknownUniform { name: String },

    #[error("image uniform `{name}` is not a packed 4-byte-per-pixel buffer: {reason}")]
    Format { name: String, reason: String },

    #[error("failed to allocate {resource}: {reason}")]
    ResourceExhausted {
        resource: &'static str,
        reason: String,
    },

    #[error("resolution must be positive, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("failed to create GPU context: {0}")]
    Context(String),

    #[error("draw call failed: {0}")]
    Draw(String),

    #[error("failed to present frame: {0}")]
    Present(String),

    #[error("{0} is not a live texture")]
    UnknownTexture(TextureHandle),

    #[error("failed to read back the frame buffer: {0}")]
    Capture(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
