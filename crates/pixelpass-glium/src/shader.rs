//! Shader source loading.

use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::error::CompileError;
use crate::glsl::{version_directive, GlslDirective};

/// Conventional location of the vertex shader, relative to the working
/// directory.
pub const DEFAULT_VERTEX_SHADER: &str = "shaders/shader.vert";

/// Conventional location of the fragment shader.
pub const DEFAULT_FRAGMENT_SHADER: &str = "shaders/shader.frag";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// GLSL text for the two programmable stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from disk.
    pub fn load(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, CompileError> {
        let vertex = read_source(vertex_path.as_ref())?;
        let fragment = read_source(fragment_path.as_ref())?;
        Ok(Self { vertex, fragment })
    }

    /// The `#version` directive of one stage, if it has one.
    pub fn version(&self, stage: ShaderStage) -> Option<GlslDirective> {
        match stage {
            ShaderStage::Vertex => version_directive(&self.vertex),
            ShaderStage::Fragment => version_directive(&self.fragment),
        }
    }

    pub fn stages(&self) -> [(ShaderStage, &str); 2] {
        [
            (ShaderStage::Vertex, self.vertex.as_str()),
            (ShaderStage::Fragment, self.fragment.as_str()),
        ]
    }
}

fn read_source(path: &Path) -> Result<String, CompileError> {
    tracing::debug!(path = %path.display(), "loading shader source");
    std::fs::read_to_string(path).map_err(|source| CompileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_both_stages() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("shader.vert");
        let frag = dir.path().join("shader.frag");
        std::fs::write(&vert, "void main() {}").unwrap();
        std::fs::write(&frag, "void main() { }").unwrap();

        let sources = ShaderSources::load(&vert, &frag).unwrap();
        assert_eq!(sources.vertex, "void main() {}");
        assert_eq!(sources.fragment, "void main() { }");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let vert = dir.path().join("shader.vert");
        std::fs::write(&vert, "void main() {}").unwrap();
        let missing = dir.path().join("missing.frag");

        let err = ShaderSources::load(&vert, &missing).unwrap_err();
        match &err {
            CompileError::Read { path, .. } => assert_eq!(path, &missing),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("missing.frag"));
    }

    #[test]
    fn version_is_read_per_stage() {
        let sources = ShaderSources::new("#version 140\nvoid main() {}", "void main() {}");
        assert_eq!(
            sources.version(ShaderStage::Vertex).map(|d| d.number),
            Some(140)
        );
        assert_eq!(sources.version(ShaderStage::Fragment), None);
    }

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
