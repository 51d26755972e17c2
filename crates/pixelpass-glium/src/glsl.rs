//! GLSL version detection utilities.

use glium::{Api, CapabilitiesSource, Version};

use crate::error::CompileError;
use crate::shader::ShaderStage;

/// A parsed `#version` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlslDirective {
    /// The number as written, e.g. `330`.
    pub number: u16,
    /// `true` for OpenGL ES shading language (`es` profile or `#version 100`).
    pub es: bool,
}

impl GlslDirective {
    /// The glium version this directive asks for.
    ///
    /// glium reports GLSL versions with a single-digit minor, so `330` maps
    /// to `3.3` and `140` to `1.4`.
    pub fn as_glium(&self) -> Version {
        let api = if self.es { Api::GlEs } else { Api::Gl };
        let major = (self.number / 100) as u8;
        let minor = ((self.number % 100) / 10) as u8;
        Version(api, major, minor)
    }
}

/// Find the `#version` directive of a shader source, if any.
///
/// Only the first non-blank, non-comment line is considered, as GLSL requires
/// the directive to come before anything else.
pub fn version_directive(source: &str) -> Option<GlslDirective> {
    let line = source
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("//"))?;

    let rest = line.strip_prefix("#")?.trim_start();
    let rest = rest.strip_prefix("version")?;
    let mut words = rest.split_whitespace();
    let number: u16 = words.next()?.parse().ok()?;
    let es = number == 100 || words.next() == Some("es");
    Some(GlslDirective { number, es })
}

/// The GLSL versions a context can compile.
pub fn supported_versions(ctx: &impl CapabilitiesSource) -> Vec<Version> {
    ctx.get_capabilities().supported_glsl_versions.clone()
}

/// Reject a stage whose `#version` directive the context cannot compile.
///
/// Sources without a directive, and contexts that report no versions at all,
/// are left for the driver to judge.
pub fn check_stage(
    stage: ShaderStage,
    source: &str,
    supported: &[Version],
) -> Result<(), CompileError> {
    let Some(directive) = version_directive(source) else {
        return Ok(());
    };
    if supported.is_empty() {
        return Ok(());
    }

    let wanted = directive.as_glium();
    if supported.contains(&wanted) {
        return Ok(());
    }

    let requested = if directive.es {
        format!("{} es", directive.number)
    } else {
        directive.number.to_string()
    };
    let supported = supported
        .iter()
        .map(|Version(api, major, minor)| match api {
            Api::Gl => format!("{major}{minor}0"),
            Api::GlEs => format!("{major}{minor}0 es"),
        })
        .collect::<Vec<_>>()
        .join(", ");

    Err(CompileError::UnsupportedVersion {
        stage,
        requested,
        supported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_core_directive() {
        let d = version_directive("#version 330 core\nvoid main() {}").unwrap();
        assert_eq!(d, GlslDirective { number: 330, es: false });
        assert_eq!(d.as_glium(), Version(Api::Gl, 3, 3));
    }

    #[test]
    fn parses_es_directive_after_comment() {
        let d = version_directive("// pass-through\n\n#version 300 es\n").unwrap();
        assert!(d.es);
        assert_eq!(d.as_glium(), Version(Api::GlEs, 3, 0));
    }

    #[test]
    fn version_100_is_es() {
        assert!(version_directive("#version 100").unwrap().es);
    }

    #[test]
    fn missing_directive_is_none() {
        assert_eq!(version_directive("void main() {}"), None);
        assert_eq!(version_directive(""), None);
    }

    #[test]
    fn supported_version_passes() {
        let supported = [Version(Api::Gl, 1, 4), Version(Api::Gl, 3, 3)];
        assert!(check_stage(ShaderStage::Vertex, "#version 330\n", &supported).is_ok());
        assert!(check_stage(ShaderStage::Vertex, "void main() {}", &supported).is_ok());
    }

    #[test]
    fn unsupported_version_names_the_stage() {
        let supported = [Version(Api::Gl, 1, 2), Version(Api::Gl, 1, 4)];
        let err =
            check_stage(ShaderStage::Fragment, "#version 450 core\n", &supported).unwrap_err();
        match err {
            CompileError::UnsupportedVersion {
                stage,
                requested,
                supported,
            } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert_eq!(requested, "450");
                assert_eq!(supported, "120, 140");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_capability_list_defers_to_driver() {
        assert!(check_stage(ShaderStage::Vertex, "#version 460", &[]).is_ok());
    }
}
