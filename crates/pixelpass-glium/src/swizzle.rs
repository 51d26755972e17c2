//! Raw OpenGL texture swizzling.
//!
//! glium has no notion of texture swizzle, so the BGRA channel order is set
//! with raw GL calls on the texture glium created.

use std::sync::Once;

use gl::types::{GLenum, GLint, GLuint};

use crate::error::{Error, Result};

static GL_INIT_ONCE: Once = Once::new();

/// Load raw GL function pointers. Runs once per process.
pub(crate) fn load_gl() {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        tracing::debug!("raw GL entry points loaded");
    });
}

/// Sampled `(r, g, b, a)` read stored `(b, g, r, a)`.
const BGRA_SWIZZLE: [GLint; 4] = [
    gl::BLUE as GLint,
    gl::GREEN as GLint,
    gl::RED as GLint,
    gl::ALPHA as GLint,
];

/// Make `texture` sample its channels in blue-green-red-alpha order.
///
/// The 2D binding of the active texture unit is restored afterwards so the
/// glium state cache stays accurate.
///
/// # Safety
///
/// The GL context that owns `texture` must be current and [`load_gl`] must
/// have run.
pub(crate) unsafe fn apply_bgra_swizzle(texture: GLuint) -> Result<()> {
    clear_gl_errors();

    let mut previous: GLint = 0;
    gl::GetIntegerv(gl::TEXTURE_BINDING_2D, &mut previous);

    gl::BindTexture(gl::TEXTURE_2D, texture);
    gl::TexParameteriv(
        gl::TEXTURE_2D,
        gl::TEXTURE_SWIZZLE_RGBA,
        BGRA_SWIZZLE.as_ptr(),
    );
    let status: GLenum = gl::GetError();
    gl::BindTexture(gl::TEXTURE_2D, previous as GLuint);

    if status != gl::NO_ERROR {
        return Err(Error::Context(format!(
            "texture swizzle rejected by the driver (GL error 0x{status:04x})"
        )));
    }
    Ok(())
}

unsafe fn clear_gl_errors() {
    while gl::GetError() != gl::NO_ERROR {}
}
