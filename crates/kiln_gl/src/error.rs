use std::borrow::Cow;

use glow::HasContext;

/// Not exposed by glow; only legacy imaging drivers report it.
const TABLE_TOO_LARGE: u32 = 0x8031;

/// Stop draining after this many errors. A lost context can report errors forever.
pub const MAX_DRAINED_ERRORS: usize = 32;

/// Symbolic name for a `glGetError` code.
pub fn error_name(code: u32) -> Cow<'static, str> {
    match code {
        glow::INVALID_ENUM => Cow::Borrowed("GL_INVALID_ENUM"),
        glow::INVALID_VALUE => Cow::Borrowed("GL_INVALID_VALUE"),
        glow::INVALID_OPERATION => Cow::Borrowed("GL_INVALID_OPERATION"),
        glow::STACK_OVERFLOW => Cow::Borrowed("GL_STACK_OVERFLOW"),
        glow::STACK_UNDERFLOW => Cow::Borrowed("GL_STACK_UNDERFLOW"),
        glow::OUT_OF_MEMORY => Cow::Borrowed("GL_OUT_OF_MEMORY"),
        glow::INVALID_FRAMEBUFFER_OPERATION => Cow::Borrowed("GL_INVALID_FRAMEBUFFER_OPERATION"),
        TABLE_TOO_LARGE => Cow::Borrowed("GL_TABLE_TOO_LARGE"),
        other => Cow::Owned(format!("Unknown [0x{other:x}]")),
    }
}

/// Pops pending error codes off the context, at most [`MAX_DRAINED_ERRORS`].
pub fn drain_errors(gl: &glow::Context) -> Vec<u32> {
    drain_codes(|| unsafe { gl.get_error() })
}

fn drain_codes(mut next_error: impl FnMut() -> u32) -> Vec<u32> {
    let mut errors = Vec::new();
    while errors.len() < MAX_DRAINED_ERRORS {
        let code = next_error();
        if code == glow::NO_ERROR {
            return errors;
        }
        errors.push(code);
    }
    log::warn!("Stopped after {MAX_DRAINED_ERRORS} OpenGL errors; more may be pending");
    errors
}

/// Logs every pending error against the given call site. Returns true if any
/// error was pending. Use [`check_gl_error!`](crate::check_gl_error) to fill in
/// the location.
pub fn check_error(gl: &glow::Context, file: &str, line: u32) -> bool {
    let errors = drain_errors(gl);
    for &code in &errors {
        log::error!("[{file}:{line}] OpenGL Error: {}", error_name(code));
    }
    !errors.is_empty()
}

/// `check_gl_error!(gl)` reports pending GL errors with the caller's file and line.
#[macro_export]
macro_rules! check_gl_error {
    ($gl:expr) => {
        $crate::error::check_error($gl, file!(), line!())
    };
}
