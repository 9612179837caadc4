//! Loading OpenGL entry points for the context current on this thread.

use std::ffi::c_void;
use std::rc::Rc;
use std::sync::Once;

use tracing::debug;

use crate::driver::GlContext;
use crate::native::NativeGl;

pub(crate) static GL_INIT_ONCE: Once = Once::new();

/// Load OpenGL function pointers through `loader` and return a context handle
/// backed by [`NativeGl`].
///
/// Function pointers are loaded exactly once per process; later calls reuse
/// them and only hand out a fresh [`GlContext`]. The caller must have made an
/// OpenGL 4.5+ context current on this thread before calling.
pub fn load_with<F>(mut loader: F) -> GlContext
where
    F: FnMut(&str) -> *const c_void,
{
    GL_INIT_ONCE.call_once(|| {
        gl::load_with(|symbol| loader(symbol));
        debug!(
            dsa = gl::CreateBuffers::is_loaded(),
            program_uniforms = gl::ProgramUniform1f::is_loaded(),
            "OpenGL entry points loaded"
        );
    });

    Rc::new(NativeGl::new())
}

/// Whether [`load_with`] has already run in this process.
pub fn is_loaded() -> bool {
    GL_INIT_ONCE.is_completed()
}
