//! The seam between glkit's window logic and a native windowing library.
//!
//! [`GlfwPlatform`](crate::GlfwPlatform) is the production backend. Window
//! mode handling, monitor fallback and the lifecycle only talk to these
//! traits, so they run unchanged against `testing::MockPlatform`.

use glfw::Key;
use glkit_core::GlContext;

use crate::error::WindowResult;
use crate::monitor::Monitor;
use crate::properties::Hint;

/// Parameters for one native window creation call.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRequest {
    pub title: String,
    pub size: (u32, u32),
    /// Monitor index for exclusive fullscreen, `None` for a desktop window.
    pub fullscreen: Option<usize>,
    /// Applied in order before the window is created.
    pub hints: Vec<Hint>,
}

/// A windowing library, initialised for the lifetime of the value.
///
/// Dropping the platform shuts the library down.
pub trait Platform: Sized {
    type Window: NativeWindow;

    fn init() -> WindowResult<Self>;

    /// Snapshot of every connected monitor, primary first.
    fn monitors(&mut self) -> Vec<Monitor>;

    /// Process pending events. Returns `true` when the set of connected
    /// monitors or their configuration changed since the previous poll.
    fn poll_events(&mut self) -> bool;

    fn set_gamma(&mut self, monitor: usize, gamma: f32);

    fn create_window(&mut self, request: &WindowRequest) -> WindowResult<Self::Window>;
}

/// A native window with an OpenGL context.
pub trait NativeWindow {
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    fn swap_buffers(&mut self);

    fn position(&self) -> (i32, i32);
    fn set_position(&mut self, position: (i32, i32));
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, size: (u32, u32));
    fn set_decorated(&mut self, decorated: bool);

    /// Move the window onto `monitor` in exclusive fullscreen, or back to the
    /// desktop when `monitor` is `None`.
    fn set_monitor(
        &mut self,
        monitor: Option<usize>,
        position: (i32, i32),
        size: (u32, u32),
        refresh_rate: Option<u32>,
    );

    fn is_key_down(&self, key: Key) -> bool;

    /// Make the context current on this thread and load its entry points.
    fn load_gl(&mut self) -> GlContext;
}
