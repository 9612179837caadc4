//! Windows, monitors and the windowing lifecycle on top of GLFW.
//!
//! # Overview
//!
//! - [`Lifecycle`] owns the [`WindowSystem`]; initialise it first.
//! - [`WindowSystem`] keeps the monitor snapshot and pumps events.
//! - [`Window`] owns a native window and its OpenGL context, in one of the
//!   three [`WindowMode`]s.
//! - [`Platform`] and [`NativeWindow`] are the backend seam; [`GlfwPlatform`]
//!   is the real one.

pub mod error;
pub mod glfw_platform;
pub mod mode;
pub mod monitor;
pub mod platform;
pub mod properties;
pub mod system;
pub mod window;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{WindowError, WindowResult};
pub use glfw_platform::{GlfwPlatform, GlfwWindow};
pub use mode::{Placement, WindowMode};
pub use monitor::{ColorDepth, Monitor, VideoMode};
pub use platform::{NativeWindow, Platform, WindowRequest};
pub use properties::{
    ContextProperties, ContextReleaseBehavior, ContextRobustness, Hint, WindowProperties,
};
pub use system::{Lifecycle, WindowSystem};
pub use window::Window;

/// Keyboard keys, as reported by [`Window::is_key_down`].
pub use glfw::Key;
