use std::fmt;

use glfw::Key;
use glkit_core::GlContext;
use tracing::{debug, error, info};

use crate::error::WindowResult;
use crate::mode::{Placement, WindowMode, DEFAULT_WINDOWED_POSITION};
use crate::platform::{NativeWindow, Platform, WindowRequest};
use crate::properties::WindowProperties;
use crate::system::WindowSystem;

/// A native window with a current OpenGL 4.6 core context.
///
/// Only exists once creation succeeded. The context is made current and its
/// entry points loaded during [`Window::new`]; objects created from
/// [`Window::gl`] belong to it.
pub struct Window<P: Platform> {
    native: P::Window,
    mode: WindowMode,
    gl: GlContext,
}

impl<P: Platform> Window<P> {
    pub fn new(system: &mut WindowSystem<P>, properties: &WindowProperties) -> WindowResult<Self> {
        let placement = Placement::resolve(&properties.mode, system.monitors())?;
        let request = WindowRequest {
            title: properties.title.clone(),
            size: placement.size,
            fullscreen: placement.fullscreen_monitor,
            hints: properties.hints(&placement),
        };

        let mut native = system
            .platform_mut()
            .create_window(&request)
            .inspect_err(|err| error!(title = %request.title, "{err}"))?;

        if let Some(position) = placement.position {
            // Re-apply the size: a window placed flush against the monitor
            // edges may have been clipped on creation.
            if placement.borderless {
                native.set_decorated(false);
            }
            native.set_position(position);
            native.set_size(placement.size);
        }

        let gl = native.load_gl();
        info!(
            title = %request.title,
            mode = properties.mode.name(),
            size = ?placement.size,
            "window created"
        );

        Ok(Self {
            native,
            mode: properties.mode.clone(),
            gl,
        })
    }

    /// Context for creating buffers, shaders and vertex arrays.
    pub fn gl(&self) -> &GlContext {
        &self.gl
    }

    pub fn window_mode(&self) -> &WindowMode {
        &self.mode
    }

    /// `false` once a close was requested, by the user or [`Window::request_close`].
    pub fn is_open(&self) -> bool {
        !self.native.should_close()
    }

    pub fn request_close(&mut self) {
        self.native.set_should_close(true);
    }

    /// Present the back buffer.
    pub fn update(&mut self) {
        self.native.swap_buffers();
    }

    pub fn position(&self) -> (i32, i32) {
        self.native.position()
    }

    pub fn set_position(&mut self, position: (i32, i32)) {
        self.native.set_position(position);
    }

    pub fn size(&self) -> (u32, u32) {
        self.native.size()
    }

    pub fn set_size(&mut self, size: (u32, u32)) {
        self.native.set_size(size);
    }

    pub fn set_decorated(&mut self, decorated: bool) {
        self.native.set_decorated(decorated);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.native.is_key_down(key)
    }

    pub fn native(&self) -> &P::Window {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut P::Window {
        &mut self.native
    }

    /// Reconfigure into `mode` with a single monitor switch.
    ///
    /// Windowed mode without a position lands at (200, 200). Exclusive
    /// fullscreen keeps the current position for when the window returns to
    /// the desktop.
    pub fn set_window_mode(&mut self, system: &WindowSystem<P>, mode: WindowMode) -> WindowResult<()> {
        let placement = Placement::resolve(&mode, system.monitors())?;

        let position = match &mode {
            WindowMode::Windowed { .. } => {
                Some(placement.position.unwrap_or(DEFAULT_WINDOWED_POSITION))
            }
            WindowMode::FullscreenWindowed { .. } | WindowMode::FullscreenExclusive { .. } => {
                placement.position
            }
        };

        match placement.decorated {
            Some(decorated) => self.native.set_decorated(decorated),
            None if placement.borderless => self.native.set_decorated(true),
            None => {}
        }

        let target = position.unwrap_or_else(|| self.native.position());
        self.native.set_monitor(
            placement.fullscreen_monitor,
            target,
            placement.size,
            placement.refresh_rate,
        );

        if let Some(position) = position {
            if placement.borderless {
                self.native.set_decorated(false);
            }
            self.native.set_position(position);
            self.native.set_size(placement.size);
        }

        debug!(from = self.mode.name(), to = mode.name(), "window mode changed");
        self.mode = mode;
        Ok(())
    }
}

impl<P: Platform> fmt::Debug for Window<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("mode", &self.mode)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}
