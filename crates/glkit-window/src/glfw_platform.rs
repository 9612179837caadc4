//! GLFW backend.

use std::borrow::Borrow;
use std::cell::RefCell;

use glfw::{
    Action, ClientApiHint, ContextCreationApi, Glfw, GlfwReceiver, Key, OpenGlProfileHint,
    PWindow, WindowEvent, WindowHint,
};
use glkit_core::GlContext;
use tracing::{debug, error, info, warn};

use crate::error::{WindowError, WindowResult};
use crate::monitor::{ColorDepth, Monitor, VideoMode};
use crate::platform::{NativeWindow, Platform, WindowRequest};
use crate::properties::{ContextProperties, ContextReleaseBehavior, ContextRobustness, Hint};

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn on_glfw_error(err: glfw::Error, description: String) {
    error!(?err, "glfw: {description}");
    LAST_ERROR.with(|last| *last.borrow_mut() = Some(description));
}

fn take_last_error() -> Option<String> {
    LAST_ERROR.with(|last| last.borrow_mut().take())
}

/// View a monitor list element as a monitor, whichever way GLFW lends it.
fn as_monitor<M: Borrow<glfw::Monitor>>(monitor: &M) -> &glfw::Monitor {
    monitor.borrow()
}

impl From<glfw::VidMode> for VideoMode {
    fn from(mode: glfw::VidMode) -> Self {
        Self {
            size: (mode.width, mode.height),
            color_depth: ColorDepth {
                red: mode.red_bits,
                green: mode.green_bits,
                blue: mode.blue_bits,
                ..ColorDepth::default()
            },
            refresh_rate: mode.refresh_rate,
        }
    }
}

fn snapshot(index: usize, monitor: &glfw::Monitor) -> Monitor {
    Monitor {
        index,
        name: monitor
            .get_name()
            .unwrap_or_else(|| format!("Monitor {index}")),
        position: monitor.get_pos(),
        content_scale: monitor.get_content_scale(),
        video_mode: monitor
            .get_video_mode()
            .map(VideoMode::from)
            .unwrap_or_default(),
    }
}

fn apply_context(glfw: &mut Glfw, context: &ContextProperties) {
    let robustness = match context.robustness {
        ContextRobustness::None => glfw::ContextRobustnessHint::NoRobustness,
        ContextRobustness::NoResetNotification => glfw::ContextRobustnessHint::NoResetNotification,
        ContextRobustness::LoseContextOnReset => glfw::ContextRobustnessHint::LoseContextOnReset,
    };
    let release = match context.release_behavior {
        ContextReleaseBehavior::Any => glfw::ContextReleaseBehavior::Any,
        ContextReleaseBehavior::Flush => glfw::ContextReleaseBehavior::Flush,
        ContextReleaseBehavior::None => glfw::ContextReleaseBehavior::None,
    };

    glfw.window_hint(WindowHint::ContextVersion(4, 6));
    glfw.window_hint(WindowHint::ClientApi(ClientApiHint::OpenGl));
    glfw.window_hint(WindowHint::ContextCreationApi(ContextCreationApi::Native));
    glfw.window_hint(WindowHint::ContextRobustness(robustness));
    glfw.window_hint(WindowHint::ContextReleaseBehavior(release));
    glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
    glfw.window_hint(WindowHint::OpenGlDebugContext(context.debug));
}

fn apply_hint(glfw: &mut Glfw, hint: &Hint) {
    match *hint {
        Hint::Defaults => glfw.default_window_hints(),
        Hint::Decorated(value) => glfw.window_hint(WindowHint::Decorated(value)),
        Hint::VideoMode(mode) => {
            let depth = mode.color_depth;
            glfw.window_hint(WindowHint::RedBits(Some(depth.red)));
            glfw.window_hint(WindowHint::GreenBits(Some(depth.green)));
            glfw.window_hint(WindowHint::BlueBits(Some(depth.blue)));
            glfw.window_hint(WindowHint::AlphaBits(Some(depth.alpha)));
            glfw.window_hint(WindowHint::DepthBits(Some(depth.depth)));
            glfw.window_hint(WindowHint::StencilBits(Some(depth.stencil)));
            glfw.window_hint(WindowHint::RefreshRate(Some(mode.refresh_rate)));
        }
        Hint::Resizable(value) => glfw.window_hint(WindowHint::Resizable(value)),
        Hint::Visible(value) => glfw.window_hint(WindowHint::Visible(value)),
        Hint::AutoIconify(value) => glfw.window_hint(WindowHint::AutoIconify(value)),
        Hint::Floating(value) => glfw.window_hint(WindowHint::Floating(value)),
        Hint::Maximized(value) => glfw.window_hint(WindowHint::Maximized(value)),
        Hint::CenterCursor(value) => glfw.window_hint(WindowHint::CenterCursor(value)),
        Hint::TransparentFramebuffer(value) => {
            glfw.window_hint(WindowHint::TransparentFramebuffer(value))
        }
        Hint::FocusOnShow(value) => glfw.window_hint(WindowHint::FocusOnShow(value)),
        Hint::ScaleToMonitor(value) => glfw.window_hint(WindowHint::ScaleToMonitor(value)),
        Hint::Context(context) => apply_context(glfw, &context),
    }
}

/// GLFW, initialised. Terminated when the last clone of the inner handle,
/// including those held by windows, is dropped.
pub struct GlfwPlatform {
    glfw: Glfw,
    monitors: Vec<Monitor>,
}

impl GlfwPlatform {
    fn query_monitors(&mut self) -> Vec<Monitor> {
        self.glfw.with_connected_monitors(|_, monitors| {
            monitors
                .iter()
                .enumerate()
                .map(|(index, monitor)| snapshot(index, as_monitor(monitor)))
                .collect()
        })
    }
}

impl Platform for GlfwPlatform {
    type Window = GlfwWindow;

    fn init() -> WindowResult<Self> {
        let glfw = glfw::init(on_glfw_error)
            .map_err(|err| WindowError::InitializationFailed(format!("{err:?}")))?;
        info!(version = %glfw::get_version_string(), "GLFW initialised");

        let mut platform = Self {
            glfw,
            monitors: Vec::new(),
        };
        platform.monitors = platform.query_monitors();
        Ok(platform)
    }

    fn monitors(&mut self) -> Vec<Monitor> {
        self.monitors = self.query_monitors();
        self.monitors.clone()
    }

    fn poll_events(&mut self) -> bool {
        self.glfw.poll_events();

        let current = self.query_monitors();
        if current == self.monitors {
            return false;
        }
        debug!(
            before = self.monitors.len(),
            after = current.len(),
            "monitor configuration changed"
        );
        self.monitors = current;
        true
    }

    fn set_gamma(&mut self, monitor: usize, gamma: f32) {
        let mut count = 0;
        let handles = unsafe { glfw::ffi::glfwGetMonitors(&mut count) };
        if handles.is_null() || monitor >= count.max(0) as usize {
            warn!(monitor, "cannot set gamma on a disconnected monitor");
            return;
        }
        unsafe { glfw::ffi::glfwSetGamma(*handles.add(monitor), gamma) };
    }

    fn create_window(&mut self, request: &WindowRequest) -> WindowResult<GlfwWindow> {
        for hint in &request.hints {
            apply_hint(&mut self.glfw, hint);
        }

        let (width, height) = request.size;
        let title = request.title.as_str();
        let created = match request.fullscreen {
            None => self
                .glfw
                .create_window(width, height, title, glfw::WindowMode::Windowed),
            Some(index) => self.glfw.with_connected_monitors(|glfw, monitors| {
                let monitor = monitors.get(index).map(as_monitor)?;
                glfw.create_window(width, height, title, glfw::WindowMode::FullScreen(monitor))
            }),
        };

        let Some((window, events)) = created else {
            let reason = take_last_error().unwrap_or_else(|| "unknown GLFW error".to_owned());
            return Err(WindowError::CreationFailed(reason));
        };

        Ok(GlfwWindow {
            window,
            _events: events,
        })
    }
}

pub struct GlfwWindow {
    window: PWindow,
    _events: GlfwReceiver<(f64, WindowEvent)>,
}

impl NativeWindow for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, value: bool) {
        self.window.set_should_close(value);
    }

    fn swap_buffers(&mut self) {
        use glfw::Context;
        self.window.swap_buffers();
    }

    fn position(&self) -> (i32, i32) {
        self.window.get_pos()
    }

    fn set_position(&mut self, (x, y): (i32, i32)) {
        self.window.set_pos(x, y);
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn set_size(&mut self, (width, height): (u32, u32)) {
        self.window.set_size(width as i32, height as i32);
    }

    fn set_decorated(&mut self, decorated: bool) {
        self.window.set_decorated(decorated);
    }

    fn set_monitor(
        &mut self,
        monitor: Option<usize>,
        (x, y): (i32, i32),
        (width, height): (u32, u32),
        refresh_rate: Option<u32>,
    ) {
        let Some(index) = monitor else {
            self.window
                .set_monitor(glfw::WindowMode::Windowed, x, y, width, height, refresh_rate);
            return;
        };

        let mut handle = self.window.glfw.clone();
        let window = &mut self.window;
        handle.with_connected_monitors(|_, monitors| match monitors.get(index).map(as_monitor) {
            Some(monitor) => window.set_monitor(
                glfw::WindowMode::FullScreen(monitor),
                x,
                y,
                width,
                height,
                refresh_rate,
            ),
            None => warn!(index, "monitor disconnected before fullscreen switch"),
        });
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.window.get_key(key) != Action::Release
    }

    fn load_gl(&mut self) -> GlContext {
        use glfw::Context;
        self.window.make_current();
        glkit_core::loader::load_with(|symbol| self.window.get_proc_address(symbol) as *const _)
    }
}
