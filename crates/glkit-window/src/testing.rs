//! [`MockPlatform`]: a windowing backend for tests that needs no display.
//!
//! Every call that reaches the platform or one of its windows is appended to
//! a shared log. Platform start-ups and shut-downs are counted per thread so
//! lifecycle tests can assert on them without interfering with each other.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glfw::Key;
use glkit_core::testing::RecordingGl;
use glkit_core::GlContext;

use crate::error::{WindowError, WindowResult};
use crate::monitor::{ColorDepth, Monitor, VideoMode};
use crate::platform::{NativeWindow, Platform, WindowRequest};

thread_local! {
    static STARTED: Cell<usize> = const { Cell::new(0) };
    static STOPPED: Cell<usize> = const { Cell::new(0) };
}

/// A 60 Hz monitor with default colour depth.
pub fn mock_monitor(index: usize, position: (i32, i32), size: (u32, u32)) -> Monitor {
    Monitor {
        index,
        name: format!("Mock Display {index}"),
        position,
        content_scale: (1.0, 1.0),
        video_mode: VideoMode {
            size,
            color_depth: ColorDepth::default(),
            refresh_rate: 60,
        },
    }
}

/// One recorded platform or window call.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    CreateWindow(WindowRequest),
    SetPosition((i32, i32)),
    SetSize((u32, u32)),
    SetDecorated(bool),
    SetMonitor {
        monitor: Option<usize>,
        position: (i32, i32),
        size: (u32, u32),
        refresh_rate: Option<u32>,
    },
    SetShouldClose(bool),
    SwapBuffers,
    LoadGl,
    PollEvents,
    SetGamma { monitor: usize, gamma: f32 },
}

type CallLog = Rc<RefCell<Vec<PlatformCall>>>;

pub struct MockPlatform {
    monitors: Vec<Monitor>,
    pending: Option<Vec<Monitor>>,
    fail_next_window: Option<String>,
    log: CallLog,
    gl: Rc<RecordingGl>,
}

impl MockPlatform {
    /// Start a platform with the given monitors connected.
    pub fn with_monitors(monitors: Vec<Monitor>) -> Self {
        STARTED.with(|n| n.set(n.get() + 1));
        Self {
            monitors,
            pending: None,
            fail_next_window: None,
            log: CallLog::default(),
            gl: RecordingGl::new(),
        }
    }

    /// Number of platforms started on this thread.
    pub fn started() -> usize {
        STARTED.with(Cell::get)
    }

    /// Number of platforms shut down on this thread.
    pub fn stopped() -> usize {
        STOPPED.with(Cell::get)
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.log.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.log.borrow_mut().clear();
    }

    /// The driver handed out by every window's `load_gl`.
    pub fn gl(&self) -> &Rc<RecordingGl> {
        &self.gl
    }

    /// Replace the connected monitors; reported by the next poll.
    pub fn reconfigure_monitors(&mut self, monitors: Vec<Monitor>) {
        self.pending = Some(monitors);
    }

    /// Make the next window creation fail with `reason`.
    pub fn fail_next_window(&mut self, reason: impl Into<String>) {
        self.fail_next_window = Some(reason.into());
    }

    fn record(&self, call: PlatformCall) {
        self.log.borrow_mut().push(call);
    }
}

impl Drop for MockPlatform {
    fn drop(&mut self) {
        STOPPED.with(|n| n.set(n.get() + 1));
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;

    /// Two side-by-side 1080p and 1440p monitors.
    fn init() -> WindowResult<Self> {
        Ok(Self::with_monitors(vec![
            mock_monitor(0, (0, 0), (1920, 1080)),
            mock_monitor(1, (1920, 0), (2560, 1440)),
        ]))
    }

    fn monitors(&mut self) -> Vec<Monitor> {
        self.monitors.clone()
    }

    fn poll_events(&mut self) -> bool {
        self.record(PlatformCall::PollEvents);
        match self.pending.take() {
            Some(monitors) => {
                self.monitors = monitors;
                true
            }
            None => false,
        }
    }

    fn set_gamma(&mut self, monitor: usize, gamma: f32) {
        self.record(PlatformCall::SetGamma { monitor, gamma });
    }

    fn create_window(&mut self, request: &WindowRequest) -> WindowResult<MockWindow> {
        self.record(PlatformCall::CreateWindow(request.clone()));
        if let Some(reason) = self.fail_next_window.take() {
            return Err(WindowError::CreationFailed(reason));
        }

        let position = match request.fullscreen {
            Some(index) => self
                .monitors
                .get(index)
                .map(|m| m.position)
                .unwrap_or_default(),
            None => (0, 0),
        };
        Ok(MockWindow {
            log: Rc::clone(&self.log),
            gl: Rc::clone(&self.gl),
            position,
            size: request.size,
            should_close: false,
            pressed: Vec::new(),
        })
    }
}

pub struct MockWindow {
    log: CallLog,
    gl: Rc<RecordingGl>,
    position: (i32, i32),
    size: (u32, u32),
    should_close: bool,
    pressed: Vec<Key>,
}

impl MockWindow {
    pub fn press(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.retain(|k| *k != key);
    }

    fn record(&self, call: PlatformCall) {
        self.log.borrow_mut().push(call);
    }
}

impl NativeWindow for MockWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.record(PlatformCall::SetShouldClose(value));
        self.should_close = value;
    }

    fn swap_buffers(&mut self) {
        self.record(PlatformCall::SwapBuffers);
    }

    fn position(&self) -> (i32, i32) {
        self.position
    }

    fn set_position(&mut self, position: (i32, i32)) {
        self.record(PlatformCall::SetPosition(position));
        self.position = position;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, size: (u32, u32)) {
        self.record(PlatformCall::SetSize(size));
        self.size = size;
    }

    fn set_decorated(&mut self, decorated: bool) {
        self.record(PlatformCall::SetDecorated(decorated));
    }

    fn set_monitor(
        &mut self,
        monitor: Option<usize>,
        position: (i32, i32),
        size: (u32, u32),
        refresh_rate: Option<u32>,
    ) {
        self.record(PlatformCall::SetMonitor {
            monitor,
            position,
            size,
            refresh_rate,
        });
        self.position = position;
        self.size = size;
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn load_gl(&mut self) -> GlContext {
        self.record(PlatformCall::LoadGl);
        self.gl.context()
    }
}
