//! The initialised windowing system and the lifecycle value that owns it.

use tracing::{debug, info};

use crate::error::WindowResult;
use crate::monitor::{self, Monitor};
use crate::platform::Platform;
use crate::properties::WindowProperties;
use crate::window::Window;

/// A running windowing platform plus a snapshot of the connected monitors.
///
/// The snapshot is taken on creation and refreshed whenever
/// [`WindowSystem::poll_events`] sees the display configuration change.
pub struct WindowSystem<P: Platform> {
    platform: P,
    monitors: Vec<Monitor>,
}

impl<P: Platform> WindowSystem<P> {
    pub fn new(mut platform: P) -> Self {
        let monitors = platform.monitors();
        info!(monitors = monitors.len(), "window system ready");
        Self { platform, monitors }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Shorthand for [`Window::new`].
    pub fn create_window(&mut self, properties: &WindowProperties) -> WindowResult<Window<P>> {
        Window::new(self, properties)
    }

    /// Process pending events, refreshing the monitor snapshot if the
    /// display configuration changed.
    pub fn poll_events(&mut self) {
        if self.platform.poll_events() {
            self.reload_monitors();
        }
    }

    pub fn reload_monitors(&mut self) {
        self.monitors = self.platform.monitors();
        debug!(monitors = self.monitors.len(), "monitors reloaded");
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    pub fn try_get_monitor(&self, index: usize) -> Option<&Monitor> {
        monitor::try_get(&self.monitors, index)
    }

    pub fn get_monitor_or<'a>(&'a self, index: usize, other: &'a Monitor) -> &'a Monitor {
        self.try_get_monitor(index).unwrap_or(other)
    }

    /// Monitor `index`, or the primary monitor. `None` when nothing is
    /// connected.
    pub fn get_monitor_or_primary(&self, index: usize) -> Option<&Monitor> {
        monitor::or_primary(&self.monitors, index)
    }

    /// Monitor `index`, or monitor `index - 1`, or the last monitor. `None`
    /// when nothing is connected, which is the only way `index == 0` can be
    /// out of range.
    pub fn get_monitor_or_last(&self, index: usize) -> Option<&Monitor> {
        monitor::or_last(&self.monitors, index)
    }

    pub fn set_gamma(&mut self, monitor: &Monitor, gamma: f32) {
        self.platform.set_gamma(monitor.index, gamma);
    }
}

/// Owner of the process's [`WindowSystem`].
///
/// Construct one on the application thread, call [`Lifecycle::init`] before
/// creating windows, and [`Lifecycle::terminate`] (or drop it) after every
/// window is gone.
pub struct Lifecycle<P: Platform> {
    system: Option<WindowSystem<P>>,
}

impl<P: Platform> Lifecycle<P> {
    pub fn new() -> Self {
        Self { system: None }
    }

    /// Start the platform. Later calls before [`Lifecycle::terminate`]
    /// return the running system without starting another.
    pub fn init(&mut self) -> WindowResult<&mut WindowSystem<P>> {
        let system = match self.system.take() {
            Some(system) => {
                debug!("window system already initialised");
                system
            }
            None => WindowSystem::new(P::init()?),
        };
        Ok(self.system.insert(system))
    }

    /// Shut the platform down. Does nothing when not initialised.
    pub fn terminate(&mut self) {
        if self.system.take().is_some() {
            info!("window system terminated");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.system.is_some()
    }

    pub fn get(&self) -> Option<&WindowSystem<P>> {
        self.system.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut WindowSystem<P>> {
        self.system.as_mut()
    }
}

impl<P: Platform> Default for Lifecycle<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_monitor, MockPlatform, PlatformCall};

    fn three() -> Vec<Monitor> {
        vec![
            mock_monitor(0, (0, 0), (1920, 1080)),
            mock_monitor(1, (1920, 0), (2560, 1440)),
            mock_monitor(2, (4480, 0), (1280, 1024)),
        ]
    }

    #[test]
    fn init_twice_starts_platform_once() {
        let mut lifecycle = Lifecycle::<MockPlatform>::new();
        lifecycle.init().unwrap();
        lifecycle.init().unwrap();

        assert_eq!(MockPlatform::started(), 1);
        assert!(lifecycle.is_initialized());

        lifecycle.terminate();
        assert_eq!(MockPlatform::stopped(), 1);
        assert!(!lifecycle.is_initialized());
    }

    #[test]
    fn terminate_without_init_is_a_no_op() {
        let mut lifecycle = Lifecycle::<MockPlatform>::new();
        lifecycle.terminate();
        assert_eq!(MockPlatform::stopped(), 0);
        assert!(lifecycle.get().is_none());
    }

    #[test]
    fn init_after_terminate_starts_again() {
        let mut lifecycle = Lifecycle::<MockPlatform>::new();
        lifecycle.init().unwrap();
        lifecycle.terminate();
        lifecycle.init().unwrap();
        assert_eq!(MockPlatform::started(), 2);
        drop(lifecycle);
        assert_eq!(MockPlatform::stopped(), 2);
    }

    #[test]
    fn monitor_queries_and_fallbacks() {
        let system = WindowSystem::new(MockPlatform::with_monitors(three()));

        assert_eq!(system.monitor_count(), 3);
        assert!(system.try_get_monitor(3).is_none());
        assert_eq!(system.get_monitor_or_primary(3).map(|m| m.index), Some(0));
        assert_eq!(system.get_monitor_or_last(3).map(|m| m.index), Some(2));
        assert_eq!(system.get_monitor_or_last(1).map(|m| m.index), Some(1));

        let spare = mock_monitor(9, (0, 0), (640, 480));
        assert_eq!(system.get_monitor_or(4, &spare).index, 9);
        assert_eq!(system.get_monitor_or(2, &spare).index, 2);
    }

    #[test]
    fn no_monitors_means_no_fallback() {
        let system = WindowSystem::new(MockPlatform::with_monitors(Vec::new()));
        assert!(system.get_monitor_or_primary(0).is_none());
        assert!(system.get_monitor_or_last(0).is_none());
    }

    #[test]
    fn poll_refreshes_snapshot_on_display_change() {
        let mut system = WindowSystem::new(MockPlatform::with_monitors(three()));
        system.poll_events();
        assert_eq!(system.monitor_count(), 3);

        system
            .platform_mut()
            .reconfigure_monitors(vec![mock_monitor(0, (0, 0), (3840, 2160))]);
        assert_eq!(system.monitor_count(), 3);

        system.poll_events();
        assert_eq!(system.monitor_count(), 1);
        assert_eq!(
            system.try_get_monitor(0).map(|m| m.video_mode.size),
            Some((3840, 2160))
        );
    }

    #[test]
    fn gamma_targets_the_monitor_index() {
        let mut system = WindowSystem::new(MockPlatform::with_monitors(three()));
        let second = system.try_get_monitor(1).cloned().unwrap();
        system.set_gamma(&second, 2.2);

        assert!(system
            .platform()
            .calls()
            .contains(&PlatformCall::SetGamma {
                monitor: 1,
                gamma: 2.2
            }));
    }
}
