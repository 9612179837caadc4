//! Window and context creation settings.

use crate::mode::{Placement, WindowMode};
use crate::monitor::VideoMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextRobustness {
    #[default]
    None,
    NoResetNotification,
    LoseContextOnReset,
}

/// What the driver does with pending commands when the context is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextReleaseBehavior {
    #[default]
    Any,
    Flush,
    None,
}

/// OpenGL context settings. The version is always 4.6 core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextProperties {
    pub debug: bool,
    pub robustness: ContextRobustness,
    pub release_behavior: ContextReleaseBehavior,
}

/// Settings for [`Window::new`](crate::Window::new).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowProperties {
    pub title: String,
    pub mode: WindowMode,
    pub resizable: bool,
    pub visible: bool,
    pub auto_iconify: bool,
    pub floating: bool,
    pub maximized: bool,
    pub center_cursor: bool,
    pub transparent_framebuffer: bool,
    pub focus_on_show: bool,
    pub scale_to_monitor: bool,
    pub context: ContextProperties,
}

impl Default for WindowProperties {
    fn default() -> Self {
        Self {
            title: "Window".to_owned(),
            mode: WindowMode::default(),
            resizable: false,
            visible: true,
            auto_iconify: true,
            floating: false,
            maximized: false,
            center_cursor: true,
            transparent_framebuffer: false,
            focus_on_show: true,
            scale_to_monitor: false,
            context: ContextProperties::default(),
        }
    }
}

/// One creation hint, applied in order by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hint {
    /// Reset every hint to the platform default.
    Defaults,
    Decorated(bool),
    /// Colour depth and refresh rate.
    VideoMode(VideoMode),
    Resizable(bool),
    Visible(bool),
    AutoIconify(bool),
    Floating(bool),
    Maximized(bool),
    CenterCursor(bool),
    TransparentFramebuffer(bool),
    FocusOnShow(bool),
    ScaleToMonitor(bool),
    Context(ContextProperties),
}

impl WindowProperties {
    /// Hints for creating a window with these properties at `placement`:
    /// defaults, then the mode's hints, then the window flags, then the
    /// context.
    pub fn hints(&self, placement: &Placement) -> Vec<Hint> {
        let mut hints = vec![Hint::Defaults];
        hints.extend(placement.decorated.map(Hint::Decorated));
        hints.extend(placement.video_mode.map(Hint::VideoMode));
        hints.extend([
            Hint::Resizable(self.resizable),
            Hint::Visible(self.visible),
            Hint::AutoIconify(self.auto_iconify),
            Hint::Floating(self.floating),
            Hint::Maximized(self.maximized),
            Hint::CenterCursor(self.center_cursor),
            Hint::TransparentFramebuffer(self.transparent_framebuffer),
            Hint::FocusOnShow(self.focus_on_show),
            Hint::ScaleToMonitor(self.scale_to_monitor),
            Hint::Context(self.context),
        ]);
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_monitor;

    #[test]
    fn defaults() {
        let props = WindowProperties::default();
        assert_eq!(props.title, "Window");
        assert_eq!(props.mode, WindowMode::windowed(800, 600));
        assert!(!props.resizable && props.visible && props.auto_iconify);
        assert!(!props.floating && !props.maximized && props.center_cursor);
        assert!(!props.transparent_framebuffer && props.focus_on_show && !props.scale_to_monitor);
        assert_eq!(props.context.robustness, ContextRobustness::None);
        assert_eq!(props.context.release_behavior, ContextReleaseBehavior::Any);
        assert!(!props.context.debug);
    }

    #[test]
    fn windowed_hints_start_with_defaults_and_end_with_context() {
        let props = WindowProperties::default();
        let placement = Placement::resolve(&props.mode, &[]).unwrap();
        let hints = props.hints(&placement);

        assert_eq!(hints[0], Hint::Defaults);
        assert_eq!(hints[1], Hint::Decorated(true));
        assert!(matches!(hints[2], Hint::Resizable(false)));
        assert_eq!(hints.last(), Some(&Hint::Context(props.context)));
        assert!(!hints.iter().any(|h| matches!(h, Hint::VideoMode(_))));
    }

    #[test]
    fn fullscreen_hints_carry_the_video_mode() {
        let monitor = mock_monitor(0, (0, 0), (1920, 1080));
        let props = WindowProperties {
            mode: WindowMode::FullscreenWindowed { monitor: 0 },
            ..WindowProperties::default()
        };
        let placement = Placement::resolve(&props.mode, &[monitor.clone()]).unwrap();
        let hints = props.hints(&placement);

        assert_eq!(hints[1], Hint::VideoMode(monitor.video_mode));
        assert!(!hints.iter().any(|h| matches!(h, Hint::Decorated(_))));
    }
}
