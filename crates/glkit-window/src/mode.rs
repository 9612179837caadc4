//! The three window modes and how each one maps onto a concrete placement.

use crate::error::{WindowError, WindowResult};
use crate::monitor::{self, Monitor, VideoMode};

/// Position used when switching to [`WindowMode::Windowed`] without one.
pub const DEFAULT_WINDOWED_POSITION: (i32, i32) = (200, 200);

/// How a window occupies the screen. Switching between variants is a full
/// reconfiguration.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMode {
    /// A normal desktop window.
    Windowed {
        size: (u32, u32),
        /// Left to the platform when `None`.
        position: Option<(i32, i32)>,
        decorated: bool,
    },
    /// Borderless window covering a monitor at its current video mode.
    FullscreenWindowed { monitor: usize },
    /// Exclusive fullscreen on a monitor, at its current video mode unless
    /// one is given.
    FullscreenExclusive {
        monitor: usize,
        video_mode: Option<VideoMode>,
    },
}

impl WindowMode {
    /// Decorated window of `size`, placed by the platform.
    pub fn windowed(width: u32, height: u32) -> Self {
        Self::Windowed {
            size: (width, height),
            position: None,
            decorated: true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Windowed { .. } => "windowed",
            Self::FullscreenWindowed { .. } => "fullscreen windowed",
            Self::FullscreenExclusive { .. } => "fullscreen exclusive",
        }
    }
}

impl Default for WindowMode {
    fn default() -> Self {
        Self::windowed(800, 600)
    }
}

/// Everything a window needs to enter a [`WindowMode`], resolved against the
/// current monitor list.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub size: (u32, u32),
    /// Where to put the window. Always set for [`WindowMode::FullscreenWindowed`].
    pub position: Option<(i32, i32)>,
    /// Monitor index for exclusive fullscreen.
    pub fullscreen_monitor: Option<usize>,
    /// Video mode to request as creation hints.
    pub video_mode: Option<VideoMode>,
    pub refresh_rate: Option<u32>,
    /// Decoration requested by the mode, if it has an opinion.
    pub decorated: Option<bool>,
    /// Borderless fullscreen: decorations come off and position and size are
    /// re-applied after the window is placed, since the platform may clip a
    /// window sitting flush against the monitor edges.
    pub borderless: bool,
}

impl Placement {
    /// Resolve `mode` against `monitors`. Out-of-range monitor indices fall
    /// back to the primary monitor.
    pub fn resolve(mode: &WindowMode, monitors: &[Monitor]) -> WindowResult<Self> {
        match mode {
            WindowMode::Windowed {
                size,
                position,
                decorated,
            } => Ok(Self {
                size: *size,
                position: *position,
                fullscreen_monitor: None,
                video_mode: None,
                refresh_rate: None,
                decorated: Some(*decorated),
                borderless: false,
            }),
            WindowMode::FullscreenWindowed { monitor } => {
                let target = monitor::or_primary(monitors, *monitor)
                    .ok_or(WindowError::NoMonitor(mode.name()))?;
                let video_mode = target.video_mode;
                Ok(Self {
                    size: video_mode.size,
                    position: Some(target.position),
                    fullscreen_monitor: None,
                    video_mode: Some(video_mode),
                    refresh_rate: Some(video_mode.refresh_rate),
                    decorated: None,
                    borderless: true,
                })
            }
            WindowMode::FullscreenExclusive {
                monitor,
                video_mode,
            } => {
                let target = monitor::or_primary(monitors, *monitor)
                    .ok_or(WindowError::NoMonitor(mode.name()))?;
                let video_mode = video_mode.unwrap_or(target.video_mode);
                Ok(Self {
                    size: video_mode.size,
                    position: None,
                    fullscreen_monitor: Some(target.index),
                    video_mode: Some(video_mode),
                    refresh_rate: Some(video_mode.refresh_rate),
                    decorated: None,
                    borderless: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::ColorDepth;
    use crate::testing::mock_monitor;

    fn monitors() -> Vec<Monitor> {
        vec![
            mock_monitor(0, (0, 0), (1920, 1080)),
            mock_monitor(1, (1920, 0), (2560, 1440)),
        ]
    }

    #[test]
    fn windowed_keeps_requested_geometry() {
        let mode = WindowMode::Windowed {
            size: (800, 600),
            position: None,
            decorated: true,
        };
        let placement = Placement::resolve(&mode, &monitors()).unwrap();
        assert_eq!(placement.size, (800, 600));
        assert_eq!(placement.position, None);
        assert_eq!(placement.decorated, Some(true));
        assert_eq!(placement.fullscreen_monitor, None);
        assert!(!placement.borderless);
    }

    #[test]
    fn windowed_needs_no_monitor() {
        assert!(Placement::resolve(&WindowMode::default(), &[]).is_ok());
    }

    #[test]
    fn fullscreen_windowed_covers_the_monitor() {
        let mode = WindowMode::FullscreenWindowed { monitor: 1 };
        let placement = Placement::resolve(&mode, &monitors()).unwrap();
        assert_eq!(placement.size, (2560, 1440));
        assert_eq!(placement.position, Some((1920, 0)));
        assert_eq!(placement.refresh_rate, Some(60));
        assert_eq!(placement.fullscreen_monitor, None);
        assert!(placement.borderless);
    }

    #[test]
    fn fullscreen_out_of_range_uses_primary() {
        let mode = WindowMode::FullscreenWindowed { monitor: 9 };
        let placement = Placement::resolve(&mode, &monitors()).unwrap();
        assert_eq!(placement.position, Some((0, 0)));
        assert_eq!(placement.size, (1920, 1080));

        let mode = WindowMode::FullscreenExclusive {
            monitor: 9,
            video_mode: None,
        };
        let placement = Placement::resolve(&mode, &monitors()).unwrap();
        assert_eq!(placement.fullscreen_monitor, Some(0));
    }

    #[test]
    fn exclusive_prefers_explicit_video_mode() {
        let explicit = VideoMode {
            size: (1280, 720),
            color_depth: ColorDepth {
                red: 10,
                green: 10,
                blue: 10,
                ..ColorDepth::default()
            },
            refresh_rate: 144,
        };
        let mode = WindowMode::FullscreenExclusive {
            monitor: 1,
            video_mode: Some(explicit),
        };
        let placement = Placement::resolve(&mode, &monitors()).unwrap();
        assert_eq!(placement.size, (1280, 720));
        assert_eq!(placement.refresh_rate, Some(144));
        assert_eq!(placement.video_mode, Some(explicit));
        assert_eq!(placement.fullscreen_monitor, Some(1));
        assert_eq!(placement.position, None);
    }

    #[test]
    fn fullscreen_without_monitors_is_an_error() {
        for mode in [
            WindowMode::FullscreenWindowed { monitor: 0 },
            WindowMode::FullscreenExclusive {
                monitor: 0,
                video_mode: None,
            },
        ] {
            assert!(matches!(
                Placement::resolve(&mode, &[]),
                Err(WindowError::NoMonitor(_))
            ));
        }
    }
}
