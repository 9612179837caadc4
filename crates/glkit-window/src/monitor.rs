//! Monitor snapshots and video modes.
//!
//! A [`Monitor`] is plain data captured from the platform; it does not keep
//! a native handle. Index lookups go through the fallback helpers at the
//! bottom of this module, which [`WindowSystem`](crate::WindowSystem) exposes
//! as methods.

use tracing::warn;

/// Bits per channel plus depth and stencil buffer sizes.
///
/// Usually taken from a monitor's current video mode rather than chosen by
/// hand. Alpha, depth and stencil are not reported by monitors and keep
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDepth {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
    pub depth: u32,
    pub stencil: u32,
}

impl Default for ColorDepth {
    fn default() -> Self {
        Self {
            red: 8,
            green: 8,
            blue: 8,
            alpha: 8,
            depth: 24,
            stencil: 8,
        }
    }
}

/// Resolution, colour depth and refresh rate of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoMode {
    pub size: (u32, u32),
    pub color_depth: ColorDepth,
    pub refresh_rate: u32,
}

/// A connected display, as seen at the last monitor refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// Position in the platform's monitor list; `0` is the primary monitor.
    pub index: usize,
    pub name: String,
    /// Virtual-desktop position of the monitor's top-left corner.
    pub position: (i32, i32),
    pub content_scale: (f32, f32),
    pub video_mode: VideoMode,
}

pub(crate) fn try_get(monitors: &[Monitor], index: usize) -> Option<&Monitor> {
    monitors.get(index)
}

/// `index`, or the primary monitor when `index` is out of range. `None` only
/// when nothing is connected.
pub(crate) fn or_primary(monitors: &[Monitor], index: usize) -> Option<&Monitor> {
    try_get(monitors, index).or_else(|| {
        let primary = monitors.first();
        if primary.is_some() {
            warn!(index, "monitor index out of range; using primary");
        }
        primary
    })
}

/// `index`, or the monitor just before it when `index` is out of range.
///
/// When `index - 1` is itself out of range the last monitor is used. With
/// nothing connected every index is out of range and the result is `None`;
/// this is also the only case in which `index == 0` falls back.
pub(crate) fn or_last(monitors: &[Monitor], index: usize) -> Option<&Monitor> {
    try_get(monitors, index).or_else(|| {
        let previous = index
            .checked_sub(1)
            .and_then(|i| monitors.get(i))
            .or_else(|| monitors.last());
        if previous.is_some() {
            warn!(index, "monitor index out of range; using previous");
        }
        previous
    })
}
