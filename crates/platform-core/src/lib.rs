//! Panoshot platform core contracts.
//!
//! This crate contains cross-platform display geometry used by the capture
//! engine and the CLI without coupling to a concrete OS backend.

use serde::{Deserialize, Serialize};

/// A rectangle in virtual desktop coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the point lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        px >= self.x && (px as i64) < right && py >= self.y && (py as i64) < bottom
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}@{},{}", self.width, self.height, self.x, self.y)
    }
}

/// Information about a connected monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorInfo {
    /// Ordinal position in left-to-right order.
    pub index: usize,
    /// Identifier reported by the platform.
    pub platform_id: u32,
    /// Monitor name.
    pub name: String,
    /// Full bounds in the virtual desktop.
    pub bounds: Rect,
    /// Usable area excluding taskbars and docks, when the platform reports one.
    pub work_area: Option<Rect>,
    /// Scale factor (for example 1.0, 1.25, 2.0).
    pub scale_factor: f64,
    /// Whether this monitor is primary.
    pub primary: bool,
}

impl MonitorInfo {
    /// The rectangle that must be captured to get the whole monitor.
    ///
    /// When the work area dimensions disagree with the bounds and the bounds
    /// are at least as large, the full bounds size is anchored at the work
    /// area origin. Otherwise the bounds are used as-is.
    pub fn capture_rect(&self) -> Rect {
        match self.work_area {
            Some(work)
                if (work.width, work.height) != (self.bounds.width, self.bounds.height)
                    && self.bounds.width >= work.width
                    && self.bounds.height >= work.height =>
            {
                Rect::new(work.x, work.y, self.bounds.width, self.bounds.height)
            }
            _ => self.bounds,
        }
    }
}

/// Sort monitors left-to-right by bounds origin and reassign ordinal indices.
///
/// The sort is stable: monitors sharing a left edge keep the platform order.
pub fn sort_left_to_right(monitors: &mut [MonitorInfo]) {
    monitors.sort_by_key(|m| m.bounds.x);
    for (index, monitor) in monitors.iter_mut().enumerate() {
        monitor.index = index;
    }
}

/// Pick the primary monitor: the flagged one, else the one containing the
/// origin, else the first.
pub fn select_primary(monitors: &[MonitorInfo]) -> Option<&MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.primary)
        .or_else(|| monitors.iter().find(|m| m.bounds.contains(0, 0)))
        .or_else(|| monitors.first())
}

/// Display server / platform family used for capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayServer {
    Wayland,
    X11,
    Windows,
    MacOS,
    #[default]
    Unknown,
}

impl std::fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DisplayServer::Wayland => "Wayland",
            DisplayServer::X11 => "X11",
            DisplayServer::Windows => "Windows",
            DisplayServer::MacOS => "macOS",
            DisplayServer::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Detect the current display server.
pub fn detect_display_server() -> DisplayServer {
    if cfg!(target_os = "windows") {
        DisplayServer::Windows
    } else if cfg!(target_os = "macos") {
        DisplayServer::MacOS
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        DisplayServer::Wayland
    } else if std::env::var_os("DISPLAY").is_some() {
        DisplayServer::X11
    } else {
        DisplayServer::Unknown
    }
}

/// Compute virtual desktop bounds that include all connected monitors.
pub fn virtual_desktop_bounds(monitors: &[MonitorInfo]) -> Option<Rect> {
    let min_x = monitors.iter().map(|m| m.bounds.x).min()?;
    let min_y = monitors.iter().map(|m| m.bounds.y).min()?;
    let max_x = monitors
        .iter()
        .map(|m| m.bounds.x as i64 + m.bounds.width as i64)
        .max()?;
    let max_y = monitors
        .iter()
        .map(|m| m.bounds.y as i64 + m.bounds.height as i64)
        .max()?;

    let width = (max_x - min_x as i64).max(1) as u32;
    let height = (max_y - min_y as i64).max(1) as u32;
    Some(Rect::new(min_x, min_y, width, height))
}
