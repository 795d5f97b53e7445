#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{Rgba, RgbaImage};
use panoshot_capture_engine::backend::external::OUTPUTS_TOKEN;
use panoshot_capture_engine::backend::{ExternalToolCapturer, ToolSpec};
use panoshot_capture_engine::{DisplaySource, PixelBuffer};
use panoshot_common::error::{ShotError, ShotResult};
use panoshot_platform_core::{MonitorInfo, Rect};

/// A scripted desktop: each monitor captures as a solid color.
pub struct FakeDisplay {
    pub monitors: Vec<(MonitorInfo, Rgba<u8>)>,
    pub unavailable: bool,
    /// Geometry is readable but pixel access is refused.
    pub pixels_denied: bool,
    pub captured: Mutex<Vec<Rect>>,
}

impl FakeDisplay {
    pub fn new(monitors: Vec<(MonitorInfo, Rgba<u8>)>) -> Self {
        Self {
            monitors,
            unavailable: false,
            pixels_denied: false,
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn denied() -> Self {
        Self {
            unavailable: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn geometry_only(monitors: Vec<(MonitorInfo, Rgba<u8>)>) -> Self {
        Self {
            pixels_denied: true,
            ..Self::new(monitors)
        }
    }

    pub fn captured(&self) -> Vec<Rect> {
        self.captured.lock().unwrap().clone()
    }
}

impl DisplaySource for FakeDisplay {
    fn monitors(&self) -> ShotResult<Vec<MonitorInfo>> {
        if self.unavailable {
            return Err(ShotError::capture_unavailable("screen recording denied"));
        }
        Ok(self.monitors.iter().map(|(m, _)| m.clone()).collect())
    }

    fn capture_region(&self, rect: Rect) -> ShotResult<PixelBuffer> {
        if self.unavailable || self.pixels_denied {
            return Err(ShotError::capture_unavailable("screen recording denied"));
        }
        self.captured.lock().unwrap().push(rect);
        let color = self
            .monitors
            .iter()
            .find(|(m, _)| m.bounds.contains(rect.x, rect.y))
            .map(|(_, color)| *color)
            .unwrap_or(Rgba([255, 255, 255, 255]));
        PixelBuffer::filled(rect.width, rect.height, color)
    }
}

pub fn monitor(platform_id: u32, bounds: Rect, primary: bool) -> MonitorInfo {
    MonitorInfo {
        index: 0,
        platform_id,
        name: format!("DISPLAY-{platform_id}"),
        bounds,
        work_area: None,
        scale_factor: 1.0,
        primary,
    }
}

/// Write a solid-color PNG fixture.
pub fn write_png(path: &Path, width: u32, height: u32, color: Rgba<u8>) {
    RgbaImage::from_pixel(width, height, color)
        .save(path)
        .expect("fixture png should be writable");
}

/// A tool that copies `fixture` to its first output only.
pub fn copy_tool(fixture: &Path) -> ToolSpec {
    shell_tool(&format!("cp '{}' \"$1\"", fixture.display()))
}

/// A tool running `script` through `sh -c`; outputs arrive as `$1..$n`.
pub fn shell_tool(script: &str) -> ToolSpec {
    ToolSpec {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            script.to_string(),
            "fake-tool".to_string(),
            OUTPUTS_TOKEN.to_string(),
        ],
        primary_flag: None,
        multi_output: true,
        extension: "png".to_string(),
    }
}

pub fn external(tool: ToolSpec, scratch: &Path, max_outputs: usize) -> ExternalToolCapturer {
    ExternalToolCapturer::new(tool, scratch.to_path_buf(), max_outputs)
}

pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}
