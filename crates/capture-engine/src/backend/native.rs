//! Native capture: enumerate monitors, copy each region.

use panoshot_common::error::{ErrorKind, ShotError, ShotResult};
use panoshot_platform_core::{MonitorInfo, Rect};

use crate::backend::{CaptureScope, Capturer, DisplaySource};
use crate::buffer::PixelBuffer;
use crate::enumerate::{list_monitors, primary_monitor};

/// Captures monitors through a [`DisplaySource`].
pub struct NativeCapturer {
    source: Box<dyn DisplaySource>,
}

impl NativeCapturer {
    pub fn new(source: Box<dyn DisplaySource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn DisplaySource {
        self.source.as_ref()
    }

    /// Capture one rectangle of the desktop.
    pub fn capture_region(&self, rect: Rect) -> ShotResult<PixelBuffer> {
        if rect.is_empty() {
            return Err(ShotError::invalid_image(format!(
                "refusing to capture empty region {rect}"
            )));
        }
        let buffer = self.source.capture_region(rect)?;
        if buffer.dimensions() != (rect.width, rect.height) {
            tracing::debug!(
                requested = %rect,
                captured_width = buffer.width(),
                captured_height = buffer.height(),
                "Platform returned physical pixels for region"
            );
        }
        Ok(buffer)
    }

    fn primary_rect(&self) -> ShotResult<Rect> {
        match primary_monitor(self.source()) {
            Ok(monitor) => Ok(monitor.capture_rect()),
            Err(err) if err.kind() == ErrorKind::Enumeration => {
                let rect = self.source.best_effort_primary().ok_or(err)?;
                tracing::warn!(rect = %rect, "Monitor enumeration failed; using best-effort primary");
                Ok(rect)
            }
            Err(err) => Err(err),
        }
    }

    fn capture_monitor(&self, monitor: &MonitorInfo) -> ShotResult<PixelBuffer> {
        let rect = monitor.capture_rect();
        tracing::debug!(
            index = monitor.index,
            name = %monitor.name,
            rect = %rect,
            primary = monitor.primary,
            "Capturing monitor"
        );
        self.capture_region(rect)
    }
}

impl Capturer for NativeCapturer {
    fn name(&self) -> &str {
        "native"
    }

    fn capture(&self, scope: CaptureScope) -> ShotResult<Vec<PixelBuffer>> {
        match scope {
            CaptureScope::Primary => {
                let rect = self.primary_rect()?;
                Ok(vec![self.capture_region(rect)?])
            }
            CaptureScope::AllMonitors => list_monitors(self.source())?
                .iter()
                .map(|monitor| self.capture_monitor(monitor))
                .collect(),
        }
    }
}

/// A display source that always reports capture as unavailable.
#[derive(Debug, Clone)]
pub struct UnavailableDisplay {
    reason: String,
}

impl UnavailableDisplay {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl DisplaySource for UnavailableDisplay {
    fn monitors(&self) -> ShotResult<Vec<MonitorInfo>> {
        Err(ShotError::capture_unavailable(self.reason.clone()))
    }

    fn capture_region(&self, _rect: Rect) -> ShotResult<PixelBuffer> {
        Err(ShotError::capture_unavailable(self.reason.clone()))
    }
}
