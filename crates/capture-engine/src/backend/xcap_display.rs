//! Native display access through xcap.

use panoshot_common::error::{ShotError, ShotResult};
use panoshot_platform_core::{MonitorInfo, Rect};
use xcap::{Monitor, XCapError};

use crate::backend::DisplaySource;
use crate::buffer::PixelBuffer;

/// Reads monitors and pixels from the running desktop session.
#[derive(Debug, Clone, Copy, Default)]
pub struct XcapDisplay;

fn unavailable(err: XCapError) -> ShotError {
    ShotError::capture_unavailable(err.to_string())
}

fn bounds_of(monitor: &Monitor) -> ShotResult<Rect> {
    Ok(Rect::new(
        monitor.x().map_err(unavailable)?,
        monitor.y().map_err(unavailable)?,
        monitor.width().map_err(unavailable)?,
        monitor.height().map_err(unavailable)?,
    ))
}

fn describe(monitor: &Monitor) -> ShotResult<MonitorInfo> {
    let platform_id = monitor.id().map_err(unavailable)?;
    Ok(MonitorInfo {
        index: 0,
        platform_id,
        name: monitor
            .name()
            .unwrap_or_else(|_| format!("monitor-{platform_id}")),
        bounds: bounds_of(monitor)?,
        // xcap does not report a work area.
        work_area: None,
        scale_factor: monitor.scale_factor().map(f64::from).unwrap_or(1.0),
        primary: monitor.is_primary().unwrap_or(false),
    })
}

impl DisplaySource for XcapDisplay {
    fn monitors(&self) -> ShotResult<Vec<MonitorInfo>> {
        Monitor::all()
            .map_err(unavailable)?
            .iter()
            .map(describe)
            .collect()
    }

    fn capture_region(&self, rect: Rect) -> ShotResult<PixelBuffer> {
        let monitors = Monitor::all().map_err(unavailable)?;
        let mut target = None;
        for monitor in monitors {
            let bounds = bounds_of(&monitor)?;
            if bounds.contains(rect.x, rect.y) {
                target = Some((monitor, bounds));
                break;
            }
        }
        let (monitor, bounds) = target.ok_or_else(|| {
            ShotError::capture_unavailable(format!("no monitor contains region {rect}"))
        })?;

        let image = if bounds == rect {
            monitor.capture_image()
        } else {
            monitor.capture_region(
                (rect.x - bounds.x) as u32,
                (rect.y - bounds.y) as u32,
                rect.width,
                rect.height,
            )
        }
        .map_err(unavailable)?;

        PixelBuffer::new(image)
    }

    fn best_effort_primary(&self) -> Option<Rect> {
        let monitor = Monitor::from_point(0, 0).ok()?;
        bounds_of(&monitor).ok()
    }
}
