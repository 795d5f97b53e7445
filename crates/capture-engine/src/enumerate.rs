//! Monitor enumeration in left-to-right order.

use panoshot_common::error::{ShotError, ShotResult};
use panoshot_platform_core::{select_primary, sort_left_to_right, MonitorInfo};

use crate::backend::DisplaySource;

/// List monitors sorted by left edge, with ordinal indices assigned.
///
/// Geometry is queried from the source on every call.
pub fn list_monitors(source: &dyn DisplaySource) -> ShotResult<Vec<MonitorInfo>> {
    let mut monitors = source.monitors()?;
    if monitors.is_empty() {
        return Err(ShotError::enumeration("platform reported zero monitors"));
    }
    sort_left_to_right(&mut monitors);
    tracing::debug!(count = monitors.len(), "Enumerated monitors");
    Ok(monitors)
}

/// The primary monitor.
pub fn primary_monitor(source: &dyn DisplaySource) -> ShotResult<MonitorInfo> {
    let monitors = list_monitors(source)?;
    select_primary(&monitors)
        .cloned()
        .ok_or_else(|| ShotError::enumeration("no primary monitor"))
}
