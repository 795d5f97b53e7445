use panoshot_common::error::ShotResult;
use panoshot_platform_core::{MonitorInfo, Rect};

use crate::buffer::PixelBuffer;

/// Platform access needed by the native capture path.
pub trait DisplaySource {
    /// Raw monitor list as reported by the platform, in any order.
    fn monitors(&self) -> ShotResult<Vec<MonitorInfo>>;

    /// Copy exactly `rect` (absolute virtual desktop coordinates) into a buffer.
    ///
    /// Fails with `CaptureUnavailable` when the screen cannot be read.
    fn capture_region(&self, rect: Rect) -> ShotResult<PixelBuffer>;

    /// A rectangle to use for primary-only capture when enumeration fails.
    fn best_effort_primary(&self) -> Option<Rect> {
        None
    }
}

impl<T: DisplaySource + ?Sized> DisplaySource for std::sync::Arc<T> {
    fn monitors(&self) -> ShotResult<Vec<MonitorInfo>> {
        (**self).monitors()
    }

    fn capture_region(&self, rect: Rect) -> ShotResult<PixelBuffer> {
        (**self).capture_region(rect)
    }

    fn best_effort_primary(&self) -> Option<Rect> {
        (**self).best_effort_primary()
    }
}

/// Which monitors a capture covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureScope {
    /// The primary monitor only; never composited.
    Primary,
    /// Every monitor, left to right.
    AllMonitors,
}

impl CaptureScope {
    pub fn from_only_primary(only_primary: bool) -> Self {
        if only_primary {
            CaptureScope::Primary
        } else {
            CaptureScope::AllMonitors
        }
    }
}

/// A strategy that produces per-monitor buffers in left-to-right order.
pub trait Capturer {
    /// Short name used in logs and results.
    fn name(&self) -> &str;

    fn capture(&self, scope: CaptureScope) -> ShotResult<Vec<PixelBuffer>>;
}

pub mod external;
pub mod native;
#[cfg(feature = "native")]
pub mod xcap_display;

pub use external::{ExternalToolCapturer, ToolOutput, ToolSpec};
pub use native::{NativeCapturer, UnavailableDisplay};

/// Whether this build includes the xcap display source.
pub const NATIVE_CAPTURE_COMPILED: bool = cfg!(feature = "native");

/// The display source for this build: xcap when the `native` feature is on.
pub fn default_display_source() -> Box<dyn DisplaySource> {
    #[cfg(feature = "native")]
    {
        Box::new(xcap_display::XcapDisplay)
    }
    #[cfg(not(feature = "native"))]
    {
        Box::new(UnavailableDisplay::new(
            "built without the `native` feature",
        ))
    }
}
