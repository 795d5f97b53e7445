//! Top-level capture orchestration.
//!
//! The orchestrator picks a capture strategy, captures one or all monitors,
//! composites them into a single image, and optionally encodes the result and
//! writes it to a destination file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use panoshot_common::config::{CaptureDefaults, CaptureStrategy, OutputFormat};
use panoshot_common::error::{ShotError, ShotResult};
use panoshot_common::scratch::temp_dir;
use panoshot_platform_core::{select_primary, virtual_desktop_bounds, MonitorInfo};
use tracing::Dispatch;

use crate::backend::{
    default_display_source, CaptureScope, Capturer, ExternalToolCapturer, NativeCapturer,
    ToolSpec,
};
use crate::buffer::PixelBuffer;
use crate::compositor::composite;
use crate::encode::{encode, Encoding};
use crate::probe::probe_fallback_tool;

/// One capture call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Capture only the primary monitor.
    pub only_primary_monitor: bool,
    /// Where to write the encoded image; `None` keeps it in memory only.
    pub destination: Option<PathBuf>,
}

/// The single encoded image produced by a capture.
#[derive(Debug, Clone)]
pub struct EncodedCapture {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub encoding: Encoding,
    /// Name of the capturer that produced the pixels.
    pub captured_by: String,
    pub captured_at: DateTime<Utc>,
    /// Destination the bytes were written to, if any.
    pub destination: Option<PathBuf>,
}

/// Coordinates native capture, external-tool fallback, compositing and encoding.
pub struct CaptureOrchestrator {
    native: NativeCapturer,
    fallback: Option<ExternalToolCapturer>,
    scratch_dir: PathBuf,
    max_external_outputs: usize,
    format: OutputFormat,
    logger: Dispatch,
}

impl CaptureOrchestrator {
    /// Build an orchestrator for this machine.
    ///
    /// The fallback tool is probed once here.
    pub fn new(defaults: &CaptureDefaults) -> Self {
        let scratch_dir = defaults.temp_dir.clone().unwrap_or_else(temp_dir);
        let fallback = probe_fallback_tool().map(|tool| {
            ExternalToolCapturer::new(tool, scratch_dir.clone(), defaults.max_external_outputs)
        });
        Self::with_capturers(
            NativeCapturer::new(default_display_source()),
            fallback,
            defaults,
        )
    }

    /// Build an orchestrator from explicit capturers.
    pub fn with_capturers(
        native: NativeCapturer,
        fallback: Option<ExternalToolCapturer>,
        defaults: &CaptureDefaults,
    ) -> Self {
        Self {
            native,
            fallback,
            scratch_dir: defaults.temp_dir.clone().unwrap_or_else(temp_dir),
            max_external_outputs: defaults.max_external_outputs,
            format: defaults.format,
            logger: Dispatch::none(),
        }
    }

    /// Route this orchestrator's diagnostics to `logger`.
    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = logger;
        self
    }

    pub fn native(&self) -> &NativeCapturer {
        &self.native
    }

    pub fn fallback(&self) -> Option<&ExternalToolCapturer> {
        self.fallback.as_ref()
    }

    /// Capture the screen with native capture, falling back to the external tool.
    pub fn take_screenshot(&self, only_primary: bool) -> ShotResult<PixelBuffer> {
        tracing::dispatcher::with_default(&self.logger, || {
            self.capture_with(CaptureStrategy::Auto, only_primary)
                .map(|(buffer, _)| buffer)
        })
    }

    /// Capture, encode, and optionally write the result to the request's destination.
    pub fn get_capture(
        &self,
        strategy: CaptureStrategy,
        request: &CaptureRequest,
    ) -> ShotResult<EncodedCapture> {
        tracing::dispatcher::with_default(&self.logger, || {
            let captured_at = Utc::now();
            let (buffer, captured_by) =
                self.capture_with(strategy, request.only_primary_monitor)?;
            let (bytes, encoding) = encode(&buffer, self.format)?;

            if let Some(path) = &request.destination {
                write_destination(path, &bytes)?;
                tracing::info!(path = %path.display(), bytes = bytes.len(), "Capture written");
            }

            Ok(EncodedCapture {
                bytes,
                width: buffer.width(),
                height: buffer.height(),
                encoding,
                captured_by,
                captured_at,
                destination: request.destination.clone(),
            })
        })
    }

    fn capture_with(
        &self,
        strategy: CaptureStrategy,
        only_primary: bool,
    ) -> ShotResult<(PixelBuffer, String)> {
        let scope = CaptureScope::from_only_primary(only_primary);
        tracing::info!(?strategy, ?scope, "Starting capture");

        match strategy {
            CaptureStrategy::Auto => match run(&self.native, scope) {
                Err(err) if err.is_fallback_trigger() => {
                    let Some(fallback) = &self.fallback else {
                        tracing::warn!(error = %err, "Native capture unavailable and no fallback tool");
                        return Err(err);
                    };
                    tracing::warn!(
                        error = %err,
                        tool = %fallback.tool().program,
                        "Native capture unavailable; falling back to external tool"
                    );
                    self.run_external(fallback, scope)
                }
                other => other,
            },
            CaptureStrategy::Native => run(&self.native, scope),
            CaptureStrategy::Screencapture => {
                self.run_external(&self.external(ToolSpec::screencapture()), scope)
            }
            CaptureStrategy::ImageMagick => {
                self.run_external(&self.external(ToolSpec::imagemagick()), scope)
            }
        }
    }

    /// Run an external tool, fitting its output to the monitor geometry when
    /// the native source can still report it.
    ///
    /// Per-display outputs are put in left-to-right order before compositing,
    /// and a whole-desktop image is cropped to the primary monitor when the
    /// tool cannot restrict itself.
    fn run_external(
        &self,
        capturer: &ExternalToolCapturer,
        scope: CaptureScope,
    ) -> ShotResult<(PixelBuffer, String)> {
        let buffers = capturer.capture(scope)?;
        let monitors = match self.native.source().monitors() {
            Ok(monitors) => monitors,
            Err(err) => {
                tracing::debug!(error = %err, "No monitor geometry; keeping tool output as-is");
                Vec::new()
            }
        };

        let buffer = match scope {
            CaptureScope::Primary => {
                let buffer = first(buffers)?;
                if capturer.tool().primary_flag.is_none() {
                    crop_to_primary(buffer, &monitors)?
                } else {
                    buffer
                }
            }
            CaptureScope::AllMonitors => composite(order_tool_outputs(buffers, &monitors))?,
        };
        Ok(finish(capturer, buffer))
    }

    fn external(&self, tool: ToolSpec) -> ExternalToolCapturer {
        ExternalToolCapturer::new(tool, self.scratch_dir.clone(), self.max_external_outputs)
    }
}

fn run(capturer: &dyn Capturer, scope: CaptureScope) -> ShotResult<(PixelBuffer, String)> {
    let buffers = capturer.capture(scope)?;
    let buffer = match scope {
        CaptureScope::Primary => first(buffers)?,
        CaptureScope::AllMonitors => composite(buffers)?,
    };
    Ok(finish(capturer, buffer))
}

fn first(buffers: Vec<PixelBuffer>) -> ShotResult<PixelBuffer> {
    buffers
        .into_iter()
        .next()
        .ok_or_else(|| ShotError::composition("capturer returned no image"))
}

fn finish(capturer: &dyn Capturer, buffer: PixelBuffer) -> (PixelBuffer, String) {
    tracing::info!(
        capturer = capturer.name(),
        width = buffer.width(),
        height = buffer.height(),
        "Capture complete"
    );
    (buffer, capturer.name().to_string())
}

/// Reorder per-display tool outputs left to right.
///
/// `monitors` is in platform order. Multi-display tools write the primary
/// display first and the rest in platform order. The tool's order is kept
/// when the output count does not match the monitor count.
fn order_tool_outputs(buffers: Vec<PixelBuffer>, monitors: &[MonitorInfo]) -> Vec<PixelBuffer> {
    if buffers.len() < 2 || buffers.len() != monitors.len() {
        return buffers;
    }
    let Some(primary) = select_primary(monitors) else {
        return buffers;
    };

    let lefts = std::iter::once(primary).chain(
        monitors
            .iter()
            .filter(|monitor| !std::ptr::eq(*monitor, primary)),
    );
    let mut placed: Vec<(i32, PixelBuffer)> = lefts
        .map(|monitor| monitor.bounds.x)
        .zip(buffers)
        .collect();
    placed.sort_by_key(|(left, _)| *left);
    placed.into_iter().map(|(_, buffer)| buffer).collect()
}

/// Cut the primary monitor out of a whole-desktop image.
///
/// The image is returned unchanged when no geometry is known or its size
/// does not match the virtual desktop.
fn crop_to_primary(buffer: PixelBuffer, monitors: &[MonitorInfo]) -> ShotResult<PixelBuffer> {
    let (Some(desktop), Some(primary)) = (virtual_desktop_bounds(monitors), select_primary(monitors))
    else {
        return Ok(buffer);
    };
    if buffer.dimensions() != (desktop.width, desktop.height) {
        tracing::debug!(
            desktop = %desktop,
            width = buffer.width(),
            height = buffer.height(),
            "Tool output does not match the desktop; not cropping"
        );
        return Ok(buffer);
    }

    let rect = primary.bounds;
    buffer.crop(
        rect.x.abs_diff(desktop.x),
        rect.y.abs_diff(desktop.y),
        rect.width,
        rect.height,
    )
}

/// Write `bytes` to `path`, removing any partial file on failure.
fn write_destination(path: &Path, bytes: &[u8]) -> ShotResult<()> {
    if let Err(err) = std::fs::write(path, bytes) {
        if path.is_file() {
            remove_partial(path);
        }
        return Err(err.into());
    }
    Ok(())
}

/// Remove a partially written file. Failures are logged, not returned.
fn remove_partial(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Failed to remove partial capture file"
            );
            false
        }
    }
}
