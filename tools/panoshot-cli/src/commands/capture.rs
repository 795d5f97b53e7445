//! Capture the screen to a file.

use std::path::PathBuf;

use anyhow::Context;
use panoshot_capture_engine::{CaptureOrchestrator, CaptureRequest};
use panoshot_common::config::CaptureDefaults;
use tracing::Dispatch;

pub fn run(
    defaults: &CaptureDefaults,
    file: PathBuf,
    only_primary: bool,
    logger: Dispatch,
) -> anyhow::Result<()> {
    let orchestrator = CaptureOrchestrator::new(defaults).with_logger(logger);
    let request = CaptureRequest {
        only_primary_monitor: only_primary,
        destination: Some(file.clone()),
    };

    let capture = orchestrator
        .get_capture(defaults.strategy, &request)
        .with_context(|| format!("failed to capture screen to {}", file.display()))?;

    println!(
        "Saved {}x{} capture to {} ({} bytes, {})",
        capture.width,
        capture.height,
        file.display(),
        capture.bytes.len(),
        capture.captured_by
    );
    Ok(())
}
