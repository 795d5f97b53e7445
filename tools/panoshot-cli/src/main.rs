//! Panoshot CLI — capture one or all monitors into a single image.
//!
//! Usage:
//!   panoshot --file <PATH> [--all <BOOL>]   Capture to a file
//!   panoshot --check                        Check capture capabilities
//!
//! Exit codes: 0 success, 2 usage error (including a missing `--file`),
//! 3 capture failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use panoshot_common::config::{AppConfig, CaptureStrategy, OutputFormat};

mod commands;

/// Exit code for any failure after argument parsing.
const EXIT_FAILURE: u8 = 3;

#[derive(Parser)]
#[command(
    name = "panoshot",
    about = "Capture all monitors, or only the primary one, into a single image",
    version,
    author
)]
struct Cli {
    /// Capture all monitors; `false` captures only the primary monitor
    #[arg(long, value_name = "BOOL")]
    all: Option<bool>,

    /// Output image path
    #[arg(long, value_name = "PATH", required_unless_present = "check")]
    file: Option<PathBuf>,

    /// Capture strategy: auto|native|screencapture|imagemagick
    #[arg(long)]
    strategy: Option<CaptureStrategy>,

    /// Output format: jpeg|png
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Report monitors and capture capabilities, then exit
    #[arg(long)]
    check: bool,

    /// Path to a config file (defaults to the standard location)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> ExitCode {
    // clap exits with code 2 on usage errors.
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    let logger = panoshot_common::logging::build_dispatch(&config.logging);

    let result = tracing::dispatcher::with_default(&logger, || {
        if cli.check {
            return commands::check::run(&config.capture);
        }

        if let Some(strategy) = cli.strategy {
            config.capture.strategy = strategy;
        }
        if let Some(format) = cli.format {
            config.capture.format = format;
        }
        let only_primary = cli.all.map(|all| !all).unwrap_or(config.capture.only_primary);
        let file = cli
            .file
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--file is required"))?;

        commands::capture::run(&config.capture, file, only_primary, logger.clone())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("panoshot: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
