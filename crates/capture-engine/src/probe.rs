//! Capability detection for native and external capture.

use std::process::{Command, Stdio};

use panoshot_platform_core::{detect_display_server, DisplayServer};

use crate::backend::{DisplaySource, ToolSpec, NATIVE_CAPTURE_COMPILED};
use crate::enumerate::list_monitors;

/// Whether `binary` resolves on the current PATH.
pub fn command_exists(binary: &str) -> bool {
    let status = if cfg!(target_os = "windows") {
        Command::new("where")
            .arg(binary)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
    } else {
        Command::new("sh")
            .arg("-c")
            .arg(format!("command -v {binary} >/dev/null 2>&1"))
            .status()
    };
    status.map(|status| status.success()).unwrap_or(false)
}

/// The external tool native capture falls back to on this machine, if any.
pub fn probe_fallback_tool() -> Option<ToolSpec> {
    let candidate = if cfg!(target_os = "macos") {
        ToolSpec::screencapture()
    } else {
        ToolSpec::imagemagick()
    };

    if command_exists(&candidate.program) {
        tracing::debug!(program = %candidate.program, "Fallback capture tool available");
        Some(candidate)
    } else {
        tracing::debug!(program = %candidate.program, "Fallback capture tool not found");
        None
    }
}

/// A system capability Panoshot may use.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all capture capabilities.
pub fn check_capabilities(source: &dyn DisplaySource) -> Vec<Capability> {
    vec![
        check_display_session(),
        check_native_capture(source),
        check_tool(&ToolSpec::screencapture(), "macOS screencapture utility"),
        check_tool(&ToolSpec::imagemagick(), "ImageMagick root-window capture"),
    ]
}

fn check_display_session() -> Capability {
    let server = detect_display_server();
    let available = server != DisplayServer::Unknown;

    Capability {
        name: "Display Session".to_string(),
        description: format!("Graphical session ({server})"),
        available,
        required: true,
        fix_instructions: if available {
            None
        } else {
            Some("Run inside a graphical desktop session (DISPLAY or WAYLAND_DISPLAY)".to_string())
        },
    }
}

fn check_native_capture(source: &dyn DisplaySource) -> Capability {
    let probe = list_monitors(source);

    Capability {
        name: "Native Capture".to_string(),
        description: match &probe {
            Ok(monitors) => format!("Desktop capture API ({} monitors)", monitors.len()),
            Err(_) => "Desktop capture API".to_string(),
        },
        available: probe.is_ok(),
        required: false,
        fix_instructions: probe.err().map(|e| {
            if NATIVE_CAPTURE_COMPILED {
                format!("{e}; grant screen recording access")
            } else {
                format!("{e}; rebuild with the `native` feature")
            }
        }),
    }
}

fn check_tool(tool: &ToolSpec, description: &str) -> Capability {
    let available = command_exists(&tool.program);

    Capability {
        name: format!("External Tool: {}", tool.program),
        description: description.to_string(),
        available,
        required: false,
        fix_instructions: if available {
            None
        } else {
            Some(format!("Install `{}` and make sure it is on PATH", tool.program))
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("Panoshot Capture Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
