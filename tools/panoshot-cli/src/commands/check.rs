//! Check capture capabilities.

use panoshot_capture_engine::backend::{default_display_source, NATIVE_CAPTURE_COMPILED};
use panoshot_capture_engine::enumerate::list_monitors;
use panoshot_capture_engine::probe::{check_capabilities, print_capability_report, probe_fallback_tool};
use panoshot_common::config::CaptureDefaults;
use panoshot_platform_core::{detect_display_server, virtual_desktop_bounds};

pub fn run(defaults: &CaptureDefaults) -> anyhow::Result<()> {
    println!("Panoshot System Check");
    println!("{}", "=".repeat(50));

    println!("Display server: {}", detect_display_server());
    println!("Default strategy: {:?}", defaults.strategy);

    if NATIVE_CAPTURE_COMPILED {
        println!("[OK] Native capture compiled in (xcap)");
    } else {
        println!("[WARN] Native capture compiled out; captures use the fallback tool");
    }

    let source = default_display_source();
    match list_monitors(source.as_ref()) {
        Ok(monitors) => {
            println!("[OK] Monitors detected: {}", monitors.len());
            for m in &monitors {
                println!(
                    "     #{} {} {} (scale: {}x) {}",
                    m.index,
                    m.name,
                    m.capture_rect(),
                    m.scale_factor,
                    if m.primary { "(primary)" } else { "" }
                );
            }
            if let Some(desktop) = virtual_desktop_bounds(&monitors) {
                println!("     Virtual desktop: {desktop}");
            }
        }
        Err(e) => println!("[WARN] Monitors unavailable: {e}"),
    }

    match probe_fallback_tool() {
        Some(tool) => println!("[OK] Fallback tool: {}", tool.program),
        None => println!("[WARN] No fallback tool found"),
    }

    let capabilities = check_capabilities(source.as_ref());
    println!();
    print_capability_report(&capabilities);

    let all_required_ok = capabilities
        .iter()
        .filter(|c| c.required)
        .all(|c| c.available);

    println!();
    if all_required_ok {
        println!("All required capabilities are available. Panoshot is ready.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
    }

    Ok(())
}
