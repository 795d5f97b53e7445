#![cfg(unix)]

use image::Rgba;
use panoshot_capture_engine::backend::{ToolOutput, ToolSpec};
use panoshot_capture_engine::{CaptureScope, Capturer};
use panoshot_common::error::ShotError;
use panoshot_common::scratch::ScratchFile;

mod support;
use support::{copy_tool, dir_entries, external, shell_tool, write_png};

const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

#[test]
fn reads_back_output_and_removes_scratch_files() {
    let fixtures = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let fixture = fixtures.path().join("screen.png");
    write_png(&fixture, 40, 30, BLUE);

    let capturer = external(copy_tool(&fixture), scratch.path(), 1);
    let buffers = capturer.capture(CaptureScope::Primary).unwrap();

    assert_eq!(buffers.len(), 1);
    assert_eq!(buffers[0].dimensions(), (40, 30));
    assert_eq!(buffers[0].pixel(0, 0), BLUE);
    assert!(dir_entries(scratch.path()).is_empty());
}

#[test]
fn missing_per_monitor_outputs_are_skipped() {
    let fixtures = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let first = fixtures.path().join("first.png");
    let third = fixtures.path().join("third.png");
    write_png(&first, 10, 10, BLUE);
    write_png(&third, 6, 12, YELLOW);

    // Writes outputs 1 and 3 of 4; outputs 2 and 4 never appear.
    let script = format!(
        "cp '{}' \"$1\" && cp '{}' \"$3\"",
        first.display(),
        third.display()
    );
    let capturer = external(shell_tool(&script), scratch.path(), 4);
    let buffers = capturer.capture(CaptureScope::AllMonitors).unwrap();

    let sizes: Vec<_> = buffers.iter().map(|b| b.dimensions()).collect();
    assert_eq!(sizes, [(10, 10), (6, 12)]);
    assert!(dir_entries(scratch.path()).is_empty());
}

#[test]
fn no_output_at_all_is_an_error() {
    let scratch = tempfile::tempdir().unwrap();
    let capturer = external(shell_tool("exit 1"), scratch.path(), 3);

    let err = capturer.capture(CaptureScope::AllMonitors).unwrap_err();
    match err {
        ShotError::ExternalToolOutputMissing { tool, expected } => {
            assert_eq!(tool, "sh");
            assert_eq!(expected.len(), 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn scratch_files_are_removed_when_decoding_fails() {
    let scratch = tempfile::tempdir().unwrap();
    let capturer = external(
        shell_tool("echo 'not an image' > \"$1\"; echo 'still not' > \"$2\""),
        scratch.path(),
        2,
    );

    let err = capturer.capture(CaptureScope::AllMonitors).unwrap_err();
    assert!(matches!(err, ShotError::Decode { .. }));
    assert!(dir_entries(scratch.path()).is_empty());
}

#[test]
fn primary_flag_is_passed_only_for_primary_captures() {
    let fixtures = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let primary = fixtures.path().join("primary.png");
    let everything = fixtures.path().join("everything.png");
    write_png(&primary, 4, 4, BLUE);
    write_png(&everything, 8, 4, YELLOW);

    // With the flag the output is `$2`, without it `$1`.
    let script = format!(
        "if [ \"$1\" = --main ]; then cp '{}' \"$2\"; else cp '{}' \"$1\"; fi",
        primary.display(),
        everything.display()
    );
    let tool = ToolSpec {
        args: vec![
            "-c".to_string(),
            script,
            "fake-tool".to_string(),
            "{primary_flag}".to_string(),
            "{outputs}".to_string(),
        ],
        primary_flag: Some("--main".to_string()),
        multi_output: false,
        ..shell_tool("")
    };
    let capturer = external(tool, scratch.path(), 1);

    let primary_shot = capturer.capture(CaptureScope::Primary).unwrap();
    assert_eq!(primary_shot[0].dimensions(), (4, 4));
    let full_shot = capturer.capture(CaptureScope::AllMonitors).unwrap();
    assert_eq!(full_shot[0].dimensions(), (8, 4));
}

#[test]
fn caller_destination_is_kept_and_scratch_is_removed() {
    let fixtures = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let fixture = fixtures.path().join("screen.png");
    write_png(&fixture, 3, 3, BLUE);
    let destination = fixtures.path().join("kept.png");

    let script = format!("cp '{0}' \"$1\" && cp '{0}' \"$2\"", fixture.display());
    let capturer = external(shell_tool(&script), scratch.path(), 2);
    let outputs = [
        ToolOutput::Destination(destination.clone()),
        ToolOutput::Scratch(ScratchFile::new_in(scratch.path(), "png")),
    ];

    let buffers = capturer.run(&outputs, false).unwrap();
    assert_eq!(buffers.len(), 2);
    drop(outputs);

    assert!(destination.exists());
    assert!(dir_entries(scratch.path()).is_empty());
}
