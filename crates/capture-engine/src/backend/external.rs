//! Capture through an external screenshot program.
//!
//! The tool is spawned with its argument template expanded, the call blocks
//! until it exits, and every output file it produced is decoded in order.
//! Outputs the tool did not write are skipped; only an empty result is an
//! error.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use panoshot_common::error::{ShotError, ShotResult};
use panoshot_common::scratch::ScratchFile;

use crate::backend::{CaptureScope, Capturer};
use crate::buffer::PixelBuffer;

/// Template token replaced by the tool's primary-only flag.
pub const PRIMARY_FLAG_TOKEN: &str = "{primary_flag}";
/// Template token replaced by one argument per output path.
pub const OUTPUTS_TOKEN: &str = "{outputs}";

/// How to invoke one external screenshot tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Executable name or path.
    pub program: String,
    /// Argument template; see [`PRIMARY_FLAG_TOKEN`] and [`OUTPUTS_TOKEN`].
    pub args: Vec<String>,
    /// Flag restricting the tool to the primary display, if it has one.
    pub primary_flag: Option<String>,
    /// Whether the tool writes one file per display.
    pub multi_output: bool,
    /// Extension of the files the tool writes.
    pub extension: String,
}

impl ToolSpec {
    /// macOS `screencapture`: no delay, PNG, no sound, one file per display.
    pub fn screencapture() -> Self {
        Self {
            program: "screencapture".to_string(),
            args: [PRIMARY_FLAG_TOKEN, "-T0", "-tpng", "-S", "-x", OUTPUTS_TOKEN]
                .map(String::from)
                .to_vec(),
            primary_flag: Some("-m".to_string()),
            multi_output: true,
            extension: "png".to_string(),
        }
    }

    /// ImageMagick `import` of the X11 root window.
    pub fn imagemagick() -> Self {
        Self {
            program: "import".to_string(),
            args: ["-window", "root", OUTPUTS_TOKEN]
                .map(String::from)
                .to_vec(),
            primary_flag: None,
            multi_output: false,
            extension: "png".to_string(),
        }
    }

    /// Expand the argument template for one invocation.
    pub fn expand_args(&self, outputs: &[&Path], only_primary: bool) -> Vec<OsString> {
        let mut expanded = Vec::with_capacity(self.args.len() + outputs.len());
        for arg in &self.args {
            match arg.as_str() {
                PRIMARY_FLAG_TOKEN => {
                    if let (true, Some(flag)) = (only_primary, &self.primary_flag) {
                        expanded.push(OsString::from(flag));
                    }
                }
                OUTPUTS_TOKEN => {
                    expanded.extend(outputs.iter().map(|p| p.as_os_str().to_os_string()))
                }
                other => expanded.push(OsString::from(other)),
            }
        }
        expanded
    }

    /// How many output paths to offer the tool for one capture.
    pub fn output_count(&self, scope: CaptureScope, max_outputs: usize) -> usize {
        match scope {
            CaptureScope::AllMonitors if self.multi_output => max_outputs.max(1),
            _ => 1,
        }
    }
}

/// A file the tool is asked to write.
#[derive(Debug)]
pub enum ToolOutput {
    /// Temporary file, removed when dropped.
    Scratch(ScratchFile),
    /// Caller-owned path, left in place.
    Destination(PathBuf),
}

impl ToolOutput {
    pub fn path(&self) -> &Path {
        match self {
            ToolOutput::Scratch(scratch) => scratch.path(),
            ToolOutput::Destination(path) => path,
        }
    }
}

/// Runs an external tool and reads back its screenshots.
#[derive(Debug, Clone)]
pub struct ExternalToolCapturer {
    tool: ToolSpec,
    scratch_dir: PathBuf,
    max_outputs: usize,
}

impl ExternalToolCapturer {
    pub fn new(tool: ToolSpec, scratch_dir: PathBuf, max_outputs: usize) -> Self {
        Self {
            tool,
            scratch_dir,
            max_outputs,
        }
    }

    pub fn tool(&self) -> &ToolSpec {
        &self.tool
    }

    /// Invoke the tool writing to `outputs` and decode what it produced.
    pub fn run(&self, outputs: &[ToolOutput], only_primary: bool) -> ShotResult<Vec<PixelBuffer>> {
        let paths: Vec<&Path> = outputs.iter().map(ToolOutput::path).collect();
        let args = self.tool.expand_args(&paths, only_primary);
        tracing::debug!(program = %self.tool.program, ?args, "Running external capture tool");

        let output = Command::new(&self.tool.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ShotError::ExternalToolNotFound {
                tool: self.tool.program.clone(),
                source,
            })?;

        if !output.status.success() {
            tracing::warn!(
                program = %self.tool.program,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "External capture tool exited unsuccessfully"
            );
        }

        let mut buffers = Vec::with_capacity(paths.len());
        for path in &paths {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "Tool output not produced; skipping");
                continue;
            }
            buffers.push(decode_file(path)?);
        }

        if buffers.is_empty() {
            return Err(ShotError::ExternalToolOutputMissing {
                tool: self.tool.program.clone(),
                expected: paths.iter().map(|p| p.to_path_buf()).collect(),
            });
        }

        tracing::info!(
            program = %self.tool.program,
            produced = buffers.len(),
            requested = paths.len(),
            "External capture finished"
        );
        Ok(buffers)
    }
}

impl Capturer for ExternalToolCapturer {
    fn name(&self) -> &str {
        &self.tool.program
    }

    fn capture(&self, scope: CaptureScope) -> ShotResult<Vec<PixelBuffer>> {
        let outputs: Vec<ToolOutput> = (0..self.tool.output_count(scope, self.max_outputs))
            .map(|_| ToolOutput::Scratch(ScratchFile::new_in(&self.scratch_dir, &self.tool.extension)))
            .collect();
        self.run(&outputs, scope == CaptureScope::Primary)
    }
}

fn decode_file(path: &Path) -> ShotResult<PixelBuffer> {
    let image = image::open(path).map_err(|source| ShotError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    PixelBuffer::new(image.to_rgba8())
}
