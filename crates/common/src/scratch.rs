//! Scratch files for external capture tools.
//!
//! Scratch files live in the temp directory (`TEMP`, then `TMPDIR`, then the
//! platform default) and are removed when their guard is dropped.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolve the directory used for scratch files.
pub fn temp_dir() -> PathBuf {
    resolve_temp_dir(std::env::var_os("TEMP"), std::env::var_os("TMPDIR"))
}

fn resolve_temp_dir(temp: Option<OsString>, tmpdir: Option<OsString>) -> PathBuf {
    temp.or(tmpdir)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// A uniquely named file path that is deleted on drop.
///
/// The file itself is not created; an external tool is expected to write it.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Reserve a new scratch path `panoshot_<uuid>.<extension>` in `dir`.
    pub fn new_in(dir: &Path, extension: &str) -> Self {
        let token = uuid::Uuid::new_v4().simple();
        Self {
            path: dir.join(format!("panoshot_{token}.{extension}")),
        }
    }

    /// Reserve a new scratch path in the resolved temp directory.
    pub fn new(extension: &str) -> Self {
        Self::new_in(&temp_dir(), extension)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed scratch file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove scratch file"
            ),
        }
    }
}
