//! Error types shared across Panoshot crates.

use std::path::PathBuf;

/// Top-level error type for Panoshot operations.
#[derive(Debug, thiserror::Error)]
pub enum ShotError {
    #[error("Monitor enumeration failed: {message}")]
    Enumeration { message: String },

    #[error("Native capture unavailable: {message}")]
    CaptureUnavailable { message: String },

    #[error("External tool '{tool}' could not be started")]
    ExternalToolNotFound {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External tool '{tool}' produced none of the expected outputs: {expected:?}")]
    ExternalToolOutputMissing { tool: String, expected: Vec<PathBuf> },

    #[error("Composition error: {message}")]
    Composition { message: String },

    #[error("Invalid image: {message}")]
    InvalidImage { message: String },

    #[error("Failed to decode {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image")]
    Encode(#[source] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using ShotError.
pub type ShotResult<T> = Result<T, ShotError>;

/// Coarse classification of a [`ShotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Enumeration,
    CaptureUnavailable,
    ExternalToolNotFound,
    ExternalToolOutputMissing,
    Composition,
    Image,
    Io,
}

impl ShotError {
    pub fn enumeration(msg: impl Into<String>) -> Self {
        Self::Enumeration {
            message: msg.into(),
        }
    }

    pub fn capture_unavailable(msg: impl Into<String>) -> Self {
        Self::CaptureUnavailable {
            message: msg.into(),
        }
    }

    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition {
            message: msg.into(),
        }
    }

    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Enumeration { .. } => ErrorKind::Enumeration,
            Self::CaptureUnavailable { .. } => ErrorKind::CaptureUnavailable,
            Self::ExternalToolNotFound { .. } => ErrorKind::ExternalToolNotFound,
            Self::ExternalToolOutputMissing { .. } => ErrorKind::ExternalToolOutputMissing,
            Self::Composition { .. } => ErrorKind::Composition,
            Self::InvalidImage { .. } | Self::Decode { .. } | Self::Encode(_) => ErrorKind::Image,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the orchestrator may recover by switching to the external-tool path.
    pub fn is_fallback_trigger(&self) -> bool {
        self.kind() == ErrorKind::CaptureUnavailable
    }
}
