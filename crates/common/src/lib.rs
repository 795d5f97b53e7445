//! Panoshot Common Utilities
//!
//! Shared infrastructure for all Panoshot crates:
//! - Error taxonomy and result aliases
//! - Scratch file handling in the temp directory
//! - Tracing/logging setup
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod scratch;

pub use config::*;
pub use error::*;
pub use scratch::*;
