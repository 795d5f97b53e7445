//! Panoshot Capture Engine
//!
//! Captures one or all monitors into a single image. Native capture copies
//! each monitor's region; when the platform refuses, an external screenshot
//! tool is run instead. Per-monitor captures are stitched left to right.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             CaptureOrchestrator               │
//! │  ┌────────────────┐   ┌────────────────────┐  │
//! │  │ NativeCapturer │──▶│ExternalToolCapturer│  │
//! │  │ (DisplaySource)│ fb│ (screencapture /   │  │
//! │  └───────┬────────┘   │  import)           │  │
//! │          │            └─────────┬──────────┘  │
//! │          ▼                      ▼             │
//! │  ┌──────────────────────────────────────────┐ │
//! │  │        Compositor  →  Encoder            │ │
//! │  └──────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod buffer;
pub mod compositor;
pub mod encode;
pub mod enumerate;
pub mod orchestrator;
pub mod probe;

pub use backend::{CaptureScope, Capturer, DisplaySource};
pub use buffer::PixelBuffer;
pub use orchestrator::*;
