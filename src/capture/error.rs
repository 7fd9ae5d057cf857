//! Capture error surface

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a capture call.
///
/// Every failure is reported to the caller; none of them are fatal to the
/// host process, and each capture call is independent of the previous one.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("output directory not initialized; call ensure_output_directory first")]
    DirectoryNotReady,

    #[error("failed to create output directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("offscreen target allocation failed for {width}x{height}: {reason}")]
    TargetAllocation {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("camera render failed: {0}")]
    Render(String),

    #[error("pixel readback failed: {0}")]
    Readback(String),

    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("built-in screen capture failed: {0}")]
    Direct(String),
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;
