//! Capture pipeline
//!
//! The [`Capturer`] and its supporting configuration and error types.

pub mod config;
pub mod error;

mod capturer;

pub use capturer::Capturer;
pub use config::CaptureConfig;
pub use error::{CaptureError, CaptureResult};
