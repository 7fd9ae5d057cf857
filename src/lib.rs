//! Sceneshot - screenshot capture for 3D applications.
//!
//! Wraps a host engine's screenshot and render-target APIs behind the
//! [`RenderHost`] trait and exposes two capture pathways: direct
//! engine-managed screen capture, and custom-resolution offscreen capture of
//! a single camera encoded to PNG. Output lands in a `Screenshots` directory
//! next to the host's data directory, with scene-and-timestamp filenames.
//!
//! The embedding application implements [`RenderHost`] over its engine
//! bindings, constructs a [`Capturer`], calls
//! [`Capturer::ensure_output_directory`] once, and then captures at will.
//! This crate installs no tracing subscriber; that belongs to the embedder.

pub mod capture;
pub mod host;
pub mod output;

pub use capture::{CaptureConfig, CaptureError, CaptureResult, Capturer};
pub use host::{
    CameraHandle, DirectCaptureOptions, HostError, RenderHost, StereoMode, TargetDesc,
    TargetHandle,
};
