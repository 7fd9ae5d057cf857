//! Host engine abstraction
//!
//! Everything the capture pipeline needs from the surrounding 3D application
//! lives behind the [`RenderHost`] trait: scene context, display metrics, the
//! engine's built-in screen capture, and the camera/render-target API used by
//! the custom offscreen path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(test)]
pub(crate) mod fake;

/// Opaque camera identifier owned by the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraHandle(pub u64);

/// Opaque render-target identifier owned by the host engine's target pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHandle(pub u64);

/// Eye selection for stereoscopic capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StereoMode {
    LeftEye,
    RightEye,
    #[default]
    BothEyes,
}

/// Options forwarded to the host's built-in screen-to-file capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectCaptureOptions {
    /// Capture at display resolution times the given factor.
    Supersampled(u32),
    /// Capture the given stereo eye selection.
    Stereo(StereoMode),
}

/// Description of an offscreen render target to allocate from the host pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDesc {
    pub width: u32,
    pub height: u32,
    /// Depth buffer precision in bits.
    pub depth_bits: u8,
    /// MSAA sample count; 1 means no multisampling.
    pub samples: u32,
}

impl TargetDesc {
    /// Standard offscreen capture target: 24-bit depth, RGBA8 color, no MSAA.
    pub fn offscreen(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth_bits: 24,
            samples: 1,
        }
    }
}

/// Error reported by a host operation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// The host engine's rendering context.
///
/// Implemented by the embedding application over its engine bindings. All
/// methods are synchronous; the capture pipeline calls them from a single
/// thread (see crate-level concurrency notes on [`crate::Capturer`]).
pub trait RenderHost {
    /// Absolute path of the application's primary data/content directory.
    fn data_dir(&self) -> PathBuf;

    /// Name of the currently loaded scene.
    fn active_scene_name(&self) -> String;

    /// Current display resolution in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Invoke the engine's built-in screen capture, writing directly to
    /// `path`. Resolution, pixel content, and encoding are engine-managed.
    fn capture_screen_to_file(
        &mut self,
        path: &Path,
        options: DirectCaptureOptions,
    ) -> Result<(), HostError>;

    /// Allocate a render target from the host pool.
    fn allocate_target(&mut self, desc: &TargetDesc) -> Result<TargetHandle, HostError>;

    /// Return a target to the host pool. The handle is invalid afterwards.
    fn release_target(&mut self, target: TargetHandle);

    /// The camera's current render-target assignment; `None` renders to the
    /// display.
    fn camera_target(&self, camera: CameraHandle) -> Option<TargetHandle>;

    fn set_camera_target(&mut self, camera: CameraHandle, target: Option<TargetHandle>);

    /// Whether the camera participates in the host's per-frame render loop.
    fn camera_enabled(&self, camera: CameraHandle) -> bool;

    fn set_camera_enabled(&mut self, camera: CameraHandle, enabled: bool);

    /// Issue exactly one explicit render of the camera into its assigned
    /// target, outside the host's normal frame loop.
    fn render_camera(&mut self, camera: CameraHandle) -> Result<(), HostError>;

    /// The globally active render target that readback operates on.
    fn active_target(&self) -> Option<TargetHandle>;

    fn set_active_target(&mut self, target: Option<TargetHandle>);

    /// Read back the full `width`×`height` rect of the active target as
    /// tightly packed RGB8 (3 bytes per pixel, no alpha).
    fn read_active_target(&mut self, width: u32, height: u32) -> Result<Vec<u8>, HostError>;
}
