//! Capture configuration

use crate::host::StereoMode;
use serde::{Deserialize, Serialize};

/// Settings applied by the next direct capture.
///
/// Mutable on the owning [`crate::Capturer`] between calls; nothing here is
/// persisted by this crate. Custom offscreen captures take their size from
/// the call arguments and ignore this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    /// Resolution multiplier for direct capture; must be positive.
    ///
    /// Known limitation: factors above 1 produce visibly blurred output
    /// because the engine's built-in capture is not designed for
    /// magnification.
    pub supersample: u32,

    /// When set, direct capture requests `stereo_mode` instead of a
    /// supersampled capture.
    pub stereo: bool,

    /// Eye selection used when `stereo` is enabled.
    pub stereo_mode: StereoMode,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            supersample: 1,
            stereo: false,
            stereo_mode: StereoMode::BothEyes,
        }
    }
}
