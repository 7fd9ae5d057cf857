//! Capturer: direct and custom offscreen screenshot capture.

use crate::capture::config::CaptureConfig;
use crate::capture::error::{CaptureError, CaptureResult};
use crate::host::{
    CameraHandle, DirectCaptureOptions, RenderHost, TargetDesc, TargetHandle,
};
use crate::output;
use chrono::Local;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Screenshot capturer over a host rendering context.
///
/// Two independent pathways, chosen explicitly by the caller:
/// [`capture_screen`](Self::capture_screen) delegates to the engine's
/// built-in screen capture at display resolution, while
/// [`capture_camera`](Self::capture_camera) /
/// [`capture_camera_sized`](Self::capture_camera_sized) render a camera into
/// a transient offscreen target and encode the readback to PNG.
///
/// All calls are synchronous and blocking. The custom path mutates and then
/// restores the camera's target/enabled state and the global active target
/// within one call; invoking it re-entrantly on the same camera before the
/// previous call returns would corrupt that save/restore pairing and is the
/// caller's responsibility to avoid.
pub struct Capturer<H: RenderHost> {
    host: H,
    /// Settings for the next direct capture; mutate freely between calls.
    pub config: CaptureConfig,
    output_dir: Option<PathBuf>,
}

impl<H: RenderHost> Capturer<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: CaptureConfig::default(),
            output_dir: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Resolve and create the output directory, caching it for the session.
    ///
    /// Must be called once before any capture. Idempotent; errors only if
    /// creation fails and the directory still does not exist afterwards.
    pub fn ensure_output_directory(&mut self) -> CaptureResult<PathBuf> {
        let dir = output::resolve_output_directory(&self.host);
        if let Err(source) = std::fs::create_dir_all(&dir) {
            if !dir.is_dir() {
                return Err(CaptureError::DirectoryCreation { path: dir, source });
            }
        }
        self.output_dir = Some(dir.clone());
        Ok(dir)
    }

    /// Capture the screen via the engine's built-in mechanism.
    ///
    /// Passes the configured stereo mode when stereo is enabled, otherwise
    /// the supersampling factor. Resolution and encoding are engine-managed.
    pub fn capture_screen(&mut self) -> CaptureResult<PathBuf> {
        let path = self.next_output_path()?;
        let options = if self.config.stereo {
            DirectCaptureOptions::Stereo(self.config.stereo_mode)
        } else {
            DirectCaptureOptions::Supersampled(self.config.supersample.max(1))
        };
        self.host
            .capture_screen_to_file(&path, options)
            .map_err(|e| CaptureError::Direct(e.to_string()))?;
        tracing::info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }

    /// Capture a camera at the current display resolution.
    pub fn capture_camera(&mut self, camera: CameraHandle) -> CaptureResult<PathBuf> {
        self.capture_camera_sized(camera, -1, -1)
    }

    /// Capture a camera into a `width`×`height` offscreen target and write
    /// the result as PNG.
    ///
    /// Non-positive `width` or `height` substitutes the current display size
    /// for both. On success and on every failure the camera's target and
    /// enabled flag and the global active target are restored to their
    /// pre-call values.
    pub fn capture_camera_sized(
        &mut self,
        camera: CameraHandle,
        width: i32,
        height: i32,
    ) -> CaptureResult<PathBuf> {
        let path = self.next_output_path()?;
        let (width, height) = if width <= 0 || height <= 0 {
            self.host.display_size()
        } else {
            (width as u32, height as u32)
        };

        let mut scope = RestoreScope::new(&mut self.host, camera);
        let outcome = run_offscreen_capture(&mut scope, width, height, &path);
        drop(scope);
        outcome?;

        tracing::info!(path = %path.display(), width, height, "screenshot saved");
        Ok(path)
    }

    fn next_output_path(&self) -> CaptureResult<PathBuf> {
        let dir = self
            .output_dir
            .as_ref()
            .ok_or(CaptureError::DirectoryNotReady)?;
        let filename = output::build_filename(&self.host.active_scene_name(), Local::now());
        Ok(dir.join(filename))
    }
}

/// Save/mutate/restore scope for the custom capture path.
///
/// Snapshots the camera's target assignment and enabled flag and the global
/// active target on construction; `Drop` unconditionally releases the
/// temporary target and restores all three, so partial failures cannot leak
/// altered camera or render-target state.
struct RestoreScope<'a, H: RenderHost> {
    host: &'a mut H,
    camera: CameraHandle,
    temp: Option<TargetHandle>,
    saved_camera_target: Option<TargetHandle>,
    saved_camera_enabled: bool,
    saved_active_target: Option<TargetHandle>,
}

impl<'a, H: RenderHost> RestoreScope<'a, H> {
    fn new(host: &'a mut H, camera: CameraHandle) -> Self {
        let saved_camera_target = host.camera_target(camera);
        let saved_camera_enabled = host.camera_enabled(camera);
        let saved_active_target = host.active_target();
        Self {
            host,
            camera,
            temp: None,
            saved_camera_target,
            saved_camera_enabled,
            saved_active_target,
        }
    }
}

impl<H: RenderHost> Drop for RestoreScope<'_, H> {
    fn drop(&mut self) {
        if let Some(temp) = self.temp.take() {
            self.host.release_target(temp);
        }
        self.host.set_active_target(self.saved_active_target);
        self.host
            .set_camera_target(self.camera, self.saved_camera_target);
        self.host
            .set_camera_enabled(self.camera, self.saved_camera_enabled);
    }
}

/// Steps 2–7 of the offscreen capture, run inside a [`RestoreScope`].
fn run_offscreen_capture<H: RenderHost>(
    scope: &mut RestoreScope<'_, H>,
    width: u32,
    height: u32,
    path: &Path,
) -> CaptureResult<()> {
    let camera = scope.camera;
    let desc = TargetDesc::offscreen(width, height);
    let temp = scope
        .host
        .allocate_target(&desc)
        .map_err(|e| CaptureError::TargetAllocation {
            width,
            height,
            reason: e.to_string(),
        })?;
    scope.temp = Some(temp);

    // Disable the camera before retargeting: rendering while it still
    // participates in the host's frame loop double-renders with different
    // focus/exposure state than a single explicit render.
    scope.host.set_camera_enabled(camera, false);
    scope.host.set_camera_target(camera, Some(temp));
    scope
        .host
        .render_camera(camera)
        .map_err(|e| CaptureError::Render(e.to_string()))?;

    scope.host.set_active_target(Some(temp));
    let pixels = scope
        .host
        .read_active_target(width, height)
        .map_err(|e| CaptureError::Readback(e.to_string()))?;

    let png = encode_png(width, height, pixels)?;
    std::fs::write(path, &png).map_err(|source| CaptureError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a tightly packed RGB8 buffer as PNG, in memory.
fn encode_png(width: u32, height: u32, pixels: Vec<u8>) -> CaptureResult<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, pixels).ok_or_else(|| {
        CaptureError::Encoding(format!(
            "pixel buffer does not match {width}x{height} RGB dimensions"
        ))
    })?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| CaptureError::Encoding(e.to_string()))?;
    Ok(bytes)
}
