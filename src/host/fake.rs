//! Deterministic in-memory host for the test suite.

use super::{
    CameraHandle, DirectCaptureOptions, HostError, RenderHost, TargetDesc, TargetHandle,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CameraState {
    pub enabled: bool,
    pub target: Option<TargetHandle>,
}

/// Snapshot of the camera taken by [`FakeHost::render_camera`], so tests can
/// assert what state the explicit render actually saw.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderEvent {
    pub camera: CameraHandle,
    pub enabled_at_render: bool,
    pub target_at_render: Option<TargetHandle>,
}

pub(crate) struct FakeHost {
    data_dir: PathBuf,
    scene_name: String,
    display: (u32, u32),
    cameras: HashMap<CameraHandle, CameraState>,
    live_targets: HashMap<TargetHandle, TargetDesc>,
    released: Vec<TargetHandle>,
    next_target: u64,
    active: Option<TargetHandle>,
    pub renders: Vec<RenderEvent>,
    pub direct_captures: Vec<(PathBuf, DirectCaptureOptions)>,
    pub fail_allocation: bool,
    pub fail_render: bool,
    pub fail_readback: bool,
    /// Readback returns fewer bytes than the requested rect needs.
    pub short_readback: bool,
    /// Allocation fails for targets wider or taller than this, when set.
    pub max_target_size: Option<u32>,
}

impl FakeHost {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            scene_name: "Level1".to_string(),
            display: (64, 48),
            cameras: HashMap::new(),
            live_targets: HashMap::new(),
            released: Vec::new(),
            next_target: 1,
            active: None,
            renders: Vec::new(),
            direct_captures: Vec::new(),
            fail_allocation: false,
            fail_render: false,
            fail_readback: false,
            short_readback: false,
            max_target_size: None,
        }
    }

    pub fn with_scene(mut self, name: &str) -> Self {
        self.scene_name = name.to_string();
        self
    }

    pub fn with_display(mut self, width: u32, height: u32) -> Self {
        self.display = (width, height);
        self
    }

    /// Register a camera in the given state and return its handle.
    pub fn add_camera(&mut self, enabled: bool) -> CameraHandle {
        let handle = CameraHandle(self.cameras.len() as u64 + 1);
        self.cameras.insert(
            handle,
            CameraState {
                enabled,
                target: None,
            },
        );
        handle
    }

    pub fn camera_state(&self, camera: CameraHandle) -> CameraState {
        self.cameras.get(&camera).copied().unwrap_or_default()
    }

    pub fn live_target_count(&self) -> usize {
        self.live_targets.len()
    }

    pub fn released_targets(&self) -> &[TargetHandle] {
        &self.released
    }
}

impl RenderHost for FakeHost {
    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn active_scene_name(&self) -> String {
        self.scene_name.clone()
    }

    fn display_size(&self) -> (u32, u32) {
        self.display
    }

    fn capture_screen_to_file(
        &mut self,
        path: &Path,
        options: DirectCaptureOptions,
    ) -> Result<(), HostError> {
        std::fs::write(path, b"engine-managed capture")
            .map_err(|e| HostError::new(e.to_string()))?;
        self.direct_captures.push((path.to_path_buf(), options));
        Ok(())
    }

    fn allocate_target(&mut self, desc: &TargetDesc) -> Result<TargetHandle, HostError> {
        if self.fail_allocation {
            return Err(HostError::new("target pool exhausted"));
        }
        if let Some(max) = self.max_target_size {
            if desc.width > max || desc.height > max {
                return Err(HostError::new(format!(
                    "unsupported target size {}x{}",
                    desc.width, desc.height
                )));
            }
        }
        let handle = TargetHandle(self.next_target);
        self.next_target += 1;
        self.live_targets.insert(handle, *desc);
        Ok(handle)
    }

    fn release_target(&mut self, target: TargetHandle) {
        if self.live_targets.remove(&target).is_some() {
            self.released.push(target);
        }
    }

    fn camera_target(&self, camera: CameraHandle) -> Option<TargetHandle> {
        self.cameras.get(&camera).and_then(|c| c.target)
    }

    fn set_camera_target(&mut self, camera: CameraHandle, target: Option<TargetHandle>) {
        if let Some(state) = self.cameras.get_mut(&camera) {
            state.target = target;
        }
    }

    fn camera_enabled(&self, camera: CameraHandle) -> bool {
        self.cameras.get(&camera).is_some_and(|c| c.enabled)
    }

    fn set_camera_enabled(&mut self, camera: CameraHandle, enabled: bool) {
        if let Some(state) = self.cameras.get_mut(&camera) {
            state.enabled = enabled;
        }
    }

    fn render_camera(&mut self, camera: CameraHandle) -> Result<(), HostError> {
        if self.fail_render {
            return Err(HostError::new("device lost"));
        }
        let state = self.camera_state(camera);
        self.renders.push(RenderEvent {
            camera,
            enabled_at_render: state.enabled,
            target_at_render: state.target,
        });
        Ok(())
    }

    fn active_target(&self) -> Option<TargetHandle> {
        self.active
    }

    fn set_active_target(&mut self, target: Option<TargetHandle>) {
        self.active = target;
    }

    fn read_active_target(&mut self, width: u32, height: u32) -> Result<Vec<u8>, HostError> {
        if self.fail_readback {
            return Err(HostError::new("map buffer failed"));
        }
        if self.active.is_none() {
            return Err(HostError::new("no active render target"));
        }
        // Gradient fill keeps decoded output verifiable without a real GPU.
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }
        if self.short_readback {
            pixels.truncate(pixels.len() / 2);
        }
        Ok(pixels)
    }
}
