//! Floating overlay windows and the registry that owns them

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Default distance of a new window in front of the camera, in meters
pub const DEFAULT_DEPTH: f32 = -2.0;

/// One spatially anchored window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayWindowData {
    /// Stable identity, never changed after creation
    pub id: String,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    /// Degrees
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub scale: f32,
    pub url: Option<String>,
    pub is_visible: bool,
}

impl OverlayWindowData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position_x: 0.0,
            position_y: 0.0,
            position_z: DEFAULT_DEPTH,
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            scale: 1.0,
            url: None,
            is_visible: true,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position_x, self.position_y, self.position_z)
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position_x = position.x;
        self.position_y = position.y;
        self.position_z = position.z;
    }

    /// Orientation built from the stored Euler angles
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_x.to_radians(),
            self.rotation_y.to_radians(),
            self.rotation_z.to_radians(),
        )
    }
}

/// Ordered set of windows keyed by id.
///
/// Order matters: gaze hit tests take the first match.
#[derive(Resource, Debug, Clone, Default)]
pub struct WindowRegistry {
    windows: Vec<OverlayWindowData>,
    next_id: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_windows(windows: Vec<OverlayWindowData>) -> Self {
        let mut registry = Self::new();
        for window in windows {
            registry.insert(window);
        }
        registry
    }

    /// Create a window at the default pose and return its id
    pub fn open_window(&mut self, url: Option<String>) -> String {
        let id = self.allocate_id();
        let mut window = OverlayWindowData::new(id.clone());
        window.url = url;
        info!("Opened overlay window {}", id);
        self.windows.push(window);
        id
    }

    /// Insert a window, replacing any existing entry with the same id in place
    pub fn insert(&mut self, window: OverlayWindowData) {
        match self.windows.iter_mut().find(|w| w.id == window.id) {
            Some(existing) => *existing = window,
            None => self.windows.push(window),
        }
    }

    pub fn remove_window(&mut self, id: &str) -> Option<OverlayWindowData> {
        let index = self.windows.iter().position(|w| w.id == id)?;
        debug!("Removed overlay window {}", id);
        Some(self.windows.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&OverlayWindowData> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut OverlayWindowData> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn windows(&self) -> &[OverlayWindowData] {
        &self.windows
    }

    #[inline]
    pub fn windows_mut(&mut self) -> &mut [OverlayWindowData] {
        &mut self.windows
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayWindowData> {
        self.windows.iter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &OverlayWindowData> {
        self.windows.iter().filter(|w| w.is_visible)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("window-{}", self.next_id);
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}
