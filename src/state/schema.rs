//! Persisted window record format
//!
//! One flat record per window plus the record count. The field set is fixed
//! so saved layouts round-trip without loss.

use serde::{Deserialize, Serialize};

use crate::state::StoreError;
use crate::window::{OverlayWindowData, DEFAULT_DEPTH};

fn default_depth() -> f32 {
    DEFAULT_DEPTH
}

fn default_scale() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// Flat on-disk form of [`OverlayWindowData`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedWindow {
    /// Records without an id are skipped on load
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_depth")]
    pub z: f32,
    #[serde(default)]
    pub rx: f32,
    #[serde(default)]
    pub ry: f32,
    #[serde(default)]
    pub rz: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl From<&OverlayWindowData> for PersistedWindow {
    fn from(window: &OverlayWindowData) -> Self {
        Self {
            id: Some(window.id.clone()),
            x: window.position_x,
            y: window.position_y,
            z: window.position_z,
            rx: window.rotation_x,
            ry: window.rotation_y,
            rz: window.rotation_z,
            scale: window.scale,
            url: window.url.clone(),
            visible: window.is_visible,
        }
    }
}

impl PersistedWindow {
    /// Rebuild the live window, `None` when the record carries no id
    pub fn into_window(self) -> Option<OverlayWindowData> {
        let id = self.id?;
        Some(OverlayWindowData {
            id,
            position_x: self.x,
            position_y: self.y,
            position_z: self.z,
            rotation_x: self.rx,
            rotation_y: self.ry,
            rotation_z: self.rz,
            scale: self.scale,
            url: self.url,
            is_visible: self.visible,
        })
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
            ("rx", self.rx),
            ("ry", self.ry),
            ("rz", self.rz),
            ("scale", self.scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(StoreError::Validation(format!(
                    "window {:?} has non-finite {}: {}",
                    self.id, name, value
                )));
            }
        }
        Ok(())
    }
}

/// Complete saved layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSnapshot {
    #[serde(default)]
    pub window_count: usize,
    #[serde(default)]
    pub windows: Vec<PersistedWindow>,
}

impl WindowSnapshot {
    pub fn from_windows(windows: &[OverlayWindowData]) -> Self {
        Self {
            window_count: windows.len(),
            windows: windows.iter().map(PersistedWindow::from).collect(),
        }
    }

    /// Live windows described by this snapshot. Reads at most `window_count`
    /// records and drops those without an id.
    pub fn into_windows(self) -> Vec<OverlayWindowData> {
        self.windows
            .into_iter()
            .take(self.window_count)
            .filter_map(PersistedWindow::into_window)
            .collect()
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.window_count != self.windows.len() {
            return Err(StoreError::Validation(format!(
                "window_count {} does not match {} records",
                self.window_count,
                self.windows.len()
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for record in &self.windows {
            record.validate()?;
            if let Some(id) = &record.id {
                if !seen.insert(id.as_str()) {
                    return Err(StoreError::Validation(format!("duplicate window id {}", id)));
                }
            }
        }
        Ok(())
    }
}
