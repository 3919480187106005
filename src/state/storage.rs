//! File-backed window store
//!
//! Writes go to a temporary file first and are renamed into place, so a crash
//! mid-save leaves the previous layout intact.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::{debug, info, warn};

use crate::state::{StoreError, WindowSnapshot};
use crate::window::OverlayWindowData;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base directory for the layout file
    pub base_directory: PathBuf,
    pub file_name: String,
    /// Enable atomic writes
    pub atomic_writes: bool,
    /// Pretty-print JSON for debugging
    pub pretty_print: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_directory: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".gaze-overlay"),
            file_name: "windows.json".to_string(),
            atomic_writes: true,
            pretty_print: cfg!(debug_assertions),
        }
    }
}

/// Saves and restores the window layout
pub struct WindowStore {
    config: StoreConfig,
}

impl WindowStore {
    /// Create a store with default configuration
    pub fn new() -> Result<Self, StoreError> {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.base_directory)?;
        Ok(Self { config })
    }

    pub fn file_path(&self) -> PathBuf {
        self.config.base_directory.join(&self.config.file_name)
    }

    pub fn exists(&self) -> bool {
        self.file_path().exists()
    }

    /// Replace the stored layout with `windows`
    pub fn save_windows(&self, windows: &[OverlayWindowData]) -> Result<(), StoreError> {
        let snapshot = WindowSnapshot::from_windows(windows);
        snapshot.validate()?;

        let serialized = if self.config.pretty_print {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string(&snapshot)?
        };

        let path = self.file_path();
        if self.config.atomic_writes {
            self.atomic_write(&path, &serialized)?;
        } else {
            fs::write(&path, serialized)?;
        }

        info!("✅ Saved {} windows to {:?}", snapshot.window_count, path);
        Ok(())
    }

    /// Stored layout, empty when nothing has been saved yet
    pub fn load_windows(&self) -> Result<Vec<OverlayWindowData>, StoreError> {
        let path = self.file_path();
        if !path.exists() {
            debug!("No saved layout at {:?}", path);
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        let snapshot: WindowSnapshot = serde_json::from_str(&contents)?;
        let declared = snapshot.window_count;
        let windows = snapshot.into_windows();

        if windows.len() < declared {
            warn!(
                "Layout declared {} windows but only {} were usable",
                declared,
                windows.len()
            );
        }
        Ok(windows)
    }

    /// Insert or replace one window in the stored layout
    pub fn save_window(&self, window: &OverlayWindowData) -> Result<(), StoreError> {
        let mut windows = self.load_windows()?;
        match windows.iter_mut().find(|w| w.id == window.id) {
            Some(existing) => *existing = window.clone(),
            None => windows.push(window.clone()),
        }
        self.save_windows(&windows)
    }

    /// Remove one window from the stored layout
    pub fn delete_window(&self, window_id: &str) -> Result<(), StoreError> {
        let mut windows = self.load_windows()?;
        windows.retain(|w| w.id != window_id);
        self.save_windows(&windows)
    }

    /// Write `data` next to `path` and rename it into place
    pub fn atomic_write(&self, path: &Path, data: &str) -> Result<(), StoreError> {
        let temp_path = path.with_extension("tmp");
        if let Err(e) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}
