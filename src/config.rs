//! Engine configuration
//!
//! Every tunable of the interaction engine lives here. Values load from an
//! optional TOML file; any field left out keeps its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracking::SamplingRate;

/// Tunables for gaze, gesture and projection behaviour
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Continuous gaze time on one window before an implicit selection
    pub dwell_threshold_ms: u64,
    /// Two activations closer than this toggle the view mode
    pub double_activation_ms: u64,
    /// Fraction of the remaining distance covered per drag update
    pub drag_blend: f32,
    /// Scale change per meter of forward head travel
    pub resize_sensitivity: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Heuristic conversion from world units to hit radius pixels
    pub hit_pixels_per_unit: f32,
    /// Distance of the gaze reference point along the head ray, in meters
    pub gaze_distance: f32,
    /// Average human eye separation, in meters
    pub interocular_distance: f32,
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Fixed frame step of the main sequence
    pub frame_interval_ms: u64,
    pub sensor_rate: SamplingRate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dwell_threshold_ms: 900,
            double_activation_ms: 300,
            drag_blend: 0.3,
            resize_sensitivity: 2.0,
            min_scale: 0.5,
            max_scale: 3.0,
            hit_pixels_per_unit: 100.0,
            gaze_distance: 2.0,
            interocular_distance: 0.063,
            fov_degrees: 90.0,
            near_plane: 0.1,
            far_plane: 100.0,
            frame_interval_ms: 16,
            sensor_rate: SamplingRate::Game,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path` if it exists, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!("✅ Engine config loaded from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Default per-user config location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gaze-overlay")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("drag_blend", self.drag_blend),
            ("resize_sensitivity", self.resize_sensitivity),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("hit_pixels_per_unit", self.hit_pixels_per_unit),
            ("gaze_distance", self.gaze_distance),
            ("interocular_distance", self.interocular_distance),
            ("fov_degrees", self.fov_degrees),
            ("near_plane", self.near_plane),
            ("far_plane", self.far_plane),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be finite, got {}", value),
                });
            }
        }

        if self.min_scale <= 0.0 || self.min_scale > self.max_scale {
            return Err(ConfigError::InvalidValue {
                field: "min_scale",
                reason: format!(
                    "scale bounds must satisfy 0 < min <= max, got {}..{}",
                    self.min_scale, self.max_scale
                ),
            });
        }

        if self.resize_sensitivity < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "resize_sensitivity",
                reason: format!("must not be negative, got {}", self.resize_sensitivity),
            });
        }

        if self.hit_pixels_per_unit <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "hit_pixels_per_unit",
                reason: format!("must be positive, got {}", self.hit_pixels_per_unit),
            });
        }

        if self.gaze_distance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gaze_distance",
                reason: format!("must be positive, got {}", self.gaze_distance),
            });
        }

        if self.interocular_distance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "interocular_distance",
                reason: format!("must not be negative, got {}", self.interocular_distance),
            });
        }

        if !(0.0..=1.0).contains(&self.drag_blend) {
            return Err(ConfigError::InvalidValue {
                field: "drag_blend",
                reason: format!("must be within [0, 1], got {}", self.drag_blend),
            });
        }

        if self.near_plane <= 0.0 || self.far_plane <= self.near_plane {
            return Err(ConfigError::InvalidValue {
                field: "near_plane",
                reason: format!(
                    "clip planes must satisfy 0 < near < far, got {}..{}",
                    self.near_plane, self.far_plane
                ),
            });
        }

        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(ConfigError::InvalidValue {
                field: "fov_degrees",
                reason: format!("must be within (0, 180), got {}", self.fov_degrees),
            });
        }

        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "frame_interval_ms",
                reason: "must be non-zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn dwell_threshold(&self) -> Duration {
        Duration::from_millis(self.dwell_threshold_ms)
    }

    pub fn double_activation_window(&self) -> Duration {
        Duration::from_millis(self.double_activation_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Horizontal shift for one eye, half the interocular distance
    pub fn eye_offset(&self) -> f32 {
        self.interocular_distance * 0.5
    }
}
