use std::time::Duration;

use gaze_overlay::error::ConfigError;
use gaze_overlay::tracking::SamplingRate;
use gaze_overlay::EngineConfig;

use crate::test_utils::create_temp_dir;

#[test]
fn test_default_tunables() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.dwell_threshold(), Duration::from_millis(900));
    assert_eq!(config.double_activation_window(), Duration::from_millis(300));
    assert_eq!(config.frame_interval(), Duration::from_millis(16));
    assert_eq!(config.min_scale, 0.5);
    assert_eq!(config.max_scale, 3.0);
    assert!((config.eye_offset() - 0.0315).abs() < 1e-6);
}

#[test]
fn test_load_from_file() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "dwell_threshold_ms = 1500\nresize_sensitivity = 1.5\nsensor_rate = \"fastest\"\n",
    )
    .expect("Failed to write config");

    let config = EngineConfig::load(&path).expect("config should load");
    assert_eq!(config.dwell_threshold_ms, 1500);
    assert_eq!(config.resize_sensitivity, 1.5);
    assert_eq!(config.sensor_rate, SamplingRate::Fastest);
    assert_eq!(config.drag_blend, 0.3);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = create_temp_dir();
    let config = EngineConfig::load_or_default(&dir.path().join("absent.toml"));
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "drag_blend = 4.0\n").expect("Failed to write config");

    assert!(matches!(
        EngineConfig::load(&path),
        Err(ConfigError::InvalidValue { field: "drag_blend", .. })
    ));
    assert_eq!(EngineConfig::load_or_default(&path), EngineConfig::default());
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    assert!(matches!(
        EngineConfig::from_toml_str("dwell_threshold_ms = \"soon\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_clip_planes_validated() {
    let config = EngineConfig {
        near_plane: 5.0,
        far_plane: 1.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field: "near_plane", .. })
    ));
}

#[test]
fn test_default_path_lives_under_app_directory() {
    let path = EngineConfig::default_path();
    assert!(path.ends_with(".gaze-overlay/config.toml"));
}

#[test]
fn test_nan_scale_bound_is_rejected() {
    let config = EngineConfig::from_toml_str("max_scale = nan\n");
    assert!(matches!(
        config,
        Err(ConfigError::InvalidValue { field: "max_scale", .. })
    ));
}

#[test]
fn test_non_finite_fields_are_rejected() {
    let cases: [(&str, fn(&mut EngineConfig)); 6] = [
        ("drag_blend", |c| c.drag_blend = f32::NAN),
        ("resize_sensitivity", |c| c.resize_sensitivity = f32::INFINITY),
        ("hit_pixels_per_unit", |c| c.hit_pixels_per_unit = f32::NAN),
        ("gaze_distance", |c| c.gaze_distance = f32::NEG_INFINITY),
        ("fov_degrees", |c| c.fov_degrees = f32::NAN),
        ("far_plane", |c| c.far_plane = f32::INFINITY),
    ];

    for (expected, corrupt) in cases {
        let mut config = EngineConfig::default();
        corrupt(&mut config);
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected),
            other => panic!("{} should be rejected, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_out_of_range_engine_tunables() {
    let negative_distance = EngineConfig {
        gaze_distance: -2.0,
        ..Default::default()
    };
    assert!(matches!(
        negative_distance.validate(),
        Err(ConfigError::InvalidValue { field: "gaze_distance", .. })
    ));

    let zero_hit_scale = EngineConfig {
        hit_pixels_per_unit: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        zero_hit_scale.validate(),
        Err(ConfigError::InvalidValue { field: "hit_pixels_per_unit", .. })
    ));

    let negative_iod = EngineConfig {
        interocular_distance: -0.01,
        ..Default::default()
    };
    assert!(matches!(
        negative_iod.validate(),
        Err(ConfigError::InvalidValue { field: "interocular_distance", .. })
    ));

    let no_parallax = EngineConfig {
        interocular_distance: 0.0,
        ..Default::default()
    };
    assert!(no_parallax.validate().is_ok());
}
