use bevy::math::Vec3;
use gaze_overlay::state::*;
use gaze_overlay::OverlayWindowData;
use tempfile::TempDir;

use crate::test_utils::create_temp_dir;

fn store_in(dir: &TempDir) -> WindowStore {
    let config = StoreConfig {
        base_directory: dir.path().to_path_buf(),
        ..Default::default()
    };
    WindowStore::with_config(config).expect("Failed to create store")
}

fn sample_windows() -> Vec<OverlayWindowData> {
    vec![
        OverlayWindowData::new("a").with_url("https://example.com"),
        OverlayWindowData::new("b")
            .with_position(Vec3::new(0.4, 0.2, -2.5))
            .with_scale(1.8),
        OverlayWindowData::new("c").hidden(),
    ]
}

#[test]
fn test_missing_layout_loads_empty() {
    let dir = create_temp_dir();
    let store = store_in(&dir);

    assert!(!store.exists());
    assert!(store.load_windows().expect("load failed").is_empty());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    let windows = sample_windows();

    store.save_windows(&windows).expect("save failed");
    assert!(store.exists());
    assert_eq!(store.load_windows().expect("load failed"), windows);
}

#[test]
fn test_save_leaves_no_temporary_file() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    store.save_windows(&sample_windows()).expect("save failed");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_save_window_upserts() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    store.save_windows(&sample_windows()).expect("save failed");

    let moved = OverlayWindowData::new("b").with_position(Vec3::new(-1.0, 0.0, -2.5));
    store.save_window(&moved).expect("upsert failed");
    store
        .save_window(&OverlayWindowData::new("d"))
        .expect("insert failed");

    let loaded = store.load_windows().expect("load failed");
    let ids: Vec<&str> = loaded.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    assert_eq!(loaded[1], moved);
}

#[test]
fn test_delete_window() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    store.save_windows(&sample_windows()).expect("save failed");

    store.delete_window("a").expect("delete failed");
    store.delete_window("missing").expect("deleting an unknown id is fine");

    let loaded = store.load_windows().expect("load failed");
    let ids: Vec<&str> = loaded.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}

#[test]
fn test_invalid_window_is_not_written() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    store.save_windows(&sample_windows()).expect("save failed");

    let mut broken = OverlayWindowData::new("x");
    broken.position_x = f32::INFINITY;
    assert!(matches!(
        store.save_windows(&[broken]),
        Err(StoreError::Validation(_))
    ));

    // Previous layout survives
    assert_eq!(store.load_windows().expect("load failed").len(), 3);
}

#[test]
fn test_corrupt_layout_is_an_error() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    std::fs::write(store.file_path(), "{ not json").expect("write failed");

    assert!(matches!(
        store.load_windows(),
        Err(StoreError::Serialization(_))
    ));
}

#[test]
fn test_hand_written_layout_with_gaps() {
    let dir = create_temp_dir();
    let store = store_in(&dir);
    std::fs::write(
        store.file_path(),
        r#"{ "window_count": 3, "windows": [ { "id": "a", "scale": 2.0 }, { "url": "orphan" } ] }"#,
    )
    .expect("write failed");

    let loaded = store.load_windows().expect("load failed");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].scale, 2.0);
    assert_eq!(loaded[0].position_z, -2.0);
}
