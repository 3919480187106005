use gaze_overlay::state::*;
use gaze_overlay::OverlayWindowData;

#[test]
fn test_missing_fields_take_defaults() {
    let record: PersistedWindow =
        serde_json::from_str(r#"{ "id": "w1", "x": 0.5 }"#).expect("record should parse");

    let window = record.into_window().expect("record has an id");
    assert_eq!(window.id, "w1");
    assert_eq!(window.position_x, 0.5);
    assert_eq!(window.position_y, 0.0);
    assert_eq!(window.position_z, -2.0);
    assert_eq!(window.scale, 1.0);
    assert!(window.is_visible);
    assert_eq!(window.url, None);
}

#[test]
fn test_record_without_id_is_dropped() {
    let record: PersistedWindow =
        serde_json::from_str(r#"{ "x": 1.0, "scale": 2.0 }"#).expect("record should parse");
    assert!(record.into_window().is_none());
}

#[test]
fn test_snapshot_reads_at_most_declared_count() {
    let snapshot: WindowSnapshot = serde_json::from_str(
        r#"{
            "window_count": 2,
            "windows": [
                { "id": "a" },
                { "x": 3.0 },
                { "id": "c" }
            ]
        }"#,
    )
    .expect("snapshot should parse");

    let windows = snapshot.into_windows();
    let ids: Vec<&str> = windows.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn test_record_keeps_every_field() {
    let mut window = OverlayWindowData::new("w")
        .with_url("https://example.com")
        .with_scale(1.75)
        .hidden();
    window.position_x = 0.25;
    window.position_y = -0.5;
    window.position_z = -3.5;
    window.rotation_x = 10.0;
    window.rotation_y = -20.0;
    window.rotation_z = 30.0;

    let record = PersistedWindow::from(&window);
    assert_eq!(record.id.as_deref(), Some("w"));
    assert_eq!((record.rx, record.ry, record.rz), (10.0, -20.0, 30.0));
    assert!(!record.visible);
    assert_eq!(record.into_window(), Some(window));
}

#[test]
fn test_validation_rejects_non_finite_values() {
    let mut window = OverlayWindowData::new("w");
    window.scale = f32::NAN;

    let snapshot = WindowSnapshot::from_windows(&[window]);
    assert!(matches!(snapshot.validate(), Err(StoreError::Validation(_))));
}

#[test]
fn test_validation_rejects_duplicate_ids() {
    let snapshot =
        WindowSnapshot::from_windows(&[OverlayWindowData::new("w"), OverlayWindowData::new("w")]);
    assert!(matches!(snapshot.validate(), Err(StoreError::Validation(_))));
}
