use bevy::math::{Quat, Vec3};
use gaze_overlay::tracking::*;

use crate::test_utils::{assert_same_rotation, yaw_sample, MissingSensor, ScriptedSensor};

fn tracker_with(sensor: &ScriptedSensor) -> OrientationTracker {
    OrientationTracker::new(Box::new(sensor.clone()), SamplingRate::Game)
}

#[test]
fn test_identity_before_start() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);

    assert_eq!(tracker.state(), TrackerState::Stopped);
    assert_eq!(tracker.latest().rotation, Quat::IDENTITY);
    assert_eq!(tracker.latest().position, Vec3::ZERO);
    assert!(!sensor.is_subscribed());
}

#[test]
fn test_sample_reaches_latest() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);
    tracker.start();

    assert!(tracker.is_running());
    assert!(sensor.push(&yaw_sample(0.5)));
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(0.5));
}

#[test]
fn test_only_newest_sample_survives() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);
    tracker.start();

    sensor.push(&yaw_sample(0.1));
    sensor.push(&yaw_sample(0.2));
    sensor.push(&yaw_sample(0.3));
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(0.3));

    // Nothing new: the cached pose is returned again
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(0.3));
}

#[test]
fn test_invalid_sample_keeps_previous_pose() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);
    tracker.start();

    sensor.push(&yaw_sample(0.4));
    assert!(!sensor.push(&[f32::INFINITY, 0.0, 0.0]));
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(0.4));
}

#[test]
fn test_stop_retains_last_pose_and_ignores_late_samples() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);
    tracker.start();
    sensor.push(&yaw_sample(0.25));

    tracker.stop();
    assert_eq!(tracker.state(), TrackerState::Stopped);
    assert!(!sensor.is_subscribed());

    assert!(!sensor.push_stale(&yaw_sample(1.0)));
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(0.25));
}

#[test]
fn test_restart_resubscribes() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);

    tracker.start();
    tracker.start();
    assert_eq!(sensor.subscription_count(), 1);

    tracker.stop();
    tracker.start();
    assert_eq!(sensor.subscription_count(), 2);
    assert!(sensor.push(&yaw_sample(-0.2)));
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(-0.2));
}

#[test]
fn test_missing_sensor_is_silent() {
    let mut tracker = OrientationTracker::new(Box::new(MissingSensor), SamplingRate::Fastest);
    tracker.start();

    assert!(!tracker.is_running());
    assert_eq!(tracker.latest().rotation, Quat::IDENTITY);
}

#[test]
fn test_release_drops_sensor() {
    let sensor = ScriptedSensor::default();
    let mut tracker = tracker_with(&sensor);
    tracker.start();
    sensor.push(&yaw_sample(0.6));
    assert_same_rotation(tracker.latest().rotation, Quat::from_rotation_y(0.6));

    tracker.release();
    assert_eq!(tracker.state(), TrackerState::Released);

    tracker.start();
    assert!(!tracker.is_running());
    assert_same_rotation(tracker.snapshot().rotation, Quat::from_rotation_y(0.6));
}

#[test]
fn test_inert_tracker_reports_identity() {
    let mut tracker = OrientationTracker::inert();
    tracker.start();
    assert!(!tracker.is_running());
    assert_eq!(tracker.latest(), HeadPose::default());
}

#[test]
fn test_sampling_rate_intervals() {
    assert_eq!(SamplingRate::default(), SamplingRate::Game);
    assert!(SamplingRate::Fastest.interval() < SamplingRate::Game.interval());
    assert!(SamplingRate::Ui.interval() < SamplingRate::Normal.interval());
    assert!((SamplingRate::Game.hz() - 50.0).abs() < 1e-3);
}
