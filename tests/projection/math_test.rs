use bevy::math::{Quat, Vec3};
use gaze_overlay::projection::*;

use crate::test_utils::{assert_near, assert_vec3_near, EPSILON};

#[test]
fn test_normalize_zero_vector_defaults_forward() {
    assert_eq!(normalize_or_forward(Vec3::ZERO), Vec3::Z);
}

#[test]
fn test_normalize_below_threshold_defaults_forward() {
    assert_eq!(normalize_or_forward(Vec3::new(5e-5, 0.0, 0.0)), Vec3::Z);
    assert_eq!(normalize_or_forward(Vec3::new(f32::NAN, 0.0, 0.0)), Vec3::Z);
}

#[test]
fn test_normalize_regular_vector() {
    let n = normalize_or_forward(Vec3::new(3.0, 0.0, 4.0));
    assert_vec3_near(n, Vec3::new(0.6, 0.0, 0.8), EPSILON);
    assert_near(n.length(), 1.0, EPSILON);
}

#[test]
fn test_lerp_clamps_t() {
    assert_eq!(lerp(0.0, 10.0, 1.5), 10.0);
    assert_eq!(lerp(0.0, 10.0, -0.5), 0.0);
    assert_near(lerp(0.0, 10.0, 0.3), 3.0, EPSILON);
}

#[test]
fn test_lerp_sweep_stays_between_endpoints() {
    let (start, end) = (-3.0_f32, 7.0_f32);
    let mut ts: Vec<f32> = (-200..=200).map(|i| i as f32 * 0.05).collect();
    ts.extend([f32::INFINITY, f32::NEG_INFINITY, f32::MAX, f32::MIN, 1e-30, -1e-30]);

    for t in ts {
        let value = lerp(start, end, t);
        assert!(
            (start..=end).contains(&value),
            "lerp({}, {}, {}) = {} left the segment",
            start,
            end,
            t,
            value
        );
        assert_eq!(value, lerp(start, end, t.clamp(0.0, 1.0)));
    }

    assert_eq!(lerp(start, end, f32::INFINITY), end);
    assert_eq!(lerp(start, end, f32::NEG_INFINITY), start);
}

#[test]
fn test_lerp_vector_is_componentwise() {
    let v = lerp_vector(Vec3::ZERO, Vec3::new(2.0, -4.0, 6.0), 0.5);
    assert_vec3_near(v, Vec3::new(1.0, -2.0, 3.0), EPSILON);

    let clamped = lerp_vector(Vec3::ZERO, Vec3::ONE, 7.0);
    assert_eq!(clamped, Vec3::ONE);
}

#[test]
fn test_forward_vector_identity_looks_down_negative_z() {
    assert_vec3_near(forward_vector(Quat::IDENTITY), Vec3::NEG_Z, EPSILON);
}

#[test]
fn test_forward_vector_follows_heading() {
    let forward = forward_vector(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    assert_vec3_near(forward, Vec3::NEG_X, EPSILON);
}

#[test]
fn test_yaw_ignores_pitch() {
    let q = Quat::from_rotation_y(0.4) * Quat::from_rotation_x(0.3);
    assert_near(yaw_of(q), 0.4, 1e-3);
}
