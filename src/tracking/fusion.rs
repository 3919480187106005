//! Rotation-vector to quaternion conversion
//!
//! The fused rotation-vector sensor reports the vector part of a unit
//! quaternion (`[x, y, z]`, optionally followed by the scalar part). It goes
//! through a rotation matrix first, then back to a quaternion with the
//! largest-term branch selection so precision holds near 180° rotations.

use bevy::math::{Mat3, Quat, Vec3};

use crate::error::{TrackingError, TrackingResult};

/// Build the rotation matrix described by a raw rotation-vector sample
pub fn rotation_matrix_from_vector(values: &[f32]) -> TrackingResult<Mat3> {
    if values.len() < 3 {
        return Err(TrackingError::InvalidSample(format!(
            "expected at least 3 components, got {}",
            values.len()
        )));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(TrackingError::InvalidSample(
            "sample contains non-finite components".to_string(),
        ));
    }

    let q1 = values[0];
    let q2 = values[1];
    let q3 = values[2];
    let q0 = match values.get(3) {
        Some(w) => *w,
        None => (1.0 - q1 * q1 - q2 * q2 - q3 * q3).max(0.0).sqrt(),
    };

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    // Columns of the row-major matrix
    // | 1-2y²-2z²   2xy-2zw    2xz+2yw  |
    // | 2xy+2zw    1-2x²-2z²   2yz-2xw  |
    // | 2xz-2yw     2yz+2xw   1-2x²-2y² |
    Ok(Mat3::from_cols(
        Vec3::new(1.0 - sq_q2 - sq_q3, q1_q2 + q3_q0, q1_q3 - q2_q0),
        Vec3::new(q1_q2 - q3_q0, 1.0 - sq_q1 - sq_q3, q2_q3 + q1_q0),
        Vec3::new(q1_q3 + q2_q0, q2_q3 - q1_q0, 1.0 - sq_q1 - sq_q2),
    ))
}

/// Convert a rotation matrix into a normalized quaternion
pub fn quaternion_from_matrix(m: &Mat3) -> Quat {
    let e = |row: usize, col: usize| m.col(col)[row];
    let trace = e(0, 0) + e(1, 1) + e(2, 2);

    let (w, x, y, z) = if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        (
            0.25 * s,
            (e(2, 1) - e(1, 2)) / s,
            (e(0, 2) - e(2, 0)) / s,
            (e(1, 0) - e(0, 1)) / s,
        )
    } else if e(0, 0) > e(1, 1) && e(0, 0) > e(2, 2) {
        let s = (1.0 + e(0, 0) - e(1, 1) - e(2, 2)).sqrt() * 2.0;
        (
            (e(2, 1) - e(1, 2)) / s,
            0.25 * s,
            (e(0, 1) + e(1, 0)) / s,
            (e(0, 2) + e(2, 0)) / s,
        )
    } else if e(1, 1) > e(2, 2) {
        let s = (1.0 + e(1, 1) - e(0, 0) - e(2, 2)).sqrt() * 2.0;
        (
            (e(0, 2) - e(2, 0)) / s,
            (e(0, 1) + e(1, 0)) / s,
            0.25 * s,
            (e(1, 2) + e(2, 1)) / s,
        )
    } else {
        let s = (1.0 + e(2, 2) - e(0, 0) - e(1, 1)).sqrt() * 2.0;
        (
            (e(1, 0) - e(0, 1)) / s,
            (e(0, 2) + e(2, 0)) / s,
            (e(1, 2) + e(2, 1)) / s,
            0.25 * s,
        )
    };

    normalize_quat(Quat::from_xyzw(x, y, z, w))
}

/// Full sample conversion used by the sensor sink
pub fn quaternion_from_rotation_vector(values: &[f32]) -> TrackingResult<Quat> {
    let matrix = rotation_matrix_from_vector(values)?;
    Ok(quaternion_from_matrix(&matrix))
}

/// Unit-length copy of `q`; identity when `q` has collapsed
fn normalize_quat(q: Quat) -> Quat {
    let len = q.length();
    if len < 1e-6 || !len.is_finite() {
        Quat::IDENTITY
    } else {
        q * (1.0 / len)
    }
}
