//! Stereo projection and view-ray geometry
//!
//! Pure math shared by the gaze engine and the per-eye transform refresh:
//! perspective frusta with a horizontal eye shift, world to pixel projection
//! under a yaw-only view, ray/depth-plane intersection and clamped lerp.

use bevy::math::{Mat4, Quat, Vec3, Vec4};
use bevy::prelude::Resource;

use crate::config::EngineConfig;

/// Vectors shorter than this are treated as degenerate
pub const MIN_VECTOR_LENGTH: f32 = 1e-4;

/// Rays whose depth component is below this never meet a depth plane
const PARALLEL_EPSILON: f32 = 1e-6;

/// Normalize `v`, or return `+Z` when it is too short to carry a direction
#[inline]
pub fn normalize_or_forward(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < MIN_VECTOR_LENGTH || !len.is_finite() {
        Vec3::Z
    } else {
        v / len
    }
}

/// Linear interpolation with `t` clamped to `[0, 1]`
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t.clamp(0.0, 1.0)
}

/// Component-wise [`lerp`]
#[inline]
pub fn lerp_vector(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    Vec3::new(
        lerp(start.x, end.x, t),
        lerp(start.y, end.y, t),
        lerp(start.z, end.z, t),
    )
}

/// Heading angle of `q` around the world Y axis, in radians
#[inline]
pub fn yaw_of(q: Quat) -> f32 {
    let sin_yaw = 2.0 * (q.w * q.y - q.x * q.z);
    let cos_yaw = 1.0 - 2.0 * (q.y * q.y + q.z * q.z);
    sin_yaw.atan2(cos_yaw)
}

/// Direction the head looks along, `(0, 0, -1)` rotated by `rotation`
#[inline]
pub fn forward_vector(rotation: Quat) -> Vec3 {
    normalize_or_forward(rotation * Vec3::NEG_Z)
}

/// Pixel dimensions of the output surface
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, 1.0 for a degenerate surface
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.width as f32 * 0.5, self.height as f32 * 0.5, 0.0)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Which eye a projection is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
    Mono,
}

impl Eye {
    /// Horizontal eye shift for a given interocular distance
    #[inline]
    pub fn offset(self, interocular_distance: f32) -> f32 {
        match self {
            Eye::Left => -interocular_distance * 0.5,
            Eye::Right => interocular_distance * 0.5,
            Eye::Mono => 0.0,
        }
    }
}

/// Ray structure for view-ray intersection
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Intersection with the plane `z = depth`, `origin + direction * t`.
    ///
    /// `t` may be negative. `None` when the ray runs parallel to the plane or
    /// the arithmetic would leave the finite range.
    pub fn intersect_depth(&self, depth: f32) -> Option<Vec3> {
        if self.direction.z.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (depth - self.origin.z) / self.direction.z;
        if !t.is_finite() {
            return None;
        }

        let hit = Vec3::new(
            self.origin.x + self.direction.x * t,
            self.origin.y + self.direction.y * t,
            depth,
        );
        hit.is_finite().then_some(hit)
    }
}

/// Frustum parameters plus the projection operations built from them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialProjector {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for SpatialProjector {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl SpatialProjector {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            fov_degrees: config.fov_degrees,
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    /// Symmetric perspective frustum followed by a `-eye_offset` shift along X
    pub fn build_projection(&self, eye_offset: f32, aspect_ratio: f32) -> Mat4 {
        Self::frustum_projection(eye_offset, aspect_ratio, self.near, self.far, self.fov_degrees)
    }

    /// [`build_projection`](Self::build_projection) with explicit frustum parameters
    pub fn frustum_projection(
        eye_offset: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
        fov_degrees: f32,
    ) -> Mat4 {
        let top = near * (fov_degrees.to_radians() * 0.5).tan();
        let bottom = -top;
        let left = bottom * aspect_ratio;
        let right = top * aspect_ratio;

        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        let frustum = Mat4::from_cols(
            Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
            Vec4::new(
                (right + left) / width,
                (top + bottom) / height,
                -(far + near) / depth,
                -1.0,
            ),
            Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
        );

        frustum * Mat4::from_translation(Vec3::new(-eye_offset, 0.0, 0.0))
    }

    /// Horizon-stabilized view: inverse head yaw, then the eye shift. Pitch and
    /// roll are dropped.
    pub fn view_matrix(head_rotation: Quat, eye_offset: f32) -> Mat4 {
        Mat4::from_rotation_y(-yaw_of(head_rotation))
            * Mat4::from_translation(Vec3::new(-eye_offset, 0.0, 0.0))
    }

    /// Clip-space position of `world_pos` before the perspective divide
    pub fn clip_position(
        &self,
        world_pos: Vec3,
        head_rotation: Quat,
        eye_offset: f32,
        aspect_ratio: f32,
    ) -> Vec4 {
        // The eye shift is carried by the view here so it is applied once.
        let projection = self.build_projection(0.0, aspect_ratio);
        let view = Self::view_matrix(head_rotation, eye_offset);
        projection * view * Mat4::from_translation(world_pos) * Vec4::W
    }

    /// Whether `world_pos` lies in front of the eye and between the clip planes
    pub fn is_in_view_depth(
        &self,
        world_pos: Vec3,
        head_rotation: Quat,
        eye_offset: f32,
        aspect_ratio: f32,
    ) -> bool {
        let clip = self.clip_position(world_pos, head_rotation, eye_offset, aspect_ratio);
        if clip.w.is_nan() || clip.w <= 0.0 {
            return false;
        }
        let ndc_depth = clip.z / clip.w;
        (-1.0..=1.0).contains(&ndc_depth)
    }

    /// Project `world_pos` to `(screen_x, screen_y, ndc_depth)`.
    ///
    /// Points behind the eye still divide through and can land on screen; check
    /// [`is_in_view_depth`](Self::is_in_view_depth) or the returned depth.
    pub fn project_to_screen(
        &self,
        world_pos: Vec3,
        head_rotation: Quat,
        eye_offset: f32,
        screen: ScreenSize,
    ) -> Vec3 {
        let mut clip =
            self.clip_position(world_pos, head_rotation, eye_offset, screen.aspect_ratio());
        if clip.w != 0.0 {
            clip.x /= clip.w;
            clip.y /= clip.w;
            clip.z /= clip.w;
        }

        let screen_x = (clip.x + 1.0) * 0.5 * screen.width as f32;
        let screen_y = (1.0 - clip.y) * 0.5 * screen.height as f32;
        Vec3::new(screen_x, screen_y, clip.z)
    }

    /// Point where the view ray meets the plane `z = depth`
    #[inline]
    pub fn project_ray_to_depth(&self, origin: Vec3, forward: Vec3, depth: f32) -> Option<Vec3> {
        Ray::new(origin, forward).intersect_depth(depth)
    }
}
