//! Per-frame window transforms for the rendering collaborator

use bevy::prelude::*;

use crate::projection::{Eye, ScreenSize, SpatialProjector};
use crate::window::OverlayWindowData;

/// Screen placement of one visible window
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedWindow {
    pub id: String,
    /// `(screen_x, screen_y, ndc_depth)` per eye
    pub left: Vec3,
    pub right: Vec3,
    pub mono: Vec3,
    pub scale: f32,
    pub rotation: Quat,
}

/// Everything the renderer needs to draw the current frame
#[derive(Resource, Debug, Clone, Default)]
pub struct ProjectedWindows {
    pub windows: Vec<ProjectedWindow>,
    pub left_projection: Mat4,
    pub right_projection: Mat4,
    pub gaze_marker: Vec3,
    pub dwell_progress: f32,
    pub selected: Option<String>,
}

impl ProjectedWindows {
    pub fn get(&self, id: &str) -> Option<&ProjectedWindow> {
        self.windows.iter().find(|w| w.id == id)
    }
}

/// Project every visible window for both eyes and the mono view
pub fn project_windows(
    projector: &SpatialProjector,
    windows: &[OverlayWindowData],
    head_rotation: Quat,
    screen: ScreenSize,
    interocular_distance: f32,
) -> Vec<ProjectedWindow> {
    windows
        .iter()
        .filter(|w| w.is_visible)
        .map(|window| {
            let position = window.position();
            let project = |eye: Eye| {
                projector.project_to_screen(
                    position,
                    head_rotation,
                    eye.offset(interocular_distance),
                    screen,
                )
            };

            ProjectedWindow {
                id: window.id.clone(),
                left: project(Eye::Left),
                right: project(Eye::Right),
                mono: project(Eye::Mono),
                scale: window.scale,
                rotation: window.rotation(),
            }
        })
        .collect()
}

/// Refresh the per-eye projection matrices for the current surface
pub fn refresh_eye_projections(
    frame: &mut ProjectedWindows,
    projector: &SpatialProjector,
    screen: ScreenSize,
    interocular_distance: f32,
) {
    let aspect = screen.aspect_ratio();
    frame.left_projection =
        projector.build_projection(Eye::Left.offset(interocular_distance), aspect);
    frame.right_projection =
        projector.build_projection(Eye::Right.offset(interocular_distance), aspect);
}
