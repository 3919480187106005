//! Gaze gesture state machine
//!
//! Every frame the engine recomputes the gaze marker from the head pose. Dwell
//! and button edges select a window; a selected window follows the gaze ray
//! (drag) and grows or shrinks with forward head travel (resize). Both
//! manipulations start and stop together but update through separate calls.

use std::time::Duration;

use bevy::prelude::*;

use super::events::{ActivationOutcome, GazeEvent};
use crate::config::EngineConfig;
use crate::cursor::DwellTracker;
use crate::projection::{
    forward_vector, lerp_vector, ScreenSize, SpatialProjector, MIN_VECTOR_LENGTH,
};
use crate::window::OverlayWindowData;

#[derive(Resource, Debug, Clone)]
pub struct GazeInputEngine {
    config: EngineConfig,
    projector: SpatialProjector,

    /// Gaze marker in screen pixels, z unused
    gaze_position: Vec3,
    forward: Vec3,

    dwell: DwellTracker,

    dragged_window: Option<String>,
    is_dragging: bool,
    is_resizing: bool,
    grab_depth: f32,
    drag_start_position: Vec3,
    resize_start_depth: f32,
    resize_start_scale: f32,

    is_button_pressed: bool,
    last_activation: Option<Duration>,

    events: Vec<GazeEvent>,
}

impl Default for GazeInputEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GazeInputEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            projector: SpatialProjector::from_config(&config),
            dwell: DwellTracker::new(config.dwell_threshold()),
            config,
            gaze_position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            dragged_window: None,
            is_dragging: false,
            is_resizing: false,
            grab_depth: 0.0,
            drag_start_position: Vec3::ZERO,
            resize_start_depth: 0.0,
            resize_start_scale: 1.0,
            is_button_pressed: false,
            last_activation: None,
            events: Vec::new(),
        }
    }

    /// Recompute the forward vector and the gaze marker.
    ///
    /// The marker is the monocular projection of the point `gaze_distance`
    /// meters along the head ray.
    pub fn update_gaze(
        &mut self,
        head_rotation: Quat,
        head_position: Vec3,
        screen: ScreenSize,
    ) -> Vec3 {
        self.forward = forward_vector(head_rotation);

        let reference = head_position + self.forward * self.config.gaze_distance;
        let projected = self
            .projector
            .project_to_screen(reference, head_rotation, 0.0, screen);

        if projected.x.is_finite() && projected.y.is_finite() {
            self.gaze_position = Vec3::new(projected.x, projected.y, 0.0);
        } else {
            trace!("Gaze reference projected off the finite range, keeping last marker");
        }
        self.gaze_position
    }

    /// Advance the dwell timer against the window under the gaze.
    ///
    /// Returns the window id on the frame the dwell completes. Suspended while a
    /// window is grabbed.
    pub fn update_dwell(
        &mut self,
        windows: &[OverlayWindowData],
        head_rotation: Quat,
        screen: ScreenSize,
        now: Duration,
    ) -> Option<String> {
        if self.is_dragging {
            self.dwell.reset();
            return None;
        }

        let hit = self.first_hit(windows, head_rotation, screen);
        let activated = self.dwell.update(hit, now)?;

        info!("Dwell activated window {}", activated);
        self.events.push(GazeEvent::DwellActivated(activated.clone()));
        self.events.push(GazeEvent::WindowSelected(activated.clone()));
        Some(activated)
    }

    /// Button or tap pressed
    pub fn on_button_down(
        &mut self,
        windows: &[OverlayWindowData],
        head_rotation: Quat,
        head_position: Vec3,
        screen: ScreenSize,
        now: Duration,
    ) -> ActivationOutcome {
        if let Some(last) = self.last_activation {
            if now.saturating_sub(last) < self.config.double_activation_window() {
                debug!("Double activation, toggling view mode");
                self.events.push(GazeEvent::ModeToggled);
                self.last_activation = None;
                return ActivationOutcome::DoubleActivation;
            }
        }
        self.last_activation = Some(now);
        self.is_button_pressed = true;

        let Some(window) = windows
            .iter()
            .find(|w| w.is_visible && self.is_gaze_hitting_window(w, head_rotation, screen))
        else {
            return ActivationOutcome::Missed;
        };

        self.is_dragging = true;
        self.dragged_window = Some(window.id.clone());
        self.grab_depth = window.position_z;
        self.drag_start_position = window.position();

        self.is_resizing = true;
        self.resize_start_depth = head_position.z;
        self.resize_start_scale = window.scale;

        self.dwell.reset();
        info!("Selected window {}", window.id);
        self.events.push(GazeEvent::WindowSelected(window.id.clone()));
        ActivationOutcome::Selected(window.id.clone())
    }

    /// Button or tap released. Always ends both manipulations.
    pub fn on_button_up(&mut self) {
        if let Some(id) = self.dragged_window.take() {
            debug!("Released window {}", id);
        }
        self.is_dragging = false;
        self.is_resizing = false;
        self.is_button_pressed = false;
        self.events.push(GazeEvent::WindowDeselected);
    }

    /// Move the grabbed window's X/Y toward where the view ray meets its
    /// anchor depth. Z is never touched. Returns whether the window moved.
    pub fn update_drag(
        &mut self,
        windows: &mut [OverlayWindowData],
        head_rotation: Quat,
        head_position: Vec3,
        forward: Vec3,
    ) -> bool {
        if !self.is_dragging {
            return false;
        }
        let Some(window) = self.grabbed_window_mut(windows) else {
            return false;
        };

        let forward = if forward.is_finite() && forward.length() >= MIN_VECTOR_LENGTH {
            forward
        } else {
            forward_vector(head_rotation)
        };

        // Anchor plane behind the head: the ray never reaches it
        if (self.grab_depth - head_position.z) * forward.z < 0.0 {
            trace!("Anchor depth {} is behind the view ray, skipping drag", self.grab_depth);
            return false;
        }

        let Some(hit) = self
            .projector
            .project_ray_to_depth(head_position, forward, self.grab_depth)
        else {
            trace!("View ray does not reach depth {}, skipping drag", self.grab_depth);
            return false;
        };

        let current = window.position();
        let target = Vec3::new(hit.x, hit.y, self.grab_depth);
        let blended = lerp_vector(current, target, self.config.drag_blend);

        window.position_x = blended.x;
        window.position_y = blended.y;
        true
    }

    /// Rescale the grabbed window from forward head travel since the grab.
    /// Returns the applied scale.
    pub fn update_resize(
        &mut self,
        windows: &mut [OverlayWindowData],
        head_position: Vec3,
        sensitivity: f32,
    ) -> Option<f32> {
        if !self.is_resizing {
            return None;
        }

        let (min_scale, max_scale) = (self.config.min_scale, self.config.max_scale);
        let scale_delta = (self.resize_start_depth - head_position.z) * sensitivity;
        let new_scale = self.resize_start_scale + scale_delta;
        if !new_scale.is_finite() {
            trace!("Non-finite resize input, keeping scale");
            return None;
        }

        let window = self.grabbed_window_mut(windows)?;
        // Tolerates NaN or inverted bounds
        window.scale = new_scale.max(min_scale).min(max_scale);
        Some(window.scale)
    }

    /// Radius hit test between the projected window centre and the marker.
    /// Only windows inside the view frustum depth range can be hit.
    pub fn is_gaze_hitting_window(
        &self,
        window: &OverlayWindowData,
        head_rotation: Quat,
        screen: ScreenSize,
    ) -> bool {
        // Behind the head or outside the clip planes: the divide would fold it
        // back onto the screen
        if !self.projector.is_in_view_depth(
            window.position(),
            head_rotation,
            0.0,
            screen.aspect_ratio(),
        ) {
            return false;
        }

        let projected = self
            .projector
            .project_to_screen(window.position(), head_rotation, 0.0, screen);

        let window_size = 0.5 * window.scale;
        let dx = self.gaze_position.x - projected.x;
        let dy = self.gaze_position.y - projected.y;
        let distance = (dx * dx + dy * dy).sqrt();

        distance < window_size * self.config.hit_pixels_per_unit
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<GazeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop all gesture state
    pub fn release(&mut self) {
        self.is_dragging = false;
        self.is_resizing = false;
        self.is_button_pressed = false;
        self.dragged_window = None;
        self.dwell.reset();
        self.events.clear();
    }

    #[inline]
    pub fn gaze_position(&self) -> Vec3 {
        self.gaze_position
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[inline]
    pub fn is_resizing(&self) -> bool {
        self.is_resizing
    }

    #[inline]
    pub fn is_button_pressed(&self) -> bool {
        self.is_button_pressed
    }

    pub fn dragged_window(&self) -> Option<&str> {
        self.dragged_window.as_deref()
    }

    #[inline]
    pub fn grab_depth(&self) -> f32 {
        self.grab_depth
    }

    #[inline]
    pub fn drag_start_position(&self) -> Vec3 {
        self.drag_start_position
    }

    #[inline]
    pub fn resize_anchor(&self) -> (f32, f32) {
        (self.resize_start_depth, self.resize_start_scale)
    }

    #[inline]
    pub fn dwell(&self) -> &DwellTracker {
        &self.dwell
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn projector(&self) -> &SpatialProjector {
        &self.projector
    }

    fn first_hit<'a>(
        &self,
        windows: &'a [OverlayWindowData],
        head_rotation: Quat,
        screen: ScreenSize,
    ) -> Option<&'a str> {
        windows
            .iter()
            .find(|w| w.is_visible && self.is_gaze_hitting_window(w, head_rotation, screen))
            .map(|w| w.id.as_str())
    }

    fn grabbed_window_mut<'a>(
        &self,
        windows: &'a mut [OverlayWindowData],
    ) -> Option<&'a mut OverlayWindowData> {
        let id = self.dragged_window.as_deref()?;
        let window = windows.iter_mut().find(|w| w.id == id);
        if window.is_none() {
            trace!("Grabbed window {} no longer exists", id);
        }
        window
    }
}
