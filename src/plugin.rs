//! Frame loop wiring
//!
//! One fixed-step pass per frame: pull the newest head pose, move the gaze
//! marker, advance dwell, apply button edges, drag and resize the grabbed
//! window, publish engine events, then refresh the per-eye transforms.

use bevy::prelude::*;

use crate::config::EngineConfig;
use crate::input::{ButtonEdge, GazeEvent, GazeInputEngine};
use crate::projection::ScreenSize;
use crate::render::{project_windows, refresh_eye_projections, ProjectedWindows};
use crate::tracking::{HeadPose, OrientationTracker};
use crate::ui::ViewState;
use crate::window::WindowRegistry;

/// Ordering of the per-frame gaze pass
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GazeSet {
    /// Pose, gaze and gesture updates
    Interaction,
    /// Event fan-out and transform refresh
    Publish,
}

/// Installs the gaze engine, its resources and the fixed-step frame pass.
///
/// An [`OrientationTracker`] resource is optional; without one the head pose
/// stays wherever it was last written.
#[derive(Default)]
pub struct GazeInteractionPlugin {
    pub config: EngineConfig,
}

impl GazeInteractionPlugin {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl Plugin for GazeInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(GazeInputEngine::new(self.config.clone()))
            .insert_resource(Time::<Fixed>::from_duration(self.config.frame_interval()))
            .init_resource::<WindowRegistry>()
            .init_resource::<HeadPose>()
            .init_resource::<ScreenSize>()
            .init_resource::<ViewState>()
            .init_resource::<ProjectedWindows>()
            .add_event::<ButtonEdge>()
            .add_event::<GazeEvent>()
            .configure_sets(
                FixedUpdate,
                (GazeSet::Interaction, GazeSet::Publish).chain(),
            )
            .add_systems(Startup, start_tracking)
            .add_systems(
                FixedUpdate,
                (
                    pull_head_pose,
                    update_gaze,
                    update_dwell,
                    process_button_edges,
                    manipulate_grabbed_window,
                )
                    .chain()
                    .in_set(GazeSet::Interaction),
            )
            .add_systems(
                FixedUpdate,
                (publish_gaze_events, refresh_projected_windows)
                    .chain()
                    .in_set(GazeSet::Publish),
            );

        info!(
            "✅ Gaze interaction installed, frame step {:?}",
            self.config.frame_interval()
        );
    }
}

fn start_tracking(tracker: Option<ResMut<OrientationTracker>>) {
    match tracker {
        Some(mut tracker) => tracker.start(),
        None => debug!("No orientation tracker installed, head pose is externally driven"),
    }
}

fn pull_head_pose(tracker: Option<ResMut<OrientationTracker>>, mut pose: ResMut<HeadPose>) {
    if let Some(mut tracker) = tracker {
        if tracker.is_running() {
            *pose = tracker.latest();
        }
    }
}

fn update_gaze(mut engine: ResMut<GazeInputEngine>, pose: Res<HeadPose>, screen: Res<ScreenSize>) {
    engine.update_gaze(pose.rotation, pose.position, *screen);
}

fn update_dwell(
    mut engine: ResMut<GazeInputEngine>,
    registry: Res<WindowRegistry>,
    pose: Res<HeadPose>,
    screen: Res<ScreenSize>,
    time: Res<Time>,
) {
    engine.update_dwell(registry.windows(), pose.rotation, *screen, time.elapsed());
}

fn process_button_edges(
    mut edges: EventReader<ButtonEdge>,
    mut engine: ResMut<GazeInputEngine>,
    registry: Res<WindowRegistry>,
    pose: Res<HeadPose>,
    screen: Res<ScreenSize>,
    time: Res<Time>,
) {
    for edge in edges.read() {
        match edge {
            ButtonEdge::Down => {
                let outcome = engine.on_button_down(
                    registry.windows(),
                    pose.rotation,
                    pose.position,
                    *screen,
                    time.elapsed(),
                );
                trace!("Button down resolved to {:?}", outcome);
            }
            ButtonEdge::Up => engine.on_button_up(),
        }
    }
}

fn manipulate_grabbed_window(
    mut engine: ResMut<GazeInputEngine>,
    mut registry: ResMut<WindowRegistry>,
    pose: Res<HeadPose>,
) {
    if !engine.is_dragging() && !engine.is_resizing() {
        return;
    }

    let forward = engine.forward();
    let sensitivity = engine.config().resize_sensitivity;
    engine.update_drag(registry.windows_mut(), pose.rotation, pose.position, forward);
    engine.update_resize(registry.windows_mut(), pose.position, sensitivity);
}

fn publish_gaze_events(
    mut engine: ResMut<GazeInputEngine>,
    mut view: ResMut<ViewState>,
    mut writer: EventWriter<GazeEvent>,
) {
    for event in engine.drain_events() {
        view.apply(&event);
        writer.write(event);
    }
}

fn refresh_projected_windows(
    engine: Res<GazeInputEngine>,
    registry: Res<WindowRegistry>,
    pose: Res<HeadPose>,
    screen: Res<ScreenSize>,
    view: Res<ViewState>,
    time: Res<Time>,
    mut frame: ResMut<ProjectedWindows>,
) {
    let interocular = engine.config().interocular_distance;

    frame.windows = if view.view_mode.shows_overlays() {
        project_windows(
            engine.projector(),
            registry.windows(),
            pose.rotation,
            *screen,
            interocular,
        )
    } else {
        Vec::new()
    };
    refresh_eye_projections(&mut frame, engine.projector(), *screen, interocular);

    frame.gaze_marker = engine.gaze_position();
    frame.dwell_progress = engine.dwell().progress(time.elapsed());
    frame.selected = view.selected_window_id.clone();
}
