use anyhow::{Context, Result};
use bevy::app::ScheduleRunnerPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use gaze_overlay::tracking::SimulatedRotationSensor;
use gaze_overlay::{
    ButtonEdge, EngineConfig, GazeEvent, GazeInteractionPlugin, GazeSet, OrientationTracker,
    ProjectedWindows, WindowRegistry, WindowStore,
};

const DEFAULT_RUN_FRAMES: u64 = 600;

/// Scripted button edges for the headless demo, keyed by fixed frame
#[derive(Resource)]
struct DemoScript {
    frame: u64,
    taps: Vec<(u64, ButtonEdge)>,
    exit_after: u64,
}

impl DemoScript {
    fn new(exit_after: u64) -> Self {
        Self {
            frame: 0,
            taps: vec![
                // Grab whatever sits under the gaze and carry it through the sweep
                (60, ButtonEdge::Down),
                (180, ButtonEdge::Up),
                // Double activation toggles the view mode
                (240, ButtonEdge::Down),
                (242, ButtonEdge::Up),
                (250, ButtonEdge::Down),
                (252, ButtonEdge::Up),
            ],
            exit_after,
        }
    }
}

#[derive(Resource)]
struct LayoutStore(WindowStore);

fn main() -> Result<()> {
    println!("🥽 Gaze Overlay - Starting up...");

    let config_path = EngineConfig::default_path();
    let config = EngineConfig::load_or_default(&config_path);

    let store = WindowStore::new().context("Failed to open window layout store")?;
    let windows = match store.load_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("⚠️  Ignoring unreadable layout at {:?}: {}", store.file_path(), e);
            Vec::new()
        }
    };
    let mut registry = WindowRegistry::from_windows(windows);
    if registry.is_empty() {
        registry.open_window(Some("https://example.com".to_string()));
    }

    let run_frames = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("Frame count must be a positive integer")?
        .unwrap_or(DEFAULT_RUN_FRAMES);

    let tracker = OrientationTracker::new(
        Box::new(SimulatedRotationSensor::default()),
        config.sensor_rate,
    );

    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(config.frame_interval())),
        LogPlugin {
            level: Level::INFO,
            filter: "info,gaze_overlay=debug".to_string(),
            ..default()
        },
    ))
    .insert_resource(registry)
    .insert_resource(tracker)
    .insert_resource(LayoutStore(store))
    .insert_resource(DemoScript::new(run_frames))
    .add_plugins(GazeInteractionPlugin::new(config))
    .add_systems(FixedUpdate, drive_demo_script.before(GazeSet::Interaction))
    .add_systems(Update, log_gaze_events)
    .add_systems(Last, save_layout_on_exit);

    app.run();

    Ok(())
}

fn drive_demo_script(
    mut script: ResMut<DemoScript>,
    mut edges: EventWriter<ButtonEdge>,
    mut exit: EventWriter<AppExit>,
) {
    script.frame += 1;
    let frame = script.frame;

    for (_, edge) in script.taps.iter().filter(|(at, _)| *at == frame) {
        edges.write(*edge);
    }

    if frame == script.exit_after {
        info!("Demo finished after {} frames", frame);
        exit.write(AppExit::Success);
    }
}

fn log_gaze_events(mut events: EventReader<GazeEvent>, frame: Res<ProjectedWindows>) {
    for event in events.read() {
        info!(
            "{:?} (marker at {:.0}, {:.0})",
            event, frame.gaze_marker.x, frame.gaze_marker.y
        );
    }
}

fn save_layout_on_exit(
    mut exits: EventReader<AppExit>,
    mut tracker: ResMut<OrientationTracker>,
    registry: Res<WindowRegistry>,
    store: Res<LayoutStore>,
) {
    if exits.read().next().is_none() {
        return;
    }

    tracker.release();
    if let Err(e) = store.0.save_windows(registry.windows()) {
        error!("❌ Failed to save window layout: {}", e);
    }
}
