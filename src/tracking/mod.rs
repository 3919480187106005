//! Head orientation tracking
//!
//! [`OrientationTracker`] owns the sensor subscription and the single-slot
//! pose channel. Samples land from the sensor thread; the frame loop takes the
//! newest one through [`OrientationTracker::latest`].
//!
//! Head position is not tracked. The published position is a fixed stub so a
//! positional source can later push real values through the same sink.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use crossbeam::queue::ArrayQueue;
use serde::{Deserialize, Serialize};

pub mod fusion;
pub mod sensor;

pub use fusion::{quaternion_from_matrix, quaternion_from_rotation_vector, rotation_matrix_from_vector};
pub use sensor::{RotationSensor, SampleSink, SimulatedRotationSensor};

/// Orientation plus (stubbed) position of the head in world space
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HeadPose {
    pub rotation: Quat,
    pub position: Vec3,
}

impl Default for HeadPose {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
        }
    }
}

/// Sampling hint passed to the sensor on subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingRate {
    Fastest,
    /// ~50 Hz, the usual balance between precision and power draw
    #[default]
    Game,
    Ui,
    Normal,
}

impl SamplingRate {
    pub fn interval(self) -> Duration {
        match self {
            SamplingRate::Fastest => Duration::from_millis(5),
            SamplingRate::Game => Duration::from_millis(20),
            SamplingRate::Ui => Duration::from_micros(66_667),
            SamplingRate::Normal => Duration::from_millis(200),
        }
    }

    pub fn hz(self) -> f32 {
        1.0 / self.interval().as_secs_f32()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Stopped,
    Running,
    Released,
}

/// Converts sensor samples into the latest head pose
#[derive(Resource)]
pub struct OrientationTracker {
    sensor: Option<Box<dyn RotationSensor>>,
    rate: SamplingRate,
    slot: Arc<ArrayQueue<HeadPose>>,
    sink: Option<SampleSink>,
    latest: HeadPose,
    state: TrackerState,
}

impl OrientationTracker {
    pub fn new(sensor: Box<dyn RotationSensor>, rate: SamplingRate) -> Self {
        Self {
            sensor: Some(sensor),
            rate,
            slot: Arc::new(ArrayQueue::new(1)),
            sink: None,
            latest: HeadPose::default(),
            state: TrackerState::Stopped,
        }
    }

    /// Tracker with no sensor behind it. Always reports its last pose.
    pub fn inert() -> Self {
        Self {
            sensor: None,
            rate: SamplingRate::default(),
            slot: Arc::new(ArrayQueue::new(1)),
            sink: None,
            latest: HeadPose::default(),
            state: TrackerState::Stopped,
        }
    }

    /// Subscribe to the sensor. A missing or failing sensor leaves the tracker
    /// inert instead of surfacing an error.
    pub fn start(&mut self) {
        if self.state == TrackerState::Running {
            return;
        }

        let Some(sensor) = self.sensor.as_mut() else {
            warn!("No rotation sensor available, orientation stays at last known value");
            return;
        };

        let sink = SampleSink::new(self.slot.clone(), self.latest.position);
        match sensor.subscribe(self.rate, sink.clone()) {
            Ok(()) => {
                info!("Orientation tracking started at ~{:.0} Hz", self.rate.hz());
                self.sink = Some(sink);
                self.state = TrackerState::Running;
            }
            Err(e) => {
                sink.deactivate();
                warn!("Orientation tracking unavailable: {}", e);
            }
        }
    }

    /// Unsubscribe. The last published pose is kept.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.deactivate();
        }
        if let Some(sensor) = self.sensor.as_mut() {
            sensor.unsubscribe();
        }
        // Still Running here, so anything in the slot is applied
        self.drain();

        if self.state == TrackerState::Running {
            info!("Orientation tracking stopped");
            self.state = TrackerState::Stopped;
        }
    }

    /// Stop and drop the sensor handle
    pub fn release(&mut self) {
        self.stop();
        self.sensor = None;
        self.state = TrackerState::Released;
    }

    /// Newest published pose, consuming any pending sample
    pub fn latest(&mut self) -> HeadPose {
        self.drain();
        self.latest
    }

    /// Last consumed pose without touching the slot
    #[inline]
    pub fn snapshot(&self) -> HeadPose {
        self.latest
    }

    #[inline]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == TrackerState::Running
    }

    /// Empty the slot. Samples that land after a stop are discarded.
    fn drain(&mut self) {
        let running = self.state == TrackerState::Running;
        while let Some(pose) = self.slot.pop() {
            if running {
                self.latest = pose;
            } else {
                trace!("Discarding head pose delivered after stop");
            }
        }
    }
}

impl Drop for OrientationTracker {
    fn drop(&mut self) {
        if self.state == TrackerState::Running {
            self.stop();
        }
    }
}
