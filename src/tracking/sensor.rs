//! Sensor boundary for orientation tracking
//!
//! Platform sensors deliver samples on their own thread and push them into a
//! [`SampleSink`]. The sink converts each sample and overwrites the single
//! shared slot, so the frame loop only ever sees the newest pose.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use bevy::prelude::*;
use crossbeam::queue::ArrayQueue;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use instant::Instant;

use super::fusion::quaternion_from_rotation_vector;
use super::{HeadPose, SamplingRate};
use crate::error::{TrackingError, TrackingResult};

/// A source of fused rotation-vector samples
pub trait RotationSensor: Send + Sync {
    /// Begin delivering samples into `sink` at roughly `rate`
    fn subscribe(&mut self, rate: SamplingRate, sink: SampleSink) -> TrackingResult<()>;

    /// Stop delivering samples. Must be safe to call when not subscribed.
    ///
    /// Should return only once the producer is done; a sample that still
    /// lands afterwards is discarded by the tracker.
    fn unsubscribe(&mut self);
}

/// Write end of the single-slot pose channel handed to a sensor
#[derive(Clone)]
pub struct SampleSink {
    slot: Arc<ArrayQueue<HeadPose>>,
    active: Arc<AtomicBool>,
    position: Vec3,
}

impl SampleSink {
    pub(crate) fn new(slot: Arc<ArrayQueue<HeadPose>>, position: Vec3) -> Self {
        Self {
            slot,
            active: Arc::new(AtomicBool::new(true)),
            position,
        }
    }

    /// Convert a raw rotation-vector sample and publish it, replacing any
    /// unread pose. Returns false when the sample was dropped.
    pub fn push_rotation_vector(&self, values: &[f32]) -> bool {
        if !self.is_active() {
            return false;
        }

        match quaternion_from_rotation_vector(values) {
            Ok(rotation) => {
                self.slot.force_push(HeadPose {
                    rotation,
                    position: self.position,
                });
                true
            }
            Err(e) => {
                trace!("Dropping rotation sample: {}", e);
                false
            }
        }
    }

    /// Publish an already fused pose
    pub fn push_pose(&self, pose: HeadPose) -> bool {
        if !self.is_active() {
            return false;
        }
        self.slot.force_push(pose);
        true
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Sensor that sweeps the head left and right around the Y axis.
///
/// Stands in for real hardware in the demo binary.
pub struct SimulatedRotationSensor {
    /// Peak heading in radians
    pub amplitude: f32,
    /// Seconds per full sweep
    pub period_secs: f32,
    worker: Option<(Sender<()>, JoinHandle<()>)>,
}

impl SimulatedRotationSensor {
    pub fn new(amplitude: f32, period_secs: f32) -> Self {
        Self {
            amplitude,
            period_secs,
            worker: None,
        }
    }
}

impl Default for SimulatedRotationSensor {
    fn default() -> Self {
        Self::new(0.35, 8.0)
    }
}

impl RotationSensor for SimulatedRotationSensor {
    fn subscribe(&mut self, rate: SamplingRate, sink: SampleSink) -> TrackingResult<()> {
        if self.worker.is_some() {
            return Ok(());
        }

        if self.period_secs <= 0.0 {
            return Err(TrackingError::SubscriptionFailed(format!(
                "sweep period must be positive, got {}",
                self.period_secs
            )));
        }

        let (tx_stop, rx_stop) = bounded::<()>(1);
        let amplitude = self.amplitude;
        let period = self.period_secs;
        let interval = rate.interval();

        let handle = std::thread::Builder::new()
            .name("simulated-rotation-sensor".into())
            .spawn(move || {
                let start = Instant::now();
                loop {
                    let t = start.elapsed().as_secs_f32();
                    let yaw = amplitude * (TAU * t / period).sin();
                    let half = yaw * 0.5;
                    sink.push_rotation_vector(&[0.0, half.sin(), 0.0, half.cos()]);

                    match rx_stop.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        _ => break,
                    }
                }
            })
            .map_err(|e| TrackingError::SubscriptionFailed(e.to_string()))?;

        debug!("Simulated rotation sensor running at ~{} Hz", rate.hz());
        self.worker = Some((tx_stop, handle));
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if let Some((tx_stop, handle)) = self.worker.take() {
            let _ = tx_stop.try_send(());
            if handle.join().is_err() {
                warn!("Simulated rotation sensor thread panicked");
            }
        }
    }
}

impl Drop for SimulatedRotationSensor {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
