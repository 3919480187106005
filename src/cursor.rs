//! Dwell timing for the gaze cursor

use std::time::Duration;

/// Where the gaze cursor is in the dwell cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DwellState {
    Idle,
    Dwelling {
        window_id: String,
        since: Duration,
        /// Activation already emitted for this continuous dwell
        fired: bool,
    },
}

/// Tracks continuous gaze on one window and reports when the threshold passes
#[derive(Debug, Clone)]
pub struct DwellTracker {
    pub threshold: Duration,
    state: DwellState,
}

impl DwellTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            state: DwellState::Idle,
        }
    }

    /// Feed the window currently under the gaze. Returns the window id exactly
    /// once per continuous dwell, on the first update at or past the threshold.
    pub fn update(&mut self, hit: Option<&str>, now: Duration) -> Option<String> {
        let Some(hit_id) = hit else {
            self.state = DwellState::Idle;
            return None;
        };

        if self.target() != Some(hit_id) {
            self.state = DwellState::Dwelling {
                window_id: hit_id.to_string(),
                since: now,
                fired: false,
            };
            return None;
        }

        let threshold = self.threshold;
        if let DwellState::Dwelling {
            window_id,
            since,
            fired,
        } = &mut self.state
        {
            if !*fired && now.saturating_sub(*since) >= threshold {
                *fired = true;
                return Some(window_id.clone());
            }
        }
        None
    }

    pub fn reset(&mut self) {
        self.state = DwellState::Idle;
    }

    #[inline]
    pub fn state(&self) -> &DwellState {
        &self.state
    }

    pub fn target(&self) -> Option<&str> {
        match &self.state {
            DwellState::Dwelling { window_id, .. } => Some(window_id),
            DwellState::Idle => None,
        }
    }

    /// Fraction of the threshold elapsed, for cursor feedback
    pub fn progress(&self, now: Duration) -> f32 {
        match &self.state {
            DwellState::Idle => 0.0,
            DwellState::Dwelling { since, .. } => {
                if self.threshold.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_sub(*since).as_secs_f32();
                (elapsed / self.threshold.as_secs_f32()).min(1.0)
            }
        }
    }
}
