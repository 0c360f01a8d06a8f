//! Frame clock for drivers feeding `Simulation::update` from a render loop.

use std::time::Instant;

use soaring_core::constants::MAX_FRAME_DELTA_SECS;

/// Turns successive frame instants into wall-clock deltas.
///
/// The first tick yields 0 and every later delta is clamped to
/// `MAX_FRAME_DELTA_SECS`, so a stalled frame (tab in background, debugger
/// pause) cannot make the world jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_delta(MAX_FRAME_DELTA_SECS)
    }

    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let delta = match self.last {
            Some(previous) => now
                .saturating_duration_since(previous)
                .as_secs_f64()
                .min(self.max_delta),
            None => 0.0,
        };
        self.last = Some(now);
        delta
    }

    /// Forget the previous frame; the next tick yields 0 again.
    pub fn restart(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
