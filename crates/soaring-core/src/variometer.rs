//! Lagged, interpolated vertical-speed instrument.
//!
//! Samples live in a fixed ring of slots. The slot under the write cursor is
//! overwritten by every new reading and only committed (cursor advanced) once
//! it is more than [`VARIO_COALESCE_INTERVAL_SECS`] newer than the previously
//! committed slot, so sample density does not depend on the caller's step size.
//! Queries only ever walk slots that have been written, newest first.

use crate::constants::{VARIO_BUFFER_CAPACITY, VARIO_COALESCE_INTERVAL_SECS};

#[derive(Debug, Clone, Copy, PartialEq)]
struct VarioSample {
    time: f64,
    lift: f64,
}

#[derive(Debug, Clone)]
pub struct Variometer {
    lag_secs: f64,
    slots: Vec<Option<VarioSample>>,
    /// Slot the next reading is written into.
    cursor: usize,
    /// Slot holding the most recent reading.
    newest: Option<usize>,
    /// Number of slots that have ever been written (at most the capacity).
    written: usize,
    cumulative_time: f64,
}

impl Variometer {
    pub fn new(lag_secs: f64) -> Self {
        Self::with_capacity(lag_secs, VARIO_BUFFER_CAPACITY)
    }

    pub fn with_capacity(lag_secs: f64, capacity: usize) -> Self {
        Self {
            lag_secs: lag_secs.max(0.0),
            slots: vec![None; capacity.max(2)],
            cursor: 0,
            newest: None,
            written: 0,
            cumulative_time: 0.0,
        }
    }

    /// Sensor delay in seconds.
    pub fn lag(&self) -> f64 {
        self.lag_secs
    }

    /// Simulated time seen by the instrument since the last reset.
    pub fn cumulative_time(&self) -> f64 {
        self.cumulative_time
    }

    /// Number of retained samples.
    pub fn sample_count(&self) -> usize {
        self.written
    }

    /// Seconds of history the ring can hold at the coalescing density.
    pub fn retention_secs(&self) -> f64 {
        self.slots.len() as f64 * VARIO_COALESCE_INTERVAL_SECS
    }

    /// Record the true lift flown through during the last `dt` seconds.
    pub fn add_lift_value(&mut self, lift: f64, dt: f64) {
        self.cumulative_time += dt;
        let capacity = self.slots.len();

        if self.slots[self.cursor].is_none() {
            self.written += 1;
        }
        self.slots[self.cursor] = Some(VarioSample {
            time: self.cumulative_time,
            lift,
        });
        self.newest = Some(self.cursor);

        let previous = self.slots[(self.cursor + capacity - 1) % capacity];
        let commit = match previous {
            None => true,
            Some(committed) => {
                committed.time + VARIO_COALESCE_INTERVAL_SECS < self.cumulative_time
            }
        };
        if commit {
            self.cursor = (self.cursor + 1) % capacity;
        }
    }

    /// Reading the pilot sees right now.
    pub fn lift_with_delay(&self) -> f64 {
        self.lift_at_time(self.cumulative_time - self.lag_secs)
    }

    /// Change of the displayed reading over the last `window_secs`. Both ends
    /// are shifted back by the lag, so this is always a trend from the past.
    pub fn lift_change_over_time(&self, window_secs: f64) -> f64 {
        let start = self.cumulative_time - window_secs - self.lag_secs;
        self.lift_with_delay() - self.lift_at_time(start)
    }

    /// Clear all samples and the time accumulator. The lag is kept.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = 0;
        self.newest = None;
        self.written = 0;
        self.cumulative_time = 0.0;
    }

    /// Linearly interpolated lift at `target_time`. Zero when the target is
    /// older than everything retained; the newest value when it is in the future.
    fn lift_at_time(&self, target_time: f64) -> f64 {
        let Some(newest) = self.newest else {
            return 0.0;
        };
        let capacity = self.slots.len();
        let mut newer: Option<VarioSample> = None;

        for back in 0..self.written {
            let Some(sample) = self.slots[(newest + capacity - back) % capacity] else {
                break;
            };
            if sample.time <= target_time {
                return match newer {
                    None => sample.lift,
                    Some(next) => {
                        let span = next.time - sample.time;
                        if span <= 0.0 {
                            next.lift
                        } else {
                            lerp(sample.lift, next.lift, (target_time - sample.time) / span)
                        }
                    }
                };
            }
            newer = Some(sample);
        }

        0.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
