//! Simulation engine: time acceleration, duration wrap, snapshots.
//!
//! `Simulation` owns the world and is driven with wall-clock deltas. It is
//! completely headless; a renderer only ever sees `SimulationSnapshot`s.

use tracing::info;

use soaring_core::config::ScenarioConfig;
use soaring_core::error::Result;
use soaring_core::state::SimulationSnapshot;

use crate::snapshot::build_snapshot;
use crate::world::World;

#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    time_acceleration: f64,
    max_duration: Option<f64>,
    total_elapsed: f64,
    reset_count: u32,
}

impl Simulation {
    pub fn new(world: World, time_acceleration: f64, max_duration: Option<f64>) -> Self {
        Self {
            world,
            time_acceleration,
            max_duration,
            total_elapsed: 0.0,
            reset_count: 0,
        }
    }

    /// Validate a scenario and build the world it describes.
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        let world = World::from_config(config)?;
        Ok(Self::new(
            world,
            config.time_acceleration,
            config.max_duration,
        ))
    }

    /// Advance by `elapsed_wall` real seconds.
    ///
    /// The world steps by `elapsed_wall * time_acceleration`. When that would
    /// carry the run past `max_duration` the world is reset instead and the
    /// step is dropped.
    pub fn update(&mut self, elapsed_wall: f64) {
        let dt = elapsed_wall * self.time_acceleration;
        self.total_elapsed += dt;

        if let Some(max_duration) = self.max_duration {
            if self.total_elapsed > max_duration {
                info!(
                    max_duration,
                    resets = self.reset_count + 1,
                    "simulation reached max duration, restarting"
                );
                self.reset();
                return;
            }
        }

        self.world.update(dt);
    }

    /// Restart the run: every glider back at its start, clock at zero.
    pub fn reset(&mut self) {
        self.total_elapsed = 0.0;
        self.world.reset();
        self.reset_count += 1;
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        build_snapshot(self)
    }

    /// Simulated seconds since the last reset.
    pub fn total_elapsed(&self) -> f64 {
        self.total_elapsed
    }

    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    pub fn time_acceleration(&self) -> f64 {
        self.time_acceleration
    }

    pub fn set_time_acceleration(&mut self, time_acceleration: f64) {
        self.time_acceleration = time_acceleration;
    }

    pub fn reset_count(&self) -> u32 {
        self.reset_count
    }

    /// Fraction of `max_duration` elapsed, `None` for open-ended runs.
    pub fn progress(&self) -> Option<f64> {
        self.max_duration
            .map(|max| (self.total_elapsed / max).clamp(0.0, 1.0))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
