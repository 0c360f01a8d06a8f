//! Thermal soaring simulation.
//!
//! Owns gliders and the thermal they fly in, advances them with accelerated
//! wall-clock time, and produces `SimulationSnapshot`s for renderers.

pub mod clock;
pub mod engine;
pub mod glider;
pub mod scenario;
pub mod snapshot;
pub mod world;

pub use clock::FrameClock;
pub use engine::Simulation;
pub use glider::Glider;
pub use soaring_controllers as controllers;
pub use soaring_core as core;
pub use world::World;

#[cfg(test)]
mod tests;
