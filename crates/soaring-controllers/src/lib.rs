//! Piloting strategies for the thermalling simulation.
//!
//! Each controller is a small state machine that maps what the pilot senses
//! (the lagged variometer) to a target bank angle. Controllers operate on a
//! borrowed [`GliderContext`] and know nothing about the glider or world types.

pub mod controller;
pub mod delay;
pub mod lag_compensating;
pub mod profiles;
pub mod reactive;

pub use controller::{GliderContext, GliderController};
pub use soaring_core as core;
