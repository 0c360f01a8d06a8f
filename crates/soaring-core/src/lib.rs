//! Core types and models for the thermalling simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! constants, configuration, snapshot views, and the two leaf models
//! (the thermal lift field and the variometer). It has no dependency on
//! any controller or runtime.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod kinematics;
pub mod state;
pub mod thermal;
pub mod types;
pub mod variometer;

pub use error::ConfigError;
pub use thermal::Thermal;
pub use variometer::Variometer;
