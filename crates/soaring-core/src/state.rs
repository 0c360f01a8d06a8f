//! Simulation snapshot: the read-only view handed to renderers.

use serde::{Deserialize, Serialize};

use crate::enums::ControllerKind;
use crate::types::TracePoint;

/// Complete visible state after an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    /// Simulated seconds since the last reset.
    pub total_elapsed: f64,
    pub max_duration: Option<f64>,
    pub time_acceleration: f64,
    /// Number of resets since construction.
    pub reset_count: u32,
    pub world: WorldView,
    pub thermal: ThermalView,
    pub gliders: Vec<GliderView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldView {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThermalView {
    pub x: f64,
    pub y: f64,
    pub max_lift: f64,
    pub radius: f64,
}

/// Per-glider state for instruments and the overhead view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GliderView {
    pub color: String,
    pub x: f64,
    pub y: f64,
    /// Heading (radians).
    pub heading: f64,
    /// Actuated bank angle (degrees).
    pub bank_angle: f64,
    /// Bank angle requested by the controller (degrees).
    pub target_bank_angle: f64,
    /// Altitude (meters).
    pub height: f64,
    /// True lift at the glider's position (m/s).
    pub lift: f64,
    /// What the variometer currently displays (m/s).
    pub vario_reading: f64,
    pub variometer_lag: f64,
    pub controller: ControllerView,
    pub trace: Vec<TracePoint>,
}

/// Descriptive labels of a controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerView {
    pub kind: ControllerKind,
    pub title: String,
    pub description: String,
    /// One-line decision rule.
    pub rule: String,
    pub state: String,
}
