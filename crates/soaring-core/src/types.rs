//! Fundamental simulation value types.

use serde::{Deserialize, Serialize};

/// One sample of a glider's ground track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
    /// Bank angle at the time of the sample (degrees).
    pub bank_angle: f64,
}

impl TracePoint {
    pub fn new(x: f64, y: f64, bank_angle: f64) -> Self {
        Self { x, y, bank_angle }
    }
}
