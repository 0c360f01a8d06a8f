//! Coordinated-turn kinematics shared by the glider and the controllers.

use serde::{Deserialize, Serialize};

use crate::constants::{GLIDER_SPEED_KMH, GRAVITY, MAX_BANK_ANGLE_DEG};

/// Airframe constants that fix the turn performance of a glider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airframe {
    /// True airspeed (km/h).
    pub speed_kmh: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
}

impl Default for Airframe {
    fn default() -> Self {
        Self {
            speed_kmh: GLIDER_SPEED_KMH,
            gravity: GRAVITY,
        }
    }
}

impl Airframe {
    /// Airspeed in m/s.
    pub fn speed_ms(&self) -> f64 {
        self.speed_kmh * 1000.0 / 3600.0
    }

    /// Turn rate in degrees per second at the given bank angle (degrees).
    /// Zero bank flies straight.
    pub fn turn_rate_deg(&self, bank_deg: f64) -> f64 {
        let bank = clamp_bank(bank_deg).to_radians();
        (self.gravity / self.speed_ms()) * bank.tan() * (180.0 / std::f64::consts::PI)
    }

    /// Turn rate in radians per second at the given bank angle (degrees).
    pub fn turn_rate_rad(&self, bank_deg: f64) -> f64 {
        self.turn_rate_deg(bank_deg).to_radians()
    }

    /// Radius of the circle flown at the given bank angle, in meters.
    /// Infinite for wings-level flight.
    pub fn turn_radius(&self, bank_deg: f64) -> f64 {
        let rate = self.turn_rate_rad(bank_deg);
        if rate == 0.0 {
            return f64::INFINITY;
        }
        self.speed_ms() / rate.abs()
    }
}

/// Clamp a bank angle into the flyable range.
pub fn clamp_bank(bank_deg: f64) -> f64 {
    bank_deg.clamp(-MAX_BANK_ANGLE_DEG, MAX_BANK_ANGLE_DEG)
}
