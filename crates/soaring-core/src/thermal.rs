//! Static lift field of a single thermal.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// A circular column of rising air. Lift falls off linearly from `max_lift`
/// at the center to zero at `radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thermal {
    center: DVec2,
    max_lift: f64,
    radius: f64,
}

impl Thermal {
    pub fn new(x: f64, y: f64, max_lift: f64, radius: f64) -> Result<Self> {
        if !(max_lift.is_finite() && max_lift > 0.0 && radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidThermal { max_lift, radius });
        }
        Ok(Self {
            center: DVec2::new(x, y),
            max_lift,
            radius,
        })
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn max_lift(&self) -> f64 {
        self.max_lift
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Vertical air speed (m/s) at a point. Always in `[0, max_lift]`.
    pub fn calculate_lift(&self, x: f64, y: f64) -> f64 {
        self.lift_at(DVec2::new(x, y))
    }

    pub fn lift_at(&self, point: DVec2) -> f64 {
        let distance = point.distance(self.center);
        if distance > self.radius {
            return 0.0;
        }
        (self.max_lift * (1.0 - distance / self.radius)).clamp(0.0, self.max_lift)
    }

    /// Distance from the center at which `lift` is found. Inverse of
    /// [`Thermal::calculate_lift`]; used for drawing iso-lift rings.
    pub fn calculate_distance_to_center_from_lift(&self, lift: f64) -> f64 {
        self.radius * (1.0 - lift / self.max_lift)
    }
}
