//! Errors raised while building a simulation from configuration.
//!
//! Stepping a running simulation never fails; only construction does.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid thermal: max lift {max_lift} and radius {radius} must both be positive")]
    InvalidThermal { max_lift: f64, radius: f64 },

    #[error("invalid bank angle for {field}: {value}° is outside (-90°, 90°)")]
    InvalidBankAngle { field: &'static str, value: f64 },

    #[error("invalid variometer lag: {0}s must be finite and non-negative")]
    InvalidVariometerLag(f64),

    #[error("invalid time acceleration: {0} must be positive")]
    InvalidTimeAcceleration(f64),

    #[error("invalid duration for {field}: {value}s must be positive")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("invalid trend window: {0}s must be positive")]
    InvalidWindow(f64),

    #[error("invalid threshold for {field}: {value} m/s² must be finite and non-negative")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("invalid banking heading change: {0}° must be positive")]
    InvalidHeading(f64),

    #[error("scenario has no gliders")]
    EmptyScenario,

    #[error("scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Check a bank angle lies strictly inside (-90°, 90°).
pub fn check_bank(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value.abs() < 90.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidBankAngle { field, value })
    }
}

/// Check a duration is finite and strictly positive.
pub fn check_duration(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}

/// Check a trend dead band is finite and non-negative.
pub fn check_threshold(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}
