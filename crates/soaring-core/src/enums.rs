//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Direction of the lift trend as read off the variometer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    #[default]
    Neutral,
    Decreasing,
}

impl Trend {
    /// Classify a lift change rate (m/s²) against a symmetric dead band.
    pub fn classify(rate: f64, threshold: f64) -> Self {
        if rate > threshold {
            Trend::Increasing
        } else if rate < -threshold {
            Trend::Decreasing
        } else {
            Trend::Neutral
        }
    }
}

/// Controller family, used for labeling and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    /// Fixed moderate bank, ignores the vario.
    NeverBanking,
    /// Fixed steep bank, ignores the vario.
    AlwaysBanking,
    /// Steepen when lift is rising.
    BankOnIncreasingLift,
    /// Steepen when lift is falling.
    BankOnDecreasingLift,
    /// Three-way bank selection by trend.
    AdaptiveBanking,
    /// Steepen on falling lift, hold for a moment after it recovers.
    BankOnDecreasingLiftDelay,
    /// Timed wait/delay/bank machine compensating for instrument lag.
    LagCompensating,
}

impl ControllerKind {
    pub const ALL: [ControllerKind; 7] = [
        ControllerKind::NeverBanking,
        ControllerKind::AlwaysBanking,
        ControllerKind::BankOnIncreasingLift,
        ControllerKind::BankOnDecreasingLift,
        ControllerKind::AdaptiveBanking,
        ControllerKind::BankOnDecreasingLiftDelay,
        ControllerKind::LagCompensating,
    ];
}
