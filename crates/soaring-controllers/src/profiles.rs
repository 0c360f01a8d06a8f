//! Timing profile of the lag-compensating controller.
//!
//! The phase durations follow from turn geometry. With the vario lagging by
//! `lag` seconds, the glider has already turned `lag * turn_rate(neutral)`
//! degrees past the peak when the instrument shows it. The controller waits
//! for the remaining half circle plus half of what the gentle-bank phase will
//! not cover, then flies `bank_duration_heading` degrees at the gentle bank:
//!
//! ```text
//! delay_heading = 180 - lag * turn_rate(neutral) + (180 - bank_heading) / 2
//! delay_secs    = delay_heading / turn_rate(neutral)
//! bank_secs     = bank_heading / turn_rate(falling)
//! ```

use serde::{Deserialize, Serialize};

use soaring_core::config::{LagCompensationParams, PhaseDurations};
use soaring_core::kinematics::Airframe;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagCompensationProfile {
    /// Bank flown while waiting and delaying (degrees).
    pub neutral_bank: f64,
    /// Bank flown during the banking phase (degrees).
    pub falling_bank: f64,
    pub delay_duration_secs: f64,
    pub bank_duration_secs: f64,
    pub trend_window_secs: f64,
    pub trend_threshold: f64,
}

impl LagCompensationProfile {
    pub fn from_params(params: &LagCompensationParams, airframe: &Airframe) -> Self {
        match params.durations {
            PhaseDurations::Derived => Self::derived(params, airframe),
            PhaseDurations::Fixed {
                delay_secs,
                bank_secs,
            } => Self::fixed(params, delay_secs, bank_secs),
        }
    }

    /// Durations derived from the airframe's turn rates.
    pub fn derived(params: &LagCompensationParams, airframe: &Airframe) -> Self {
        let neutral_rate = airframe.turn_rate_deg(params.neutral_bank).abs();
        let falling_rate = airframe.turn_rate_deg(params.falling_bank).abs();
        let bank_heading = params.bank_duration_heading_deg;

        let delay_heading =
            (180.0 - params.assumed_lag_secs * neutral_rate + (180.0 - bank_heading) / 2.0).max(0.0);

        Self {
            neutral_bank: params.neutral_bank,
            falling_bank: params.falling_bank,
            delay_duration_secs: delay_heading / neutral_rate,
            bank_duration_secs: bank_heading / falling_rate,
            trend_window_secs: params.trend_window_secs,
            trend_threshold: params.trend_threshold,
        }
    }

    pub fn fixed(params: &LagCompensationParams, delay_secs: f64, bank_secs: f64) -> Self {
        Self {
            neutral_bank: params.neutral_bank,
            falling_bank: params.falling_bank,
            delay_duration_secs: delay_secs,
            bank_duration_secs: bank_secs,
            trend_window_secs: params.trend_window_secs,
            trend_threshold: params.trend_threshold,
        }
    }
}

impl Default for LagCompensationProfile {
    fn default() -> Self {
        Self::derived(&LagCompensationParams::default(), &Airframe::default())
    }
}
