//! Timed three-phase controller that compensates for variometer lag.
//!
//! The sensed "decreasing" after an "increasing" marks a peak that actually
//! happened `lag` seconds ago. Reacting immediately would widen the circle in
//! the wrong place, so the controller first waits (`Delaying`), then flies the
//! gentle bank for a fixed heading change (`Banking`), then looks for the next
//! peak.

use serde::{Deserialize, Serialize};
use tracing::debug;

use soaring_core::enums::Trend;

use crate::controller::GliderContext;
use crate::profiles::LagCompensationProfile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LagPhase {
    WaitingForPeak { last_trend: Trend },
    Delaying { degrees: f64, elapsed: f64 },
    Banking { degrees: f64, elapsed: f64 },
}

impl Default for LagPhase {
    fn default() -> Self {
        LagPhase::WaitingForPeak {
            last_trend: Trend::Neutral,
        }
    }
}

/// Transition table of the lag-compensating machine.
pub fn advance(phase: LagPhase, trend: Trend, dt: f64, profile: &LagCompensationProfile) -> LagPhase {
    match phase {
        LagPhase::WaitingForPeak { last_trend } => match (last_trend, trend) {
            (Trend::Increasing, Trend::Decreasing) => LagPhase::Delaying {
                degrees: profile.falling_bank,
                elapsed: 0.0,
            },
            // A flat reading on the way over the top does not cancel the peak.
            (Trend::Increasing, Trend::Neutral) => LagPhase::WaitingForPeak {
                last_trend: Trend::Increasing,
            },
            (_, current) => LagPhase::WaitingForPeak {
                last_trend: current,
            },
        },
        LagPhase::Delaying { degrees, elapsed } => {
            let elapsed = elapsed + dt;
            if elapsed >= profile.delay_duration_secs {
                LagPhase::Banking {
                    degrees,
                    elapsed: 0.0,
                }
            } else {
                LagPhase::Delaying { degrees, elapsed }
            }
        }
        LagPhase::Banking { degrees, elapsed } => {
            let elapsed = elapsed + dt;
            if elapsed >= profile.bank_duration_secs {
                LagPhase::WaitingForPeak { last_trend: trend }
            } else {
                LagPhase::Banking { degrees, elapsed }
            }
        }
    }
}

/// Bank angle commanded in a phase.
pub fn bank_for(phase: &LagPhase, profile: &LagCompensationProfile) -> f64 {
    match *phase {
        LagPhase::WaitingForPeak { .. } | LagPhase::Delaying { .. } => profile.neutral_bank,
        LagPhase::Banking { degrees, .. } => degrees,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LagCompensating {
    profile: LagCompensationProfile,
    phase: LagPhase,
}

impl LagCompensating {
    pub fn new(profile: LagCompensationProfile) -> Self {
        Self {
            profile,
            phase: LagPhase::default(),
        }
    }

    pub fn profile(&self) -> &LagCompensationProfile {
        &self.profile
    }

    pub fn phase(&self) -> LagPhase {
        self.phase
    }

    pub fn update(&mut self, ctx: &GliderContext<'_>) -> f64 {
        let window = self.profile.trend_window_secs;
        let rate = ctx.variometer.lift_change_over_time(window) / window;
        let trend = Trend::classify(rate, self.profile.trend_threshold);

        let next = advance(self.phase, trend, ctx.dt, &self.profile);
        if std::mem::discriminant(&next) != std::mem::discriminant(&self.phase) {
            debug!(from = ?self.phase, to = ?next, "lag-compensating phase changed");
        }
        self.phase = next;

        bank_for(&self.phase, &self.profile)
    }

    pub fn reset(&mut self) {
        self.phase = LagPhase::default();
    }

    pub fn state_text(&self) -> String {
        match self.phase {
            LagPhase::WaitingForPeak { last_trend } => {
                format!("waiting({})", trend_label(last_trend))
            }
            LagPhase::Delaying { elapsed, .. } => format!(
                "delaying({elapsed:.1}/{:.1}s)",
                self.profile.delay_duration_secs
            ),
            LagPhase::Banking { elapsed, .. } => format!(
                "banking({elapsed:.1}/{:.1}s)",
                self.profile.bank_duration_secs
            ),
        }
    }
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Increasing => "increasing",
        Trend::Neutral => "neutral",
        Trend::Decreasing => "decreasing",
    }
}
