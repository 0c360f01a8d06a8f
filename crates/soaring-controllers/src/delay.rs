//! Bank on falling lift, then hold the bank a little longer once it recovers.
//!
//! Leaving the core shows up late on the vario; holding the turn for a couple
//! of seconds after the trend reverses avoids overshooting past it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use soaring_core::config::DelayHoldParams;
use soaring_core::enums::Trend;

use crate::controller::GliderContext;
use crate::reactive::TrendReader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum DelayHoldState {
    #[default]
    NotBanking,
    Banking,
    /// Still banking after the trend stopped decreasing.
    Holding { elapsed: f64 },
}

/// Transition table of the delay-hold machine.
pub fn next_state(state: DelayHoldState, decreasing: bool, dt: f64, hold_secs: f64) -> DelayHoldState {
    match state {
        DelayHoldState::NotBanking if decreasing => DelayHoldState::Banking,
        DelayHoldState::NotBanking => DelayHoldState::NotBanking,
        DelayHoldState::Banking if decreasing => DelayHoldState::Banking,
        DelayHoldState::Banking => DelayHoldState::Holding { elapsed: 0.0 },
        DelayHoldState::Holding { elapsed } if elapsed <= hold_secs => DelayHoldState::Holding {
            elapsed: elapsed + dt,
        },
        DelayHoldState::Holding { .. } => DelayHoldState::NotBanking,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DelayHold {
    params: DelayHoldParams,
    reader: TrendReader,
    state: DelayHoldState,
}

impl DelayHold {
    pub fn new(params: DelayHoldParams) -> Self {
        Self {
            params,
            reader: TrendReader::new(params.source),
            state: DelayHoldState::NotBanking,
        }
    }

    pub fn params(&self) -> &DelayHoldParams {
        &self.params
    }

    pub fn state(&self) -> DelayHoldState {
        self.state
    }

    pub fn update(&mut self, ctx: &GliderContext<'_>) -> f64 {
        let decreasing = self
            .reader
            .rate(ctx)
            .is_some_and(|rate| Trend::classify(rate, self.params.threshold) == Trend::Decreasing);

        let next = next_state(self.state, decreasing, ctx.dt, self.params.hold_secs);
        if std::mem::discriminant(&next) != std::mem::discriminant(&self.state) {
            debug!(from = ?self.state, to = ?next, "delay-hold state changed");
        }
        self.state = next;

        match self.state {
            DelayHoldState::NotBanking => self.params.neutral_bank,
            DelayHoldState::Banking | DelayHoldState::Holding { .. } => self.params.turning_bank,
        }
    }

    pub fn reset(&mut self) {
        self.reader.reset();
        self.state = DelayHoldState::NotBanking;
    }

    pub fn state_text(&self) -> String {
        match self.state {
            DelayHoldState::NotBanking => "notbanking".to_string(),
            DelayHoldState::Banking => "banking".to_string(),
            DelayHoldState::Holding { elapsed } => format!("holding({elapsed:.2}s)"),
        }
    }
}
