//! Stateless and single-step reactive controllers.

use tracing::debug;

use soaring_core::config::{AdaptiveParams, ReactiveParams, TrendSource};
use soaring_core::enums::Trend;

use crate::controller::GliderContext;

/// Returns the same bank angle regardless of input.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBank {
    bank: f64,
}

impl ConstantBank {
    pub fn new(bank: f64) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> f64 {
        self.bank
    }

    pub fn update(&self) -> f64 {
        self.bank
    }
}

/// Turns lift samples into a lift change rate (m/s²).
#[derive(Debug, Clone, Copy)]
pub struct TrendReader {
    source: TrendSource,
    previous_lift: f64,
}

impl TrendReader {
    pub fn new(source: TrendSource) -> Self {
        Self {
            source,
            previous_lift: 0.0,
        }
    }

    /// Lift change rate, or `None` for a zero-length step.
    ///
    /// `Instantaneous` differentiates the true lift between steps; `Windowed`
    /// reads the change the (lagged) variometer shows over the window.
    pub fn rate(&mut self, ctx: &GliderContext<'_>) -> Option<f64> {
        let previous = std::mem::replace(&mut self.previous_lift, ctx.lift);
        if ctx.dt <= 0.0 {
            return None;
        }
        match self.source {
            TrendSource::Instantaneous => Some((ctx.lift - previous) / ctx.dt),
            TrendSource::Windowed { window_secs } => {
                Some(ctx.variometer.lift_change_over_time(window_secs) / window_secs)
            }
        }
    }

    pub fn reset(&mut self) {
        self.previous_lift = 0.0;
    }
}

/// Banks at `turning_bank` while the trend points one way, `neutral_bank` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdReactive {
    params: ReactiveParams,
    direction: Trend,
    reader: TrendReader,
    banking: bool,
}

impl ThresholdReactive {
    pub fn on_increasing(params: ReactiveParams) -> Self {
        Self::new(params, Trend::Increasing)
    }

    pub fn on_decreasing(params: ReactiveParams) -> Self {
        Self::new(params, Trend::Decreasing)
    }

    fn new(params: ReactiveParams, direction: Trend) -> Self {
        Self {
            params,
            direction,
            reader: TrendReader::new(params.source),
            banking: false,
        }
    }

    pub fn params(&self) -> &ReactiveParams {
        &self.params
    }

    pub fn is_banking(&self) -> bool {
        self.banking
    }

    pub fn update(&mut self, ctx: &GliderContext<'_>) -> f64 {
        let banking = match self.reader.rate(ctx) {
            None => false,
            Some(rate) => Trend::classify(rate, self.params.threshold) == self.direction,
        };
        if banking != self.banking {
            debug!(direction = ?self.direction, banking, "reactive controller switched");
        }
        self.banking = banking;

        if banking {
            self.params.turning_bank
        } else {
            self.params.neutral_bank
        }
    }

    pub fn reset(&mut self) {
        self.reader.reset();
        self.banking = false;
    }

    pub fn state_text(&self) -> &'static str {
        if self.banking {
            "banking"
        } else {
            "notbanking"
        }
    }
}

/// Three-way bank selection from the lagged trend. No memory beyond the
/// current classification.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveBanking {
    params: AdaptiveParams,
    trend: Trend,
}

impl AdaptiveBanking {
    pub fn new(params: AdaptiveParams) -> Self {
        Self {
            params,
            trend: Trend::Neutral,
        }
    }

    pub fn params(&self) -> &AdaptiveParams {
        &self.params
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn update(&mut self, ctx: &GliderContext<'_>) -> f64 {
        let trend = if ctx.dt <= 0.0 {
            Trend::Neutral
        } else {
            let window = self.params.window_secs;
            let rate = ctx.variometer.lift_change_over_time(window) / window;
            Trend::classify(rate, self.params.threshold)
        };
        if trend != self.trend {
            debug!(from = ?self.trend, to = ?trend, "adaptive trend changed");
        }
        self.trend = trend;

        match trend {
            Trend::Increasing => self.params.bank_when_gaining_lift,
            Trend::Neutral => self.params.bank_when_neutral,
            Trend::Decreasing => self.params.bank_when_losing_lift,
        }
    }

    pub fn reset(&mut self) {
        self.trend = Trend::Neutral;
    }

    pub fn state_text(&self) -> &'static str {
        match self.trend {
            Trend::Increasing => "increase",
            Trend::Neutral => "neutral",
            Trend::Decreasing => "decrease",
        }
    }
}
