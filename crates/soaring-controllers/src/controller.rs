//! Controller dispatch.
//!
//! `GliderController` is a closed set of strategies. Every variant carries
//! only its own decision state; dispatch is a single `match`.

use soaring_core::config::ControllerConfig;
use soaring_core::enums::ControllerKind;
use soaring_core::kinematics::Airframe;
use soaring_core::state::ControllerView;
use soaring_core::variometer::Variometer;

use crate::delay::DelayHold;
use crate::lag_compensating::LagCompensating;
use crate::profiles::LagCompensationProfile;
use crate::reactive::{AdaptiveBanking, ConstantBank, ThresholdReactive};

/// What a controller may observe about its glider for one step.
#[derive(Debug, Clone, Copy)]
pub struct GliderContext<'a> {
    /// True lift at the glider's position (m/s).
    pub lift: f64,
    /// Simulated seconds since the previous step.
    pub dt: f64,
    /// The glider's instrument.
    pub variometer: &'a Variometer,
}

#[derive(Debug, Clone)]
pub enum GliderController {
    NeverBanking(ConstantBank),
    AlwaysBanking(ConstantBank),
    BankOnIncreasingLift(ThresholdReactive),
    BankOnDecreasingLift(ThresholdReactive),
    AdaptiveBanking(AdaptiveBanking),
    BankOnDecreasingLiftDelay(DelayHold),
    LagCompensating(LagCompensating),
}

impl GliderController {
    /// Build a controller from its (already validated) configuration.
    pub fn from_config(config: &ControllerConfig) -> Self {
        match *config {
            ControllerConfig::NeverBanking { bank } => {
                GliderController::NeverBanking(ConstantBank::new(bank))
            }
            ControllerConfig::AlwaysBanking { bank } => {
                GliderController::AlwaysBanking(ConstantBank::new(bank))
            }
            ControllerConfig::BankOnIncreasingLift(params) => {
                GliderController::BankOnIncreasingLift(ThresholdReactive::on_increasing(params))
            }
            ControllerConfig::BankOnDecreasingLift(params) => {
                GliderController::BankOnDecreasingLift(ThresholdReactive::on_decreasing(params))
            }
            ControllerConfig::AdaptiveBanking(params) => {
                GliderController::AdaptiveBanking(AdaptiveBanking::new(params))
            }
            ControllerConfig::BankOnDecreasingLiftDelay(params) => {
                GliderController::BankOnDecreasingLiftDelay(DelayHold::new(params))
            }
            ControllerConfig::LagCompensating(params) => GliderController::LagCompensating(
                LagCompensating::new(LagCompensationProfile::from_params(
                    &params,
                    &Airframe::default(),
                )),
            ),
        }
    }

    /// Decide the target bank angle (degrees) for this step.
    pub fn update(&mut self, ctx: &GliderContext<'_>) -> f64 {
        match self {
            GliderController::NeverBanking(c) | GliderController::AlwaysBanking(c) => c.update(),
            GliderController::BankOnIncreasingLift(c) | GliderController::BankOnDecreasingLift(c) => {
                c.update(ctx)
            }
            GliderController::AdaptiveBanking(c) => c.update(ctx),
            GliderController::BankOnDecreasingLiftDelay(c) => c.update(ctx),
            GliderController::LagCompensating(c) => c.update(ctx),
        }
    }

    /// Forget all decision state.
    pub fn reset(&mut self) {
        match self {
            GliderController::NeverBanking(_) | GliderController::AlwaysBanking(_) => {}
            GliderController::BankOnIncreasingLift(c) | GliderController::BankOnDecreasingLift(c) => {
                c.reset()
            }
            GliderController::AdaptiveBanking(c) => c.reset(),
            GliderController::BankOnDecreasingLiftDelay(c) => c.reset(),
            GliderController::LagCompensating(c) => c.reset(),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            GliderController::NeverBanking(_) => ControllerKind::NeverBanking,
            GliderController::AlwaysBanking(_) => ControllerKind::AlwaysBanking,
            GliderController::BankOnIncreasingLift(_) => ControllerKind::BankOnIncreasingLift,
            GliderController::BankOnDecreasingLift(_) => ControllerKind::BankOnDecreasingLift,
            GliderController::AdaptiveBanking(_) => ControllerKind::AdaptiveBanking,
            GliderController::BankOnDecreasingLiftDelay(_) => {
                ControllerKind::BankOnDecreasingLiftDelay
            }
            GliderController::LagCompensating(_) => ControllerKind::LagCompensating,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GliderController::NeverBanking(_) => "No Banking",
            GliderController::AlwaysBanking(_) => "Full Tilt",
            GliderController::BankOnIncreasingLift(_) => "Bank on Lift Gain",
            GliderController::BankOnDecreasingLift(_) => "Bank on Lift Loss",
            GliderController::AdaptiveBanking(_) => "Adaptive Banking",
            GliderController::BankOnDecreasingLiftDelay(_) => "Hold Bank on Lift Loss",
            GliderController::LagCompensating(_) => "Lag Compensation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GliderController::NeverBanking(_) => {
                "Ignore the vario and hold a moderate bank. Not trying to center, just cruising along."
            }
            GliderController::AlwaysBanking(_) => {
                "Who cares about the vario? Keep a steady bank and hope you're in the thermal!"
            }
            GliderController::BankOnIncreasingLift(_) => {
                "Bank when you feel lift? That's one way to leave a thermal, fast!"
            }
            GliderController::BankOnDecreasingLift(_) => {
                "Turn as soon as you feel the lift dropping. You're basically chasing the core of the thermal."
            }
            GliderController::AdaptiveBanking(_) => {
                "Open the circle while lift builds, tighten it while lift fades, and hold a normal bank otherwise."
            }
            GliderController::BankOnDecreasingLiftDelay(_) => {
                "Turn tight when the vario shows a drop in lift, and keep turning a couple more seconds after it recovers to hug the core."
            }
            GliderController::LagCompensating(_) => {
                "Wait for the vario to show a peak, allow for the instrument lag, then open the circle towards where the core really was."
            }
        }
    }

    /// One-line rule with the configured angles filled in.
    pub fn rule_text(&self) -> String {
        match self {
            GliderController::NeverBanking(c) | GliderController::AlwaysBanking(c) => {
                format!("always bank {:.0}°", c.bank())
            }
            GliderController::BankOnIncreasingLift(c) => format!(
                "bank {:.0}° while lift rises, otherwise {:.0}°",
                c.params().turning_bank,
                c.params().neutral_bank
            ),
            GliderController::BankOnDecreasingLift(c) => format!(
                "bank {:.0}° while lift falls, otherwise {:.0}°",
                c.params().turning_bank,
                c.params().neutral_bank
            ),
            GliderController::AdaptiveBanking(c) => {
                let p = c.params();
                format!(
                    "rising {:.0}°, steady {:.0}°, falling {:.0}°",
                    p.bank_when_gaining_lift, p.bank_when_neutral, p.bank_when_losing_lift
                )
            }
            GliderController::BankOnDecreasingLiftDelay(c) => {
                let p = c.params();
                format!(
                    "bank {:.0}° while lift falls and {:.1}s after, otherwise {:.0}°",
                    p.turning_bank, p.hold_secs, p.neutral_bank
                )
            }
            GliderController::LagCompensating(c) => {
                let p = c.profile();
                format!(
                    "after a peak wait {:.1}s, then bank {:.0}° for {:.1}s, otherwise {:.0}°",
                    p.delay_duration_secs, p.falling_bank, p.bank_duration_secs, p.neutral_bank
                )
            }
        }
    }

    /// Short label of the current decision state.
    pub fn state_text(&self) -> String {
        match self {
            GliderController::NeverBanking(_) => "notbanking".to_string(),
            GliderController::AlwaysBanking(_) => "banking".to_string(),
            GliderController::BankOnIncreasingLift(c) | GliderController::BankOnDecreasingLift(c) => {
                c.state_text().to_string()
            }
            GliderController::AdaptiveBanking(c) => c.state_text().to_string(),
            GliderController::BankOnDecreasingLiftDelay(c) => c.state_text(),
            GliderController::LagCompensating(c) => c.state_text(),
        }
    }

    pub fn view(&self) -> ControllerView {
        ControllerView {
            kind: self.kind(),
            title: self.title().to_string(),
            description: self.description().to_string(),
            rule: self.rule_text(),
            state: self.state_text(),
        }
    }
}
