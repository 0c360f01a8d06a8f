//! Scenario configuration, loadable from JSON.
//!
//! Every struct carries serde defaults so a scenario file only needs the
//! fields it wants to change. `validate()` enforces the ranges the simulation
//! relies on; nothing downstream re-checks them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ControllerKind;
use crate::error::{check_bank, check_duration, check_threshold, ConfigError, Result};

/// How a controller turns variometer readings into a lift change rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrendSource {
    /// Difference of consecutive true lift samples divided by the step.
    Instantaneous,
    /// Displayed change over a window, divided by the window length.
    Windowed { window_secs: f64 },
}

impl Default for TrendSource {
    fn default() -> Self {
        TrendSource::Windowed {
            window_secs: DEFAULT_TREND_WINDOW_SECS,
        }
    }
}

impl TrendSource {
    fn validate(&self) -> Result<()> {
        match *self {
            TrendSource::Instantaneous => Ok(()),
            TrendSource::Windowed { window_secs } if window_secs.is_finite() && window_secs > 0.0 => {
                Ok(())
            }
            TrendSource::Windowed { window_secs } => Err(ConfigError::InvalidWindow(window_secs)),
        }
    }
}

/// Parameters of the single-direction reactive controllers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveParams {
    /// Bank flown while the trend condition holds (degrees).
    pub turning_bank: f64,
    /// Bank flown otherwise (degrees).
    pub neutral_bank: f64,
    /// Dead band on the change rate (m/s²).
    pub threshold: f64,
    pub source: TrendSource,
}

impl Default for ReactiveParams {
    fn default() -> Self {
        Self {
            turning_bank: STEEP_BANK_DEG,
            neutral_bank: SHALLOW_BANK_DEG,
            threshold: REACTIVE_TREND_THRESHOLD,
            source: TrendSource::default(),
        }
    }
}

impl ReactiveParams {
    pub fn validate(&self) -> Result<()> {
        check_bank("turning_bank", self.turning_bank)?;
        check_bank("neutral_bank", self.neutral_bank)?;
        check_threshold("threshold", self.threshold)?;
        self.source.validate()
    }
}

/// Parameters of the three-way adaptive controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveParams {
    pub bank_when_gaining_lift: f64,
    pub bank_when_neutral: f64,
    pub bank_when_losing_lift: f64,
    pub threshold: f64,
    pub window_secs: f64,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            bank_when_gaining_lift: FALLING_BANK_DEG,
            bank_when_neutral: NEUTRAL_BANK_DEG,
            bank_when_losing_lift: STEEP_BANK_DEG,
            threshold: DEFAULT_TREND_THRESHOLD,
            window_secs: DEFAULT_TREND_WINDOW_SECS,
        }
    }
}

impl AdaptiveParams {
    pub fn validate(&self) -> Result<()> {
        check_bank("bank_when_gaining_lift", self.bank_when_gaining_lift)?;
        check_bank("bank_when_neutral", self.bank_when_neutral)?;
        check_bank("bank_when_losing_lift", self.bank_when_losing_lift)?;
        check_threshold("threshold", self.threshold)?;
        if !(self.window_secs.is_finite() && self.window_secs > 0.0) {
            return Err(ConfigError::InvalidWindow(self.window_secs));
        }
        Ok(())
    }
}

/// Parameters of the delay-hold controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayHoldParams {
    pub turning_bank: f64,
    pub neutral_bank: f64,
    /// Seconds to keep turning after the trend stops decreasing.
    pub hold_secs: f64,
    pub threshold: f64,
    pub source: TrendSource,
}

impl Default for DelayHoldParams {
    fn default() -> Self {
        Self {
            turning_bank: STEEP_BANK_DEG,
            neutral_bank: SHALLOW_BANK_DEG,
            hold_secs: DELAY_HOLD_SECS,
            threshold: REACTIVE_TREND_THRESHOLD,
            source: TrendSource::default(),
        }
    }
}

impl DelayHoldParams {
    pub fn validate(&self) -> Result<()> {
        check_bank("turning_bank", self.turning_bank)?;
        check_bank("neutral_bank", self.neutral_bank)?;
        check_duration("hold_secs", self.hold_secs)?;
        check_threshold("threshold", self.threshold)?;
        self.source.validate()
    }
}

/// Where the lag-compensating controller's phase durations come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PhaseDurations {
    /// Derived from turn geometry and the assumed instrument lag.
    Derived,
    /// Explicit durations in seconds.
    Fixed { delay_secs: f64, bank_secs: f64 },
}

/// Parameters of the lag-compensating controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagCompensationParams {
    /// Instrument lag the controller assumes (seconds).
    pub assumed_lag_secs: f64,
    /// Degrees of turn to fly at the falling bank.
    pub bank_duration_heading_deg: f64,
    pub neutral_bank: f64,
    pub falling_bank: f64,
    pub trend_window_secs: f64,
    pub trend_threshold: f64,
    pub durations: PhaseDurations,
}

impl Default for LagCompensationParams {
    fn default() -> Self {
        Self {
            assumed_lag_secs: ASSUMED_VARIO_LAG_SECS,
            bank_duration_heading_deg: BANK_DURATION_HEADING_DEG,
            neutral_bank: NEUTRAL_BANK_DEG,
            falling_bank: FALLING_BANK_DEG,
            trend_window_secs: DEFAULT_TREND_WINDOW_SECS,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            durations: PhaseDurations::Derived,
        }
    }
}

impl LagCompensationParams {
    pub fn validate(&self) -> Result<()> {
        check_bank("neutral_bank", self.neutral_bank)?;
        check_bank("falling_bank", self.falling_bank)?;
        if !(self.assumed_lag_secs.is_finite() && self.assumed_lag_secs >= 0.0) {
            return Err(ConfigError::InvalidVariometerLag(self.assumed_lag_secs));
        }
        if !(self.trend_window_secs.is_finite() && self.trend_window_secs > 0.0) {
            return Err(ConfigError::InvalidWindow(self.trend_window_secs));
        }
        check_threshold("trend_threshold", self.trend_threshold)?;
        if !(self.bank_duration_heading_deg.is_finite() && self.bank_duration_heading_deg > 0.0) {
            return Err(ConfigError::InvalidHeading(self.bank_duration_heading_deg));
        }
        match self.durations {
            PhaseDurations::Fixed {
                delay_secs,
                bank_secs,
            } => {
                check_duration("delay_secs", delay_secs)?;
                check_duration("bank_secs", bank_secs)?;
            }
            // Durations are divided by the turn rate at these banks.
            PhaseDurations::Derived if self.neutral_bank == 0.0 => {
                return Err(ConfigError::InvalidBankAngle {
                    field: "neutral_bank",
                    value: self.neutral_bank,
                });
            }
            PhaseDurations::Derived if self.falling_bank == 0.0 => {
                return Err(ConfigError::InvalidBankAngle {
                    field: "falling_bank",
                    value: self.falling_bank,
                });
            }
            PhaseDurations::Derived => {}
        }
        Ok(())
    }
}

/// Which controller a glider flies with, and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControllerConfig {
    NeverBanking { bank: f64 },
    AlwaysBanking { bank: f64 },
    BankOnIncreasingLift(ReactiveParams),
    BankOnDecreasingLift(ReactiveParams),
    AdaptiveBanking(AdaptiveParams),
    BankOnDecreasingLiftDelay(DelayHoldParams),
    LagCompensating(LagCompensationParams),
}

impl ControllerConfig {
    /// Default parameters for a controller kind.
    pub fn default_for(kind: ControllerKind) -> Self {
        match kind {
            ControllerKind::NeverBanking => ControllerConfig::NeverBanking {
                bank: SHALLOW_BANK_DEG,
            },
            ControllerKind::AlwaysBanking => ControllerConfig::AlwaysBanking {
                bank: NEUTRAL_BANK_DEG,
            },
            ControllerKind::BankOnIncreasingLift => {
                ControllerConfig::BankOnIncreasingLift(ReactiveParams::default())
            }
            ControllerKind::BankOnDecreasingLift => {
                ControllerConfig::BankOnDecreasingLift(ReactiveParams::default())
            }
            ControllerKind::AdaptiveBanking => {
                ControllerConfig::AdaptiveBanking(AdaptiveParams::default())
            }
            ControllerKind::BankOnDecreasingLiftDelay => {
                ControllerConfig::BankOnDecreasingLiftDelay(DelayHoldParams::default())
            }
            ControllerKind::LagCompensating => {
                ControllerConfig::LagCompensating(LagCompensationParams::default())
            }
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            ControllerConfig::NeverBanking { .. } => ControllerKind::NeverBanking,
            ControllerConfig::AlwaysBanking { .. } => ControllerKind::AlwaysBanking,
            ControllerConfig::BankOnIncreasingLift(_) => ControllerKind::BankOnIncreasingLift,
            ControllerConfig::BankOnDecreasingLift(_) => ControllerKind::BankOnDecreasingLift,
            ControllerConfig::AdaptiveBanking(_) => ControllerKind::AdaptiveBanking,
            ControllerConfig::BankOnDecreasingLiftDelay(_) => {
                ControllerKind::BankOnDecreasingLiftDelay
            }
            ControllerConfig::LagCompensating(_) => ControllerKind::LagCompensating,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ControllerConfig::NeverBanking { bank } | ControllerConfig::AlwaysBanking { bank } => {
                check_bank("bank", *bank)
            }
            ControllerConfig::BankOnIncreasingLift(params)
            | ControllerConfig::BankOnDecreasingLift(params) => params.validate(),
            ControllerConfig::AdaptiveBanking(params) => params.validate(),
            ControllerConfig::BankOnDecreasingLiftDelay(params) => params.validate(),
            ControllerConfig::LagCompensating(params) => params.validate(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    pub x: f64,
    pub y: f64,
    pub max_lift: f64,
    pub radius: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            x: PRESET_THERMAL_X,
            y: PRESET_THERMAL_Y,
            max_lift: PRESET_THERMAL_MAX_LIFT,
            radius: PRESET_THERMAL_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GliderConfig {
    pub start_x: f64,
    pub start_y: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub variometer_lag: f64,
    pub controller: ControllerConfig,
}

fn default_color() -> String {
    "#00F".to_string()
}

/// A complete runnable scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub thermal: ThermalConfig,
    pub gliders: Vec<GliderConfig>,
    #[serde(default = "default_time_acceleration")]
    pub time_acceleration: f64,
    #[serde(default)]
    pub max_duration: Option<f64>,
}

fn default_width() -> f64 {
    PRESET_WORLD_WIDTH
}

fn default_height() -> f64 {
    PRESET_WORLD_HEIGHT
}

fn default_time_acceleration() -> f64 {
    PRESET_TIME_ACCELERATION
}

impl ScenarioConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScenarioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let thermal = self.thermal;
        if !(thermal.max_lift.is_finite()
            && thermal.max_lift > 0.0
            && thermal.radius.is_finite()
            && thermal.radius > 0.0)
        {
            return Err(ConfigError::InvalidThermal {
                max_lift: thermal.max_lift,
                radius: thermal.radius,
            });
        }
        if self.gliders.is_empty() {
            return Err(ConfigError::EmptyScenario);
        }
        for glider in &self.gliders {
            if !(glider.variometer_lag.is_finite() && glider.variometer_lag >= 0.0) {
                return Err(ConfigError::InvalidVariometerLag(glider.variometer_lag));
            }
            glider.controller.validate()?;
        }
        if !(self.time_acceleration.is_finite() && self.time_acceleration > 0.0) {
            return Err(ConfigError::InvalidTimeAcceleration(self.time_acceleration));
        }
        if let Some(max_duration) = self.max_duration {
            check_duration("max_duration", max_duration)?;
        }
        Ok(())
    }
}
