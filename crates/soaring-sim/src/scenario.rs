//! Scenario presets and seeded start positions.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use soaring_core::config::{
    ControllerConfig, GliderConfig, LagCompensationParams, ReactiveParams, ScenarioConfig,
    ThermalConfig,
};
use soaring_core::constants::{PRESET_TIME_ACCELERATION, PRESET_WORLD_HEIGHT, PRESET_WORLD_WIDTH};

/// Start used by the single-glider preset, on the thermal's edge.
pub const PRESET_START_X: f64 = 100.0;
pub const PRESET_START_Y: f64 = 150.0;

/// Run length of the strategy comparison before it restarts (simulated seconds).
pub const COMPARISON_DURATION_SECS: f64 = 120.0;

/// One glider in the preset thermal.
pub fn single_glider(controller: ControllerConfig, variometer_lag: f64) -> ScenarioConfig {
    ScenarioConfig {
        width: PRESET_WORLD_WIDTH,
        height: PRESET_WORLD_HEIGHT,
        thermal: ThermalConfig::default(),
        gliders: vec![GliderConfig {
            start_x: PRESET_START_X,
            start_y: PRESET_START_Y,
            color: "#00F".to_string(),
            variometer_lag,
            controller,
        }],
        time_acceleration: PRESET_TIME_ACCELERATION,
        max_duration: None,
    }
}

/// Three strategies flown side by side from the same start with the same
/// 1 s instrument lag.
pub fn strategy_comparison() -> ScenarioConfig {
    let glider = |color: &str, controller| GliderConfig {
        start_x: PRESET_START_X,
        start_y: PRESET_START_Y,
        color: color.to_string(),
        variometer_lag: 1.0,
        controller,
    };

    ScenarioConfig {
        width: PRESET_WORLD_WIDTH,
        height: PRESET_WORLD_HEIGHT,
        thermal: ThermalConfig::default(),
        gliders: vec![
            glider(
                "#F00",
                ControllerConfig::BankOnIncreasingLift(ReactiveParams::default()),
            ),
            glider(
                "#0F0",
                ControllerConfig::BankOnDecreasingLift(ReactiveParams::default()),
            ),
            glider(
                "#00F",
                ControllerConfig::LagCompensating(LagCompensationParams::default()),
            ),
        ],
        time_acceleration: PRESET_TIME_ACCELERATION,
        max_duration: Some(COMPARISON_DURATION_SECS),
    }
}

/// Draw `count` start positions uniformly on the ring `inner..outer` meters
/// around the thermal center. Negative radii count as 0 and the bounds may
/// be given in either order.
pub fn ring_starts<R: Rng>(
    rng: &mut R,
    thermal: &ThermalConfig,
    count: usize,
    inner: f64,
    outer: f64,
) -> Vec<DVec2> {
    let center = DVec2::new(thermal.x, thermal.y);
    let (inner, outer) = (inner.max(0.0), outer.max(0.0));
    let (inner, outer) = if inner <= outer {
        (inner, outer)
    } else {
        (outer, inner)
    };

    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            // Uniform over the annulus area, not over the radius.
            let radius = rng.gen_range(inner * inner..=outer * outer).sqrt();
            center + DVec2::from_angle(angle) * radius
        })
        .collect()
}

/// `base` with every glider replaced by one flying `controller` from `start`.
pub fn trial(base: &ScenarioConfig, controller: ControllerConfig, start: DVec2) -> ScenarioConfig {
    let template = base.gliders.first();
    ScenarioConfig {
        gliders: vec![GliderConfig {
            start_x: start.x,
            start_y: start.y,
            color: template.map_or_else(|| "#00F".to_string(), |g| g.color.clone()),
            variometer_lag: template.map_or(0.0, |g| g.variometer_lag),
            controller,
        }],
        max_duration: None,
        ..base.clone()
    }
}
