//! Tests for glider kinematics, the world, and the simulation engine.

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use soaring_controllers::{GliderContext, GliderController};
use soaring_core::config::{
    ControllerConfig, DelayHoldParams, LagCompensationParams, ReactiveParams, ScenarioConfig,
    ThermalConfig, TrendSource,
};
use soaring_core::constants::{INITIAL_HEIGHT, MAX_BANK_ANGLE_DEG, MAX_TRACE_POINTS};
use soaring_core::enums::ControllerKind;
use soaring_core::error::ConfigError;
use soaring_core::kinematics::Airframe;
use soaring_core::thermal::Thermal;
use soaring_core::variometer::Variometer;

use crate::clock::FrameClock;
use crate::engine::Simulation;
use crate::glider::Glider;
use crate::scenario;
use crate::world::World;

const DT: f64 = 1.0 / 60.0;

fn glider_with(config: ControllerConfig, lag: f64) -> Glider {
    Glider::new(100.0, 150.0, "#00F", lag, GliderController::from_config(&config))
}

fn preset_world(glider: Glider) -> World {
    let thermal = Thermal::new(300.0, 300.0, 5.0, 250.0).unwrap();
    World::new(600.0, 800.0, thermal, vec![glider])
}

// ---- Glider kinematics ----

#[test]
fn test_circling_in_thermal_gains_height() {
    let glider = glider_with(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    let mut sim = Simulation::new(preset_world(glider), 1.0, None);

    for _ in 0..600 {
        sim.update(DT);
    }

    let glider = &sim.world().gliders()[0];
    assert!(glider.height() > INITIAL_HEIGHT);
    assert_eq!(glider.bank_angle(), 45.0);
    assert_relative_eq!(sim.total_elapsed(), 10.0, epsilon = 1e-9);
}

#[test]
fn test_wings_level_flies_straight() {
    let mut glider = glider_with(ControllerConfig::NeverBanking { bank: 0.0 }, 0.0);

    for _ in 0..60 {
        glider.update(0.0, DT);
    }

    // 90 km/h for one second.
    assert_relative_eq!(glider.x(), 125.0, epsilon = 1e-9);
    assert_relative_eq!(glider.y(), 150.0, epsilon = 1e-9);
    assert_eq!(glider.heading(), 0.0);
    assert_eq!(glider.height(), INITIAL_HEIGHT);
}

#[test]
fn test_airframe_sets_speed_and_turn() {
    let slow = Airframe {
        speed_kmh: 72.0,
        ..Default::default()
    };
    let mut straight = glider_with(ControllerConfig::NeverBanking { bank: 0.0 }, 0.0)
        .with_airframe(slow);
    let mut turning = glider_with(ControllerConfig::AlwaysBanking { bank: 30.0 }, 0.0)
        .with_airframe(slow);
    let mut reference = glider_with(ControllerConfig::AlwaysBanking { bank: 30.0 }, 0.0);

    for _ in 0..60 {
        straight.update(0.0, DT);
        turning.update(0.0, DT);
        reference.update(0.0, DT);
    }

    assert_relative_eq!(straight.x(), 120.0, epsilon = 1e-9);
    assert_eq!(*turning.airframe(), slow);
    // Same bank, lower speed: tighter turn, faster heading change.
    assert!(turning.heading() > reference.heading());
}

#[test]
fn test_height_integrates_lift() {
    let mut glider = glider_with(ControllerConfig::NeverBanking { bank: 0.0 }, 0.0);

    for _ in 0..120 {
        glider.update(2.0, DT);
    }

    assert_relative_eq!(glider.height(), INITIAL_HEIGHT + 4.0, epsilon = 1e-9);
    assert_eq!(glider.lift(), 2.0);
}

#[test]
fn test_bank_rate_is_limited() {
    let reactive = ReactiveParams {
        source: TrendSource::Instantaneous,
        ..Default::default()
    };
    let glider = glider_with(ControllerConfig::BankOnDecreasingLift(reactive), 0.0);
    let mut world = preset_world(glider);
    let steps = [DT, 1.0 / 30.0, 0.1, 0.005, 0.0];

    for i in 0..3000 {
        let dt = steps[i % steps.len()];
        let before = world.gliders()[0].bank_angle();
        world.update(dt);
        let glider = &world.gliders()[0];

        assert!(
            (glider.bank_angle() - before).abs() <= glider.max_bank_rate() * dt + 1e-9,
            "bank moved {} -> {} in {dt}s",
            before,
            glider.bank_angle()
        );
        assert!(glider.target_bank_angle().abs() <= MAX_BANK_ANGLE_DEG);
    }
}

#[test]
fn test_bank_ramps_then_settles_on_target() {
    let mut glider = glider_with(ControllerConfig::AlwaysBanking { bank: 60.0 }, 0.0);

    glider.update(0.0, 1.0);
    assert_relative_eq!(glider.bank_angle(), 20.0, epsilon = 1e-9);
    assert_eq!(glider.target_bank_angle(), 60.0);

    for _ in 0..300 {
        glider.update(0.0, DT);
    }
    assert_eq!(glider.bank_angle(), 60.0);
}

#[test]
fn test_negative_bank_turns_the_other_way() {
    let mut left = glider_with(ControllerConfig::AlwaysBanking { bank: 30.0 }, 0.0);
    let mut right = glider_with(ControllerConfig::AlwaysBanking { bank: -30.0 }, 0.0);

    for _ in 0..120 {
        left.update(0.0, DT);
        right.update(0.0, DT);
    }

    assert!(left.heading() > 0.0);
    assert_relative_eq!(left.heading(), -right.heading(), epsilon = 1e-9);
    assert_relative_eq!(left.y() - 150.0, 150.0 - right.y(), epsilon = 1e-9);
}

#[test]
fn test_commanded_bank_is_clamped() {
    let mut glider = glider_with(ControllerConfig::AlwaysBanking { bank: 95.0 }, 0.0);

    for _ in 0..600 {
        glider.update(0.0, DT);
    }

    assert_eq!(glider.target_bank_angle(), MAX_BANK_ANGLE_DEG);
    assert_eq!(glider.bank_angle(), MAX_BANK_ANGLE_DEG);
    assert!(glider.x().is_finite() && glider.y().is_finite());
}

#[test]
fn test_zero_dt_changes_nothing() {
    let mut glider = glider_with(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    glider.update(1.0, DT);
    let (x, y, height, bank) = (glider.x(), glider.y(), glider.height(), glider.bank_angle());

    glider.update(3.0, 0.0);

    assert_eq!(glider.x(), x);
    assert_eq!(glider.y(), y);
    assert_eq!(glider.height(), height);
    assert_eq!(glider.bank_angle(), bank);
}

#[test]
fn test_lagged_vario_trails_true_lift() {
    let glider = glider_with(ControllerConfig::NeverBanking { bank: 0.0 }, 3.0);
    let mut world = preset_world(glider);

    // Straight east from the thermal edge towards the core.
    for _ in 0..120 {
        world.update(DT);
    }

    let glider = &world.gliders()[0];
    assert!(glider.lift() > 0.0);
    assert!(glider.variometer().lift_with_delay() < glider.lift());
}

// ---- Trace ----

#[test]
fn test_trace_sampled_periodically() {
    let mut glider = glider_with(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);

    glider.update(0.0, DT);
    assert_eq!(glider.trace().len(), 1);

    for _ in 0..599 {
        glider.update(0.0, DT);
    }

    let len = glider.trace().len();
    assert!((40..=51).contains(&len), "{len} trace points after 10s");
    let last = glider.trace().back().unwrap();
    assert_eq!(last.bank_angle, 45.0);
}

#[test]
fn test_trace_is_capped() {
    let mut glider = glider_with(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);

    for _ in 0..(200 * 60) {
        glider.update(0.0, DT);
    }

    assert_eq!(glider.trace().len(), MAX_TRACE_POINTS);
    let last = glider.trace().back().unwrap();
    assert_relative_eq!(last.x, glider.x(), epsilon = 10.0);
}

// ---- Reset and controller swap ----

#[test]
fn test_glider_reset_restores_start() {
    let mut glider = glider_with(
        ControllerConfig::LagCompensating(LagCompensationParams::default()),
        2.0,
    );
    for i in 0..900 {
        glider.update((i as f64 * DT).sin().abs() * 3.0, DT);
    }

    glider.reset();

    assert_eq!(glider.position(), DVec2::new(100.0, 150.0));
    assert_eq!(glider.heading(), 0.0);
    assert_eq!(glider.bank_angle(), 0.0);
    assert_eq!(glider.height(), INITIAL_HEIGHT);
    assert!(glider.trace().is_empty());
    assert_eq!(glider.variometer().sample_count(), 0);
    assert_eq!(glider.controller().state_text(), "waiting(neutral)");
}

#[test]
fn test_set_controller_resets_new_controller() {
    let mut glider = glider_with(ControllerConfig::NeverBanking { bank: 40.0 }, 0.0);

    let mut controller = GliderController::from_config(&ControllerConfig::BankOnDecreasingLiftDelay(
        DelayHoldParams {
            source: TrendSource::Instantaneous,
            ..Default::default()
        },
    ));
    let mut vario = Variometer::new(0.0);
    for lift in [3.0, 2.5, 2.0] {
        vario.add_lift_value(lift, 0.5);
        controller.update(&GliderContext {
            lift,
            dt: 0.5,
            variometer: &vario,
        });
    }
    assert_eq!(controller.state_text(), "banking");

    glider.set_controller(controller);

    assert_eq!(glider.controller().kind(), ControllerKind::BankOnDecreasingLiftDelay);
    assert_eq!(glider.controller().state_text(), "notbanking");
}

// ---- World ----

#[test]
fn test_world_updates_every_glider() {
    let mut sim = Simulation::from_config(&scenario::strategy_comparison()).unwrap();

    sim.update(0.5);

    let world = sim.world();
    assert_eq!(world.gliders().len(), 3);
    for glider in world.gliders() {
        assert_ne!(glider.position(), glider.start());
    }
    assert!(world.glider(3).is_none());
}

#[test]
fn test_world_from_config_rejects_empty() {
    let mut config = scenario::single_glider(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    config.gliders.clear();

    assert!(matches!(
        World::from_config(&config),
        Err(ConfigError::EmptyScenario)
    ));
}

#[test]
fn test_simulation_from_config_rejects_bad_acceleration() {
    let mut config = scenario::single_glider(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    config.time_acceleration = 0.0;

    assert!(matches!(
        Simulation::from_config(&config),
        Err(ConfigError::InvalidTimeAcceleration(_))
    ));
}

// ---- Simulation ----

#[test]
fn test_time_acceleration_scales_steps() {
    let config = scenario::single_glider(ControllerConfig::NeverBanking { bank: 0.0 }, 0.0);
    let mut sim = Simulation::from_config(&config).unwrap();

    sim.update(0.5);

    assert_relative_eq!(sim.total_elapsed(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(sim.world().gliders()[0].x(), 125.0, epsilon = 1e-9);
}

#[test]
fn test_time_acceleration_can_change_mid_run() {
    let config = scenario::single_glider(ControllerConfig::NeverBanking { bank: 0.0 }, 0.0);
    let mut sim = Simulation::from_config(&config).unwrap();

    sim.update(0.5);
    sim.set_time_acceleration(4.0);
    sim.update(0.5);

    assert_eq!(sim.time_acceleration(), 4.0);
    assert_relative_eq!(sim.total_elapsed(), 3.0, epsilon = 1e-12);
    assert_relative_eq!(sim.world().gliders()[0].x(), 175.0, epsilon = 1e-9);
}

#[test]
fn test_duration_wrap_resets_world() {
    let mut config = scenario::single_glider(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    config.time_acceleration = 1.0;
    config.max_duration = Some(1.0);
    let mut sim = Simulation::from_config(&config).unwrap();

    for _ in 0..10 {
        sim.update(0.1);
    }
    assert_eq!(sim.reset_count(), 0);
    assert!(sim.world().gliders()[0].position() != DVec2::new(100.0, 150.0));

    sim.update(0.1);

    assert_eq!(sim.reset_count(), 1);
    assert_eq!(sim.total_elapsed(), 0.0);
    let glider = &sim.world().gliders()[0];
    assert_eq!(glider.position(), DVec2::new(100.0, 150.0));
    assert_eq!(glider.height(), INITIAL_HEIGHT);

    sim.update(0.1);
    assert_relative_eq!(sim.total_elapsed(), 0.1, epsilon = 1e-12);
    assert_eq!(sim.reset_count(), 1);
}

#[test]
fn test_progress_tracks_duration() {
    let mut config = scenario::single_glider(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    config.max_duration = Some(10.0);
    let mut sim = Simulation::from_config(&config).unwrap();

    assert_eq!(sim.progress(), Some(0.0));
    sim.update(1.0);
    assert_relative_eq!(sim.progress().unwrap(), 0.2, epsilon = 1e-12);

    let open = Simulation::from_config(&scenario::single_glider(
        ControllerConfig::AlwaysBanking { bank: 45.0 },
        0.0,
    ))
    .unwrap();
    assert_eq!(open.progress(), None);
}

#[test]
fn test_manual_reset_counts() {
    let config = scenario::single_glider(ControllerConfig::AlwaysBanking { bank: 45.0 }, 0.0);
    let mut sim = Simulation::from_config(&config).unwrap();
    sim.update(1.0);

    sim.reset();

    assert_eq!(sim.reset_count(), 1);
    assert_eq!(sim.total_elapsed(), 0.0);
    assert_eq!(sim.world().gliders()[0].bank_angle(), 0.0);
}

#[test]
fn test_determinism_same_config() {
    let mut sim_a = Simulation::from_config(&scenario::strategy_comparison()).unwrap();
    let mut sim_b = Simulation::from_config(&scenario::strategy_comparison()).unwrap();

    for _ in 0..600 {
        sim_a.update(DT);
        sim_b.update(DT);

        let json_a = serde_json::to_string(&sim_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&sim_b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with the same scenario");
    }
}

#[test]
fn test_snapshot_contents() {
    let mut sim = Simulation::from_config(&scenario::strategy_comparison()).unwrap();
    for _ in 0..120 {
        sim.update(DT);
    }

    let snap = sim.snapshot();

    assert_eq!(snap.world.width, 600.0);
    assert_eq!(snap.world.height, 800.0);
    assert_eq!(snap.thermal.x, 300.0);
    assert_eq!(snap.thermal.radius, 250.0);
    assert_eq!(snap.max_duration, Some(scenario::COMPARISON_DURATION_SECS));
    assert_eq!(snap.gliders.len(), 3);

    let kinds: Vec<_> = snap.gliders.iter().map(|g| g.controller.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ControllerKind::BankOnIncreasingLift,
            ControllerKind::BankOnDecreasingLift,
            ControllerKind::LagCompensating,
        ]
    );
    for (view, glider) in snap.gliders.iter().zip(sim.world().gliders()) {
        assert_eq!(view.x, glider.x());
        assert_eq!(view.height, glider.height());
        assert_eq!(view.variometer_lag, 1.0);
        assert_eq!(view.trace.len(), glider.trace().len());
    }
}

// ---- Frame clock ----

#[test]
fn test_frame_clock_clamps_deltas() {
    let start = Instant::now();
    let mut clock = FrameClock::new();

    assert_eq!(clock.tick(start), 0.0);
    assert_relative_eq!(
        clock.tick(start + Duration::from_millis(50)),
        0.05,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        clock.tick(start + Duration::from_secs(5)),
        0.1,
        epsilon = 1e-12
    );

    clock.restart();
    assert_eq!(clock.tick(start + Duration::from_secs(6)), 0.0);
}

#[test]
fn test_frame_clock_ignores_backwards_time() {
    let start = Instant::now();
    let mut clock = FrameClock::new();
    clock.tick(start + Duration::from_millis(20));

    assert_eq!(clock.tick(start), 0.0);
}

// ---- Scenarios ----

#[test]
fn test_presets_validate() {
    for controller in [
        ControllerConfig::AlwaysBanking { bank: 45.0 },
        ControllerConfig::LagCompensating(LagCompensationParams::default()),
    ] {
        scenario::single_glider(controller, 3.0).validate().unwrap();
    }
    scenario::strategy_comparison().validate().unwrap();
}

#[test]
fn test_preset_round_trips_through_json() {
    let config = scenario::strategy_comparison();
    let json = serde_json::to_string(&config).unwrap();

    assert_eq!(ScenarioConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn test_ring_starts_seeded() {
    let thermal = ThermalConfig::default();
    let mut rng_a = ChaCha8Rng::seed_from_u64(7);
    let mut rng_b = ChaCha8Rng::seed_from_u64(7);

    let a = scenario::ring_starts(&mut rng_a, &thermal, 32, 150.0, 250.0);
    let b = scenario::ring_starts(&mut rng_b, &thermal, 32, 150.0, 250.0);

    assert_eq!(a, b);
    for start in &a {
        let distance = start.distance(DVec2::new(thermal.x, thermal.y));
        assert!((150.0 - 1e-9..=250.0 + 1e-9).contains(&distance));
    }
}

#[test]
fn test_ring_starts_tolerates_odd_bounds() {
    let thermal = ThermalConfig::default();
    let center = DVec2::new(thermal.x, thermal.y);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let negative = scenario::ring_starts(&mut rng, &thermal, 16, -300.0, 100.0);
    let swapped = scenario::ring_starts(&mut rng, &thermal, 16, 250.0, 150.0);

    for start in &negative {
        assert!(start.distance(center) <= 100.0 + 1e-9);
    }
    for start in &swapped {
        let distance = start.distance(center);
        assert!((150.0 - 1e-9..=250.0 + 1e-9).contains(&distance));
    }
}

#[test]
fn test_trial_replaces_gliders() {
    let base = scenario::strategy_comparison();
    let config = scenario::trial(
        &base,
        ControllerConfig::AlwaysBanking { bank: 45.0 },
        DVec2::new(10.0, 20.0),
    );

    assert_eq!(config.gliders.len(), 1);
    assert_eq!(config.gliders[0].start_x, 10.0);
    assert_eq!(config.gliders[0].variometer_lag, 1.0);
    assert_eq!(config.max_duration, None);
    assert_eq!(config.thermal, base.thermal);
    config.validate().unwrap();
}
