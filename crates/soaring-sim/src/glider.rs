//! Glider kinematics: rate-limited bank actuator, coordinated turn, trace.

use std::collections::VecDeque;

use glam::DVec2;
use tracing::{info, warn};

use soaring_controllers::{GliderContext, GliderController};
use soaring_core::constants::{
    INITIAL_HEIGHT, MAX_BANK_RATE_DEG_PER_SEC, MAX_TRACE_POINTS, TRACE_SAMPLE_INTERVAL_SECS,
};
use soaring_core::kinematics::{clamp_bank, Airframe};
use soaring_core::types::TracePoint;
use soaring_core::variometer::Variometer;

#[derive(Debug, Clone)]
pub struct Glider {
    start: DVec2,
    position: DVec2,
    /// Heading in radians, 0 = +x, increasing towards +y.
    heading: f64,
    bank_angle: f64,
    target_bank_angle: f64,
    height: f64,
    lift: f64,
    color: String,
    airframe: Airframe,
    max_bank_rate: f64,
    variometer: Variometer,
    controller: GliderController,
    trace: VecDeque<TracePoint>,
    since_trace: f64,
}

impl Glider {
    pub fn new(
        start_x: f64,
        start_y: f64,
        color: impl Into<String>,
        variometer_lag: f64,
        controller: GliderController,
    ) -> Self {
        let start = DVec2::new(start_x, start_y);
        Self {
            start,
            position: start,
            heading: 0.0,
            bank_angle: 0.0,
            target_bank_angle: 0.0,
            height: INITIAL_HEIGHT,
            lift: 0.0,
            color: color.into(),
            airframe: Airframe::default(),
            max_bank_rate: MAX_BANK_RATE_DEG_PER_SEC,
            variometer: Variometer::new(variometer_lag),
            controller,
            trace: VecDeque::with_capacity(MAX_TRACE_POINTS),
            since_trace: 0.0,
        }
    }

    pub fn with_airframe(mut self, airframe: Airframe) -> Self {
        self.airframe = airframe;
        self
    }

    /// Advance by `dt` simulated seconds through air rising at `lift` m/s.
    pub fn update(&mut self, lift: f64, dt: f64) {
        self.height += dt * lift;
        self.lift = lift;
        self.variometer.add_lift_value(lift, dt);

        let ctx = GliderContext {
            lift,
            dt,
            variometer: &self.variometer,
        };
        let requested = self.controller.update(&ctx);
        let target = clamp_bank(requested);
        if target != requested && target != self.target_bank_angle {
            warn!(requested, clamped = target, "commanded bank angle clamped");
        }
        self.target_bank_angle = target;

        let max_step = (self.max_bank_rate * dt).max(0.0);
        let remaining = target - self.bank_angle;
        if remaining.abs() <= max_step {
            self.bank_angle = target;
        } else {
            self.bank_angle += max_step.copysign(remaining);
        }

        self.heading += self.airframe.turn_rate_rad(self.bank_angle) * dt;
        let distance = self.airframe.speed_ms() * dt;
        self.position += DVec2::new(self.heading.cos(), self.heading.sin()) * distance;

        self.record_trace(dt);
    }

    fn record_trace(&mut self, dt: f64) {
        self.since_trace += dt;
        if !self.trace.is_empty() && self.since_trace < TRACE_SAMPLE_INTERVAL_SECS {
            return;
        }
        self.since_trace = 0.0;
        self.trace.push_back(TracePoint::new(
            self.position.x,
            self.position.y,
            self.bank_angle,
        ));
        while self.trace.len() > MAX_TRACE_POINTS {
            self.trace.pop_front();
        }
    }

    /// Back to the start anchor with a fresh instrument and controller.
    pub fn reset(&mut self) {
        self.position = self.start;
        self.heading = 0.0;
        self.bank_angle = 0.0;
        self.target_bank_angle = 0.0;
        self.height = INITIAL_HEIGHT;
        self.lift = 0.0;
        self.trace.clear();
        self.since_trace = 0.0;
        self.variometer.reset();
        self.controller.reset();
    }

    /// Swap the piloting strategy. The new controller starts from a clean state.
    pub fn set_controller(&mut self, controller: GliderController) {
        info!(
            from = self.controller.title(),
            to = controller.title(),
            "glider controller replaced"
        );
        self.controller = controller;
        self.controller.reset();
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn start(&self) -> DVec2 {
        self.start
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn bank_angle(&self) -> f64 {
        self.bank_angle
    }

    pub fn target_bank_angle(&self) -> f64 {
        self.target_bank_angle
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// True lift flown through on the last update.
    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn airframe(&self) -> &Airframe {
        &self.airframe
    }

    pub fn max_bank_rate(&self) -> f64 {
        self.max_bank_rate
    }

    pub fn variometer(&self) -> &Variometer {
        &self.variometer
    }

    pub fn controller(&self) -> &GliderController {
        &self.controller
    }

    /// Oldest sample first.
    pub fn trace(&self) -> &VecDeque<TracePoint> {
        &self.trace
    }
}
