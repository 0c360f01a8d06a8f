//! Snapshot assembly. Read-only: never modifies the simulation.

use soaring_core::state::{GliderView, SimulationSnapshot, ThermalView, WorldView};

use crate::engine::Simulation;
use crate::glider::Glider;

/// Build a complete `SimulationSnapshot` from the current state.
pub fn build_snapshot(sim: &Simulation) -> SimulationSnapshot {
    let world = sim.world();
    let thermal = world.thermal();

    SimulationSnapshot {
        total_elapsed: sim.total_elapsed(),
        max_duration: sim.max_duration(),
        time_acceleration: sim.time_acceleration(),
        reset_count: sim.reset_count(),
        world: WorldView {
            width: world.width(),
            height: world.height(),
        },
        thermal: ThermalView {
            x: thermal.center().x,
            y: thermal.center().y,
            max_lift: thermal.max_lift(),
            radius: thermal.radius(),
        },
        gliders: world.gliders().iter().map(build_glider).collect(),
    }
}

fn build_glider(glider: &Glider) -> GliderView {
    GliderView {
        color: glider.color().to_string(),
        x: glider.x(),
        y: glider.y(),
        heading: glider.heading(),
        bank_angle: glider.bank_angle(),
        target_bank_angle: glider.target_bank_angle(),
        height: glider.height(),
        lift: glider.lift(),
        vario_reading: glider.variometer().lift_with_delay(),
        variometer_lag: glider.variometer().lag(),
        controller: glider.controller().view(),
        trace: glider.trace().iter().copied().collect(),
    }
}
