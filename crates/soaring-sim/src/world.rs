//! One thermal and the gliders circling in it.

use soaring_controllers::GliderController;
use soaring_core::config::ScenarioConfig;
use soaring_core::error::Result;
use soaring_core::thermal::Thermal;

use crate::glider::Glider;

#[derive(Debug, Clone)]
pub struct World {
    width: f64,
    height: f64,
    thermal: Thermal,
    gliders: Vec<Glider>,
}

impl World {
    pub fn new(width: f64, height: f64, thermal: Thermal, gliders: Vec<Glider>) -> Self {
        Self {
            width,
            height,
            thermal,
            gliders,
        }
    }

    /// Build a world from a scenario, validating it first.
    pub fn from_config(config: &ScenarioConfig) -> Result<Self> {
        config.validate()?;
        let t = config.thermal;
        let thermal = Thermal::new(t.x, t.y, t.max_lift, t.radius)?;
        let gliders = config
            .gliders
            .iter()
            .map(|g| {
                Glider::new(
                    g.start_x,
                    g.start_y,
                    g.color.clone(),
                    g.variometer_lag,
                    GliderController::from_config(&g.controller),
                )
            })
            .collect();
        Ok(Self::new(config.width, config.height, thermal, gliders))
    }

    /// Advance every glider by `dt` simulated seconds. Gliders do not
    /// interact, so the iteration order does not matter.
    pub fn update(&mut self, dt: f64) {
        for glider in &mut self.gliders {
            let lift = self.thermal.lift_at(glider.position());
            glider.update(lift, dt);
        }
    }

    pub fn reset(&mut self) {
        for glider in &mut self.gliders {
            glider.reset();
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn thermal(&self) -> &Thermal {
        &self.thermal
    }

    pub fn gliders(&self) -> &[Glider] {
        &self.gliders
    }

    pub fn glider(&self, index: usize) -> Option<&Glider> {
        self.gliders.get(index)
    }

    pub fn glider_mut(&mut self, index: usize) -> Option<&mut Glider> {
        self.gliders.get_mut(index)
    }
}
