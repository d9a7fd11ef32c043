pub mod canvas;
pub mod draw;
pub mod raster;

use crate::particle::Particle;
use crate::simulation::FieldSimulation;
use crate::state::SimulationState;
use canvas::Canvas;

/// Particle field plus the per-frame update and draw routine.
pub struct FieldRenderer {
    pub field: FieldSimulation,
    /// Coherence the current pool was seeded for
    seeded_coherence: Option<f64>,
}

impl FieldRenderer {
    /// Create the field and seed its pool for `state`.
    pub fn new(width: f32, height: f32, seed: Option<u64>, state: &SimulationState) -> Self {
        let mut field = FieldSimulation::new(width, height, seed);
        field.reseed(state);
        Self {
            field,
            seeded_coherence: Some(state.coherence),
        }
    }

    /// One animation frame.
    ///
    /// While running, the pool is reseeded if coherence moved since the last
    /// seed, then every particle is stepped. A stopped frame only redraws the
    /// particles where they are. A zero-sized surface makes the whole call a no-op.
    pub fn tick(&mut self, state: &SimulationState, is_running: bool, ctx: &mut dyn Canvas) {
        if ctx.is_empty() {
            return;
        }
        if is_running {
            if self.seeded_coherence != Some(state.coherence) {
                self.field.reseed(state);
                self.seeded_coherence = Some(state.coherence);
            }
            self.field.step(state);
        }
        self.draw(ctx, state);
    }

    /// Canvas resized. Keeps the current particles.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field.resize(width, height);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.field.particles
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }
}

#[cfg(test)]
mod tests;
