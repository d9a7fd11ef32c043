// simulation/simulation.rs
// Contains the FieldSimulation particle pool and its per-tick update

use super::forces::{self, FieldForces};
use crate::config;
use crate::particle::{chiral_color, Particle};
use crate::state::SimulationState;

/// Particle pool for the vacuum field, in canvas pixel space.
pub struct FieldSimulation {
    pub particles: Vec<Particle>,
    pub width: f32,
    pub height: f32,
    /// Number of physics steps taken since creation
    pub frame: u64,
    rng: fastrand::Rng,
}

/// Pool size for a given coherence: one particle per coherence point, never fewer than the floor.
pub fn particle_count(coherence: f64) -> usize {
    let c = if coherence.is_finite() { coherence.round().max(0.0) } else { 0.0 };
    (c as usize).max(config::MIN_PARTICLES)
}

impl FieldSimulation {
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            particles: Vec::new(),
            width,
            height,
            frame: 0,
            rng,
        }
    }

    /// Discard every particle and spawn a fresh pool sized from the state's coherence.
    pub fn reseed(&mut self, state: &SimulationState) {
        let count = particle_count(state.coherence);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle::spawn(&mut self.rng, self.width, self.height, state);
            self.particles.push(p);
        }
        log::debug!("reseeded field with {} particles (coherence {})", count, state.coherence);
    }

    /// New canvas extent. Particles stay where they are and get pulled in by the next reflection pass.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Advance every particle by one frame under the live `state`.
    ///
    /// Order per particle: chiral drift, magnetic drift, integrate and damp,
    /// wall reflection, aging, respawn on death, recolor.
    pub fn step(&mut self, state: &SimulationState) {
        let forces = FieldForces::from_state(state);
        let coherence = state.coherence as f32 / 100.0;
        let color = chiral_color(state.chirality as f32);
        let (width, height) = (self.width, self.height);

        for p in self.particles.iter_mut() {
            forces::apply_chiral_drift(p, &forces);
            forces::apply_magnetic_drift(p, &forces);
            forces::integrate(p);
            p.reflect(width, height);

            p.life -= 1;
            p.alpha = (p.life as f32 / config::LIFE_ALPHA_SCALE * coherence).max(0.0);

            if p.is_dead() {
                *p = Particle::spawn(&mut self.rng, width, height, state);
            }

            p.color = color;
        }
        self.frame += 1;
    }
}
