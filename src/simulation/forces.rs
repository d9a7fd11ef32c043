//! Per-tick drift forces acting on the vacuum field particles.
//!
//! Forces are rebuilt from the live `SimulationState` every tick, so a
//! parameter change is felt by every particle on the next frame, regardless
//! of the state the particle was spawned under.

use ultraviolet::Vec2;

use crate::config;
use crate::particle::Particle;
use crate::state::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldForces {
    /// Chirality scaled by the chiral coupling
    pub chiral: f32,
    /// Uniform push along the field direction, already scaled by strength
    pub magnetic: Vec2,
}

impl FieldForces {
    pub fn from_state(state: &SimulationState) -> Self {
        let chiral = state.chirality as f32 * config::CHIRAL_FORCE;
        let strength = state.magnetic_field as f32 * config::MAGNETIC_FORCE;
        let theta = (state.field_direction as f32).to_radians();
        Self {
            chiral,
            magnetic: Vec2::new(theta.cos(), theta.sin()) * strength,
        }
    }
}

/// Chiral drift: a position-dependent swirl whose sense follows the chirality sign.
pub fn apply_chiral_drift(p: &mut Particle, forces: &FieldForces) {
    p.vel.x += forces.chiral * (p.pos.y * config::CHIRAL_WAVENUMBER).sin();
    p.vel.y += forces.chiral * (p.pos.x * config::CHIRAL_WAVENUMBER).cos();
}

/// Magnetic drift: constant acceleration along the field direction.
pub fn apply_magnetic_drift(p: &mut Particle, forces: &FieldForces) {
    p.vel += forces.magnetic;
}

/// Move by the current velocity, then damp it.
pub fn integrate(p: &mut Particle) {
    p.pos += p.vel;
    p.vel *= config::VELOCITY_DAMPING;
}
