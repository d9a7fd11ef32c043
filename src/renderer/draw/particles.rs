use super::super::canvas::{with_alpha, Canvas};
use crate::config;
use crate::renderer::FieldRenderer;
use crate::state::SimulationState;

impl FieldRenderer {
    /// Draw every particle at its cached color and alpha.
    ///
    /// High energy adds a soft glow under each particle; high coherence adds a
    /// faint echo trailing two frames behind along the velocity.
    pub fn draw_particles(&self, ctx: &mut dyn Canvas, state: &SimulationState) {
        let glow = state.energy > config::GLOW_ENERGY_THRESHOLD;
        let echo = state.coherence > config::ECHO_COHERENCE_THRESHOLD;

        for p in &self.field.particles {
            if glow {
                let reach = p.size * (1.0 + config::GLOW_BLUR_FACTOR);
                ctx.fill_circle(p.pos, reach, with_alpha(p.color, p.alpha * config::GLOW_ALPHA));
            }

            ctx.fill_circle(p.pos, p.size, with_alpha(p.color, p.alpha));

            if echo {
                let behind = p.pos - p.vel * config::ECHO_LAG_FRAMES;
                ctx.fill_circle(behind, p.size * 0.5, with_alpha(p.color, p.alpha * config::ECHO_ALPHA));
            }
        }
    }
}
