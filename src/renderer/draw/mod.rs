// Drawing routines split into focused modules

mod cavity;
mod field;
mod particles;

pub use cavity::CavityGeometry;

use super::canvas::{with_alpha, Canvas, BLACK};
use crate::config;
use crate::state::SimulationState;
use ultraviolet::Vec2;

impl super::FieldRenderer {
    /// Compose one frame, back to front: trail fade, field lines, mirrors,
    /// particles, material marker.
    pub fn draw(&self, ctx: &mut dyn Canvas, state: &SimulationState) {
        // Nothing to draw onto
        if ctx.is_empty() {
            return;
        }
        let (width, height) = ctx.size();

        ctx.fill_rect(
            Vec2::zero(),
            Vec2::new(width as f32, height as f32),
            with_alpha(BLACK, config::TRAIL_FADE_ALPHA),
        );

        self.draw_magnetic_field(ctx, state);
        self.draw_mirrors(ctx, state);
        self.draw_particles(ctx, state);
        self.draw_material(ctx, state);
    }
}
