use super::super::canvas::{with_alpha, Canvas, Stroke};
use crate::config;
use crate::renderer::FieldRenderer;
use crate::state::SimulationState;
use ultraviolet::Vec2;

const FIELD_LINE_COLOR: [u8; 4] = [239, 68, 68, 255];

impl FieldRenderer {
    /// Draw vertical guide lines for the applied magnetic field.
    ///
    /// Lines shift sideways with the cosine of the field direction and carry a
    /// chevron at their midpoint. Opacity equals the field strength. Weak fields
    /// draw nothing.
    pub fn draw_magnetic_field(&self, ctx: &mut dyn Canvas, state: &SimulationState) {
        if state.magnetic_field < config::FIELD_LINE_MIN_STRENGTH {
            return;
        }

        let (width, height) = (self.field.width, self.field.height);
        let direction = (state.field_direction as f32).to_radians();
        let skew = direction.cos() * config::FIELD_LINE_SKEW_PX;
        let stroke = Stroke::solid(with_alpha(FIELD_LINE_COLOR, state.magnetic_field as f32), 1.0);

        let start_y = height * 0.2;
        let end_y = height * 0.8;
        let gap = width / (config::FIELD_LINE_COUNT + 1) as f32;
        let arrow = config::FIELD_ARROW_SIZE;

        for i in 0..config::FIELD_LINE_COUNT {
            let x = gap * (i + 1) as f32 + skew;
            ctx.draw_line(Vec2::new(x, start_y), Vec2::new(x, end_y), stroke);

            let tip = Vec2::new(x, start_y + (end_y - start_y) * 0.5);
            ctx.draw_line(tip, tip + Vec2::new(-arrow, -arrow), stroke);
            ctx.draw_line(tip, tip + Vec2::new(arrow, -arrow), stroke);
        }
    }
}
