use super::super::canvas::{Canvas, Stroke, WHITE};
use crate::config;
use crate::renderer::FieldRenderer;
use crate::state::SimulationState;
use ultraviolet::Vec2;

const MIRROR_COLOR: [u8; 4] = [96, 165, 250, 255]; // #60a5fa
const PHASE_GREEN: [u8; 4] = [16, 185, 129, 255]; // #10b981
const PHASE_GREEN_FILL: [u8; 4] = [16, 185, 129, 204];
const INERT_GRAY: [u8; 4] = [107, 114, 128, 255]; // #6b7280
const INERT_GRAY_FILL: [u8; 4] = [107, 114, 128, 204];

/// Screen-space layout of the two cavity mirrors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CavityGeometry {
    pub left: Vec2,
    pub right: Vec2,
    pub mirror_length: f32,
    /// Horizontal distance between the mirror anchors
    pub spacing: f32,
    /// Mirror tilt in radians
    pub angle: f32,
}

impl CavityGeometry {
    pub fn new(width: f32, height: f32, state: &SimulationState) -> Self {
        let spacing = (state.mirror_spacing as f32 / 100.0) * width * config::MIRROR_SPACING_SCALE;
        let left = Vec2::new(width * config::MIRROR_ANCHOR_X, height * 0.5);
        Self {
            left,
            right: Vec2::new(left.x + spacing, left.y),
            mirror_length: height * config::MIRROR_LENGTH,
            spacing,
            angle: (state.mirror_angle as f32).to_radians(),
        }
    }

    /// End points of a vertical segment through `anchor`, turned by `rotation` (y down).
    fn segment(&self, anchor: Vec2, rotation: f32) -> (Vec2, Vec2) {
        let half = self.mirror_length * 0.5;
        let (sin, cos) = rotation.sin_cos();
        // canvas rotation of (0, ±half)
        let offset = Vec2::new(-half * sin, half * cos);
        (anchor - offset, anchor + offset)
    }

    pub fn left_mirror(&self) -> (Vec2, Vec2) {
        self.segment(self.left, -self.angle)
    }

    pub fn right_mirror(&self) -> (Vec2, Vec2) {
        self.segment(self.right, self.angle)
    }

    /// Outline drawn around the cavity while the topological phase is active.
    pub fn outline(&self) -> (Vec2, Vec2) {
        let pad = config::CAVITY_OUTLINE_PAD;
        let half = self.mirror_length * 0.5;
        (
            Vec2::new(self.left.x - pad, self.left.y - half),
            Vec2::new(self.left.x + self.spacing + pad, self.left.y + half),
        )
    }
}

impl FieldRenderer {
    /// Draw the two tilted mirrors, plus a dashed outline in the topological phase.
    pub fn draw_mirrors(&self, ctx: &mut dyn Canvas, state: &SimulationState) {
        let geometry = CavityGeometry::new(self.field.width, self.field.height, state);
        let stroke = Stroke::solid(MIRROR_COLOR, config::MIRROR_WIDTH);

        let (a, b) = geometry.left_mirror();
        ctx.draw_line(a, b, stroke);
        let (a, b) = geometry.right_mirror();
        ctx.draw_line(a, b, stroke);

        if state.topological_phase {
            let (min, max) = geometry.outline();
            ctx.stroke_rect(min, max, Stroke::dashed(PHASE_GREEN, 2.0, config::CAVITY_DASH));
        }
    }

    /// Draw the inserted material as a labelled square at the canvas center.
    pub fn draw_material(&self, ctx: &mut dyn Canvas, state: &SimulationState) {
        if state.inserted_material.is_none() {
            return;
        }

        let center = Vec2::new(self.field.width * 0.5, self.field.height * 0.5);
        let half = Vec2::broadcast(config::MATERIAL_MARKER_SIZE * 0.5);
        let (fill, edge) = if state.topological_phase {
            (PHASE_GREEN_FILL, PHASE_GREEN)
        } else {
            (INERT_GRAY_FILL, INERT_GRAY)
        };

        ctx.fill_rect(center - half, center + half, fill);
        ctx.stroke_rect(center - half, center + half, Stroke::solid(edge, 2.0));

        let label_at = Vec2::new(center.x, center.y + half.y + config::MATERIAL_LABEL_OFFSET);
        ctx.draw_text(label_at, state.inserted_material.key(), WHITE);
    }
}
