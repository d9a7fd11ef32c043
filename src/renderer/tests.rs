use super::canvas::{Canvas, DrawCommand, DrawList, WHITE};
use super::draw::CavityGeometry;
use super::raster::RasterCanvas;
use super::FieldRenderer;
use crate::material::Material;
use crate::state::SimulationState;
use ultraviolet::Vec2;

fn renderer_for(state: &SimulationState) -> FieldRenderer {
    FieldRenderer::new(800.0, 400.0, Some(42), state)
}

fn quiet_state() -> SimulationState {
    SimulationState {
        magnetic_field: 0.05,
        energy: 20.0,
        coherence: 40.0,
        chirality: 0.0,
        ..Default::default()
    }
}

#[test]
fn stopped_frame_redraws_without_moving_particles() {
    let state = SimulationState { coherence: 80.0, energy: 90.0, ..Default::default() };
    let mut r = renderer_for(&state);
    let before = r.particles().to_vec();
    let mut list = DrawList::new(800, 400);

    r.tick(&state, false, &mut list);

    assert_eq!(r.particles(), &before[..]);
    assert!(!list.commands.is_empty());
}

#[test]
fn running_frame_moves_particles() {
    let state = SimulationState { coherence: 80.0, energy: 90.0, magnetic_field: 0.6, ..Default::default() };
    let mut r = renderer_for(&state);
    let before = r.particles().to_vec();
    let mut list = DrawList::new(800, 400);

    r.tick(&state, true, &mut list);

    assert_eq!(r.particle_count(), before.len());
    assert_ne!(r.particles(), &before[..]);
}

#[test]
fn zero_sized_surface_is_a_no_op() {
    let state = SimulationState { coherence: 80.0, ..Default::default() };
    let mut r = renderer_for(&state);
    let before = r.particles().to_vec();
    let mut list = DrawList::new(0, 400);

    r.tick(&state, true, &mut list);

    assert!(list.commands.is_empty());
    assert_eq!(r.particles(), &before[..]);
}

#[test]
fn coherence_change_reseeds_on_next_running_tick() {
    let mut state = SimulationState { coherence: 80.0, ..Default::default() };
    let mut r = renderer_for(&state);
    assert_eq!(r.particle_count(), 80);
    let mut list = DrawList::new(800, 400);

    state.coherence = 95.0;
    r.tick(&state, false, &mut list);
    assert_eq!(r.particle_count(), 80, "stopped frames leave the pool alone");

    r.tick(&state, true, &mut list);
    assert_eq!(r.particle_count(), 95);

    state.coherence = 12.0;
    r.tick(&state, true, &mut list);
    assert_eq!(r.particle_count(), 50);
}

#[test]
fn resize_keeps_the_pool() {
    let state = SimulationState { coherence: 70.0, ..Default::default() };
    let mut r = renderer_for(&state);
    let before = r.particles().to_vec();
    r.resize(600.0, 400.0);
    assert_eq!(r.particles(), &before[..]);
    assert_eq!(r.field.width, 600.0);
}

#[test]
fn frame_starts_with_trail_fade() {
    let state = quiet_state();
    let r = renderer_for(&state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &state);

    match &list.commands[0] {
        DrawCommand::FillRect { min, max, color } => {
            assert_eq!(*min, Vec2::zero());
            assert_eq!(*max, Vec2::new(800.0, 400.0));
            assert_eq!(*color, [0, 0, 0, 26]);
        }
        other => panic!("expected fade fill, got {:?}", other),
    }
}

#[test]
fn weak_field_skips_field_lines() {
    let state = quiet_state();
    let r = renderer_for(&state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &state);

    let lines = list.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. })).count();
    // only the two mirrors
    assert_eq!(lines, 2);
}

#[test]
fn strong_field_draws_ten_arrowed_lines() {
    let state = SimulationState { magnetic_field: 0.5, ..quiet_state() };
    let r = renderer_for(&state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &state);

    let red: Vec<_> = list
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line { stroke, .. } if stroke.color[0] == 239 => Some(stroke.color[3]),
            _ => None,
        })
        .collect();
    assert_eq!(red.len(), 30);
    assert!(red.iter().all(|a| *a == 128));
}

#[test]
fn particle_layers_depend_on_energy_and_coherence() {
    let plain = quiet_state();
    let r = renderer_for(&plain);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &plain);
    assert_eq!(list.circles().count(), r.particle_count());

    let lively = SimulationState { energy: 120.0, coherence: 96.0, ..quiet_state() };
    let r = renderer_for(&lively);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &lively);
    // glow, body and echo per particle
    assert_eq!(list.circles().count(), r.particle_count() * 3);
}

#[test]
fn topological_phase_outlines_cavity_and_greens_material() {
    let state = SimulationState {
        topological_phase: true,
        inserted_material: Material::Graphene,
        ..quiet_state()
    };
    let r = renderer_for(&state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &state);

    let dashed = list.commands.iter().any(|c| {
        matches!(c, DrawCommand::StrokeRect { stroke, .. } if stroke.dash.is_some() && stroke.color == [16, 185, 129, 255])
    });
    assert!(dashed);
    let marker = list.commands.iter().any(|c| {
        matches!(c, DrawCommand::FillRect { color, .. } if *color == [16, 185, 129, 204])
    });
    assert!(marker);
    assert_eq!(list.texts().collect::<Vec<_>>(), vec!["graphene"]);
    // material marker is the last layer
    assert!(matches!(list.commands.last(), Some(DrawCommand::Text { .. })));
}

#[test]
fn empty_cavity_has_no_marker() {
    let state = quiet_state();
    let r = renderer_for(&state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, &state);
    assert_eq!(list.texts().count(), 0);
    assert!(!list.commands.iter().any(|c| matches!(c, DrawCommand::StrokeRect { .. })));
}

#[test]
fn mirror_geometry_follows_spacing_and_angle() {
    let state = SimulationState { mirror_spacing: 100.0, mirror_angle: 0.0, ..Default::default() };
    let g = CavityGeometry::new(800.0, 400.0, &state);
    assert_eq!(g.left, Vec2::new(160.0, 200.0));
    assert!((g.right.x - 400.0).abs() < 1e-4);
    let (a, b) = g.left_mirror();
    assert!((a.x - 160.0).abs() < 1e-4 && (b.x - 160.0).abs() < 1e-4);
    assert!((b.y - a.y - 240.0).abs() < 1e-3);

    let tilted = SimulationState { mirror_angle: 90.0, ..state };
    let g = CavityGeometry::new(800.0, 400.0, &tilted);
    let (a, b) = g.left_mirror();
    // a quarter turn lays the mirror flat
    assert!((a.y - b.y).abs() < 1e-3);
    assert!(((b.x - a.x).abs() - 240.0).abs() < 1e-3);
}

fn circles_per_particle(state: &SimulationState) -> usize {
    let r = renderer_for(state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, state);
    list.circles().count() / r.particle_count()
}

fn field_line_count(state: &SimulationState) -> usize {
    let r = renderer_for(state);
    let mut list = DrawList::new(800, 400);
    r.draw(&mut list, state);
    list.commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { stroke, .. } if stroke.color[0] == 239))
        .count()
}

#[test]
fn glow_needs_energy_above_fifty() {
    assert_eq!(circles_per_particle(&SimulationState { energy: 50.0, ..quiet_state() }), 1);
    assert_eq!(circles_per_particle(&SimulationState { energy: 51.0, ..quiet_state() }), 2);
}

#[test]
fn echo_needs_coherence_above_seventy() {
    assert_eq!(circles_per_particle(&SimulationState { coherence: 70.0, ..quiet_state() }), 1);
    assert_eq!(circles_per_particle(&SimulationState { coherence: 71.0, ..quiet_state() }), 2);
}

#[test]
fn field_lines_start_at_a_tenth_of_a_tesla() {
    assert_eq!(field_line_count(&SimulationState { magnetic_field: 0.09, ..quiet_state() }), 0);
    assert_eq!(field_line_count(&SimulationState { magnetic_field: 0.1, ..quiet_state() }), 30);
}

fn white_pixels_under_marker(state: &SimulationState) -> usize {
    let r = renderer_for(state);
    let mut canvas = RasterCanvas::new(800, 400);
    r.draw(&mut canvas, state);
    assert_eq!(canvas.size(), (800, 400));
    // label baseline sits 20 + 15 px below the canvas center
    let mut count = 0;
    for y in 220..240 {
        for x in 340..460 {
            if canvas.pixel(x, y) == Some(WHITE) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn material_label_reaches_raster_frames() {
    let graphene = SimulationState { inserted_material: Material::Graphene, ..quiet_state() };
    assert!(white_pixels_under_marker(&graphene) > 0);
    assert_eq!(white_pixels_under_marker(&quiet_state()), 0);
}
