use std::time::Instant;
use vacuum_cavity::renderer::canvas::DrawList;
use vacuum_cavity::state::{Parameter, ParameterValue};
use vacuum_cavity::*;

fn main() {
    println!("=== Field Probe ===");

    let mut session = Session::new(config::DEFAULT_CANVAS_WIDTH, Some(1));
    let mut canvas = DrawList::new(config::DEFAULT_CANVAS_WIDTH, config::CANVAS_HEIGHT);

    for (field, material) in [(0.5, material::Material::None), (0.8, material::Material::Graphene)] {
        if let Err(e) = session.set_parameter(Parameter::InsertedMaterial, ParameterValue::Material(material)) {
            println!("  {}", e);
        }
        let _ = session.set_parameter(Parameter::MagneticField, ParameterValue::Number(field));
        let s = session.state();
        println!(
            "B={} material={} -> energy {} coherence {} chirality {} topological {}",
            field, s.inserted_material, s.energy, s.coherence, s.chirality, s.topological_phase
        );

        session.set_running(true);
        let start = Instant::now();
        for _ in 0..300 {
            canvas.clear();
            session.frame(&mut canvas);
        }
        session.set_running(false);

        let particles = session.renderer().particles();
        let mean_alpha = particles.iter().map(|p| p.alpha).sum::<f32>() / particles.len().max(1) as f32;
        let outside = particles
            .iter()
            .filter(|p| p.pos.x < 0.0 || p.pos.x > 800.0 || p.pos.y < 0.0 || p.pos.y > 400.0)
            .count();
        println!(
            "  300 frames in {:.2}ms: {} particles, mean alpha {:.3}, {} out of bounds, {} draw commands",
            start.elapsed().as_secs_f64() * 1000.0,
            particles.len(),
            mean_alpha,
            outside,
            canvas.commands.len()
        );
    }

    println!("Score: {}", session.score());
    for event in session.drain_events() {
        println!("  {:?}", event);
    }
}
