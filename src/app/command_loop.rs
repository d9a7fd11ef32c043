use crate::config::{self, AppConfig};
use crate::export;
use crate::renderer::raster::RasterCanvas;
use crate::session::Session;

use super::state::{SimCommand, TutorialCommand};

/// Apply one command to the session. Refused commands are logged and leave the session as it was.
pub fn handle_command(cmd: SimCommand, session: &mut Session, canvas: &mut RasterCanvas, app: &AppConfig) {
    match cmd {
        SimCommand::SetParameter { parameter, value } => {
            if let Err(e) = session.set_parameter(parameter, value) {
                log::warn!("{}", e);
            }
        }
        SimCommand::ApplyPatch(patch) => session.apply_patch(&patch),
        SimCommand::LoadPreset(id) => {
            if let Err(e) = session.load_preset(&id) {
                log::warn!("{}", e);
            }
        }
        SimCommand::SetRunning(running) => session.set_running(running),
        SimCommand::ToggleRunning => session.toggle_running(),
        SimCommand::Reset => session.reset(),
        SimCommand::Resize { width } => {
            let width = session.resize(width);
            canvas.resize(width, config::CANVAS_HEIGHT);
            log::debug!("Canvas resized to {}x{}", width, config::CANVAS_HEIGHT);
        }
        SimCommand::Tutorial(step) => match step {
            TutorialCommand::Open => session.tutorial.open(),
            TutorialCommand::Next => session.tutorial_next(),
            TutorialCommand::Previous => session.tutorial.previous(),
            TutorialCommand::Skip => session.tutorial.skip(),
            TutorialCommand::Restart => session.tutorial_restart(),
        },
        SimCommand::Export(format) => {
            if let Err(e) = export::write_export(&app.export_dir, format, &session.export_context()) {
                log::error!("Export failed: {}", e);
            }
        }
        SimCommand::Snapshot(path) => match canvas.save_png(&path) {
            Ok(()) => log::info!("Saved frame to {}", path.display()),
            Err(e) => log::error!("Snapshot failed: {}", e),
        },
        // The loop stops before dispatching this
        SimCommand::Shutdown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::state::{Parameter, ParameterValue, StatePatch};

    fn fixture() -> (Session, RasterCanvas, AppConfig) {
        let app = AppConfig::default();
        (Session::new(app.canvas_width, Some(3)), RasterCanvas::new(app.canvas_width, config::CANVAS_HEIGHT), app)
    }

    #[test]
    fn locked_material_leaves_state_untouched() {
        let (mut session, mut canvas, app) = fixture();
        let before = *session.state();
        handle_command(
            SimCommand::SetParameter {
                parameter: Parameter::InsertedMaterial,
                value: ParameterValue::Material(Material::TwistedBilayer),
            },
            &mut session,
            &mut canvas,
            &app,
        );
        assert_eq!(*session.state(), before);
    }

    #[test]
    fn resize_keeps_height_fixed() {
        let (mut session, mut canvas, app) = fixture();
        handle_command(SimCommand::Resize { width: 640 }, &mut session, &mut canvas, &app);
        assert_eq!(canvas.image().dimensions(), (640, 400));
        assert_eq!(session.renderer().field.width, 640.0);
        assert_eq!(session.renderer().field.height, 400.0);
    }

    #[test]
    fn oversized_resize_is_capped() {
        let (mut session, mut canvas, app) = fixture();
        handle_command(SimCommand::Resize { width: u32::MAX }, &mut session, &mut canvas, &app);
        assert_eq!(canvas.image().dimensions(), (config::MAX_CANVAS_WIDTH, 400));
    }

    #[test]
    fn tutorial_opens_on_request() {
        let (mut session, mut canvas, app) = fixture();
        assert!(!session.tutorial.is_visible());
        handle_command(SimCommand::Tutorial(TutorialCommand::Open), &mut session, &mut canvas, &app);
        assert!(session.tutorial.is_visible());
    }

    #[test]
    fn patch_and_toggle() {
        let (mut session, mut canvas, app) = fixture();
        let patch = StatePatch { magnetic_field: Some(0.8), inserted_material: Some(Material::Graphene), ..Default::default() };
        handle_command(SimCommand::ApplyPatch(patch), &mut session, &mut canvas, &app);
        assert!(session.state().topological_phase);

        handle_command(SimCommand::ToggleRunning, &mut session, &mut canvas, &app);
        assert!(session.is_running());
        handle_command(SimCommand::Reset, &mut session, &mut canvas, &app);
        assert!(!session.is_running());
    }
}
