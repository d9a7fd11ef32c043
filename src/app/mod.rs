use crate::config::AppConfig;
use crate::error::CavityError;
use crate::session::Session;

pub mod command_loop;
pub mod console;
pub mod simulation_loop;
pub mod state;

use state::{send_command, SimCommand, SIM_COMMAND_SENDER};

/// Start the simulation thread, drive it from stdin, and wait for it to finish.
pub fn run(app: AppConfig) -> Result<(), CavityError> {
    let (tx, rx) = crossbeam::channel::unbounded();
    *SIM_COMMAND_SENDER.lock() = Some(tx);

    let session = Session::new(app.canvas_width, app.seed);
    let autostart = app.autostart;
    log::info!(
        "Starting session: {}x{} canvas at {} Hz, exports to '{}'",
        app.canvas_width,
        crate::config::CANVAS_HEIGHT,
        app.frame_rate_hz,
        app.export_dir
    );

    let handle = std::thread::Builder::new()
        .name("simulation".to_string())
        .spawn(move || simulation_loop::run_simulation_loop(rx, session, app))?;

    if autostart {
        send_command(SimCommand::SetRunning(true))?;
    }

    let console_result = console::run_console(std::io::stdin().lock());

    // Shutdown first, then drop the sender so the loop ends either way
    let _ = send_command(SimCommand::Shutdown);
    SIM_COMMAND_SENDER.lock().take();
    if handle.join().is_err() {
        log::error!("Simulation thread panicked");
        return Err(CavityError::Disconnected);
    }
    console_result
}
