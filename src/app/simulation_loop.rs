use crossbeam::channel::{Receiver, RecvTimeoutError};
use std::time::Instant;

use crate::config::{self, AppConfig};
use crate::renderer::raster::RasterCanvas;
use crate::session::{Session, SessionEvent};

use super::command_loop;
use super::state::{SessionSnapshot, SimCommand, SNAPSHOT};

fn publish(session: &Session) {
    *SNAPSHOT.lock() = Some(SessionSnapshot::capture(session));
}

fn report(event: SessionEvent) {
    match event {
        SessionEvent::PhaseEntered { score } => {
            log::info!("Topological phase achieved! +{} points (score {})", config::PHASE_ENTERED_POINTS, score)
        }
        SessionEvent::MaterialUnlocked(material) => {
            log::info!("New material unlocked: {}", material.display_name())
        }
        SessionEvent::AchievementUnlocked(id) => {
            let info = id.info();
            log::info!("Achievement unlocked: {} ({} pts, {:?})", info.name, info.points, info.rarity)
        }
    }
}

/// Own the session until `Shutdown` arrives or every sender is gone, then hand it back.
///
/// Stopped: block on the channel, redraw after each command.
/// Running: wait for a command until the next frame is due, then run it.
pub fn run_simulation_loop(rx: Receiver<SimCommand>, mut session: Session, app: AppConfig) -> Session {
    let mut canvas = RasterCanvas::new(config::clamp_canvas_width(app.canvas_width), config::CANVAS_HEIGHT);
    let interval = app.frame_interval();
    let mut next_frame = Instant::now() + interval;

    session.redraw(&mut canvas);
    session.drain_events().into_iter().for_each(report);
    publish(&session);

    loop {
        let received = if session.is_running() {
            match rx.recv_deadline(next_frame) {
                Ok(cmd) => Some(cmd),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            }
        };

        match received {
            Some(SimCommand::Shutdown) => break,
            Some(cmd) => {
                let was_running = session.is_running();
                command_loop::handle_command(cmd, &mut session, &mut canvas, &app);
                if !session.is_running() {
                    session.redraw(&mut canvas);
                } else if !was_running {
                    next_frame = Instant::now() + interval;
                }
            }
            None => {
                session.frame(&mut canvas);
                // missed frames are dropped
                next_frame = (next_frame + interval).max(Instant::now());
            }
        }

        session.drain_events().into_iter().for_each(report);
        publish(&session);
    }

    session.teardown();
    log::info!("Simulation thread stopped after {} frames", session.renderer().field.frame);
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::latest_snapshot;
    use crossbeam::channel::unbounded;
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use std::thread;
    use std::time::Duration;

    // The loop publishes into a process-wide snapshot
    static SERIAL: Mutex<()> = const_mutex(());

    fn exclusive() -> MutexGuard<'static, ()> {
        let guard = SERIAL.lock();
        *SNAPSHOT.lock() = None;
        guard
    }

    fn fast_app() -> AppConfig {
        AppConfig { canvas_width: 200, frame_rate_hz: 200.0, ..Default::default() }
    }

    fn wait_for(check: impl Fn(&SessionSnapshot) -> bool) -> SessionSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snapshot) = latest_snapshot() {
                if check(&snapshot) {
                    return snapshot;
                }
            }
            assert!(Instant::now() < deadline, "simulation loop did not reach the expected state");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn stop_halts_frames_and_shutdown_ends_loop() {
        let _guard = exclusive();
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || run_simulation_loop(rx, Session::new(200, Some(4)), fast_app()));

        tx.send(SimCommand::SetRunning(true)).unwrap();
        wait_for(|s| s.running && s.frame >= 3);
        tx.send(SimCommand::SetRunning(false)).unwrap();
        let stopped = wait_for(|s| !s.running);

        thread::sleep(Duration::from_millis(100));
        assert_eq!(latest_snapshot().map(|s| s.frame), Some(stopped.frame));

        tx.send(SimCommand::Shutdown).unwrap();
        let session = handle.join().unwrap();
        assert!(!session.is_running());
        assert_eq!(session.renderer().field.frame, stopped.frame);
        // sender still alive, the loop ended on Shutdown alone
        drop(tx);
    }

    #[test]
    fn stopped_loop_blocks_until_sender_drops() {
        let _guard = exclusive();
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || run_simulation_loop(rx, Session::new(200, Some(5)), fast_app()));

        tx.send(SimCommand::Reset).unwrap();
        thread::sleep(Duration::from_millis(100));
        assert!(!handle.is_finished());

        drop(tx);
        let session = handle.join().unwrap();
        assert_eq!(session.renderer().field.frame, 0);
    }

    #[test]
    fn running_loop_exits_when_sender_drops() {
        let _guard = exclusive();
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || run_simulation_loop(rx, Session::new(200, Some(6)), fast_app()));

        tx.send(SimCommand::SetRunning(true)).unwrap();
        wait_for(|s| s.running && s.frame >= 1);
        drop(tx);
        let session = handle.join().unwrap();
        assert!(session.renderer().field.frame >= 1);
    }
}
