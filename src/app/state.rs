use crossbeam::channel::Sender;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::path::PathBuf;

use crate::achievements::AchievementId;
use crate::error::CavityError;
use crate::export::ExportFormat;
use crate::material::Material;
use crate::phase::PhaseKind;
use crate::session::Session;
use crate::state::{Parameter, ParameterValue, SimulationState, StatePatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TutorialCommand {
    Open,
    Next,
    Previous,
    Skip,
    Restart,
}

// Simulation commands
// Sent to the simulation thread from the console
#[derive(Clone, Debug, PartialEq)]
pub enum SimCommand {
    SetParameter { parameter: Parameter, value: ParameterValue },
    ApplyPatch(StatePatch),
    LoadPreset(String),
    SetRunning(bool),
    ToggleRunning,
    Reset,
    Resize { width: u32 },
    Tutorial(TutorialCommand),
    Export(ExportFormat),
    Snapshot(PathBuf),
    Shutdown,
}

/// Read-only copy of the session published after every command and frame.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub state: SimulationState,
    pub score: u64,
    pub running: bool,
    pub phase: PhaseKind,
    pub unlocked: Vec<Material>,
    pub achievements: Vec<AchievementId>,
    pub achievement_points: u32,
    pub particle_count: usize,
    pub frame: u64,
    pub tutorial_step: Option<usize>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        let state = *session.state();
        Self {
            state,
            score: session.score(),
            running: session.is_running(),
            phase: PhaseKind::classify(&state),
            unlocked: session.unlocked().iter().copied().collect(),
            achievements: session.achievements().unlocked().to_vec(),
            achievement_points: session.achievements().points(),
            particle_count: session.renderer().particle_count(),
            frame: session.renderer().field.frame,
            tutorial_step: session
                .tutorial
                .is_visible()
                .then(|| session.tutorial.current_index()),
        }
    }
}

pub static SIM_COMMAND_SENDER: Lazy<Mutex<Option<Sender<SimCommand>>>> = Lazy::new(|| Mutex::new(None));
pub static SNAPSHOT: Lazy<Mutex<Option<SessionSnapshot>>> = Lazy::new(|| Mutex::new(None));

/// Queue a command for the simulation thread.
pub fn send_command(cmd: SimCommand) -> Result<(), CavityError> {
    let sender = SIM_COMMAND_SENDER.lock().clone().ok_or(CavityError::Disconnected)?;
    sender.send(cmd).map_err(|_| CavityError::Disconnected)
}

pub fn latest_snapshot() -> Option<SessionSnapshot> {
    SNAPSHOT.lock().clone()
}
