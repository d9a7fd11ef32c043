//! One interactive session: control state, scoring, unlocks and the particle field.
//!
//! Every control mutation goes through [`Session::recompute`], which derives a
//! fresh snapshot and settles the side effects of a phase edge (score,
//! material unlock) before achievements are checked.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::achievements::{AchievementId, AchievementTracker};
use crate::config;
use crate::driver::AnimationDriver;
use crate::engine::{self, Derivation, PhaseEvent};
use crate::error::CavityError;
use crate::export::ExportContext;
use crate::material::Material;
use crate::presets::{self, Preset};
use crate::renderer::canvas::Canvas;
use crate::renderer::FieldRenderer;
use crate::state::{ControlParams, Parameter, ParameterValue, SimulationState, StatePatch};
use crate::tutorial::Tutorial;

/// Running totals reported in the JSON export.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub start_time: DateTime<Utc>,
    /// Number of Stopped -> Running transitions
    pub experiments_run: u32,
    pub max_energy: f64,
    pub max_coherence: f64,
}

impl SessionStats {
    pub fn starting_at(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            experiments_run: 0,
            max_energy: 0.0,
            max_coherence: 0.0,
        }
    }

    fn record(&mut self, state: &SimulationState) {
        self.max_energy = self.max_energy.max(state.energy);
        self.max_coherence = self.max_coherence.max(state.coherence);
    }
}

/// Things the shell should tell the user about. Drained after each command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    PhaseEntered { score: u64 },
    MaterialUnlocked(Material),
    AchievementUnlocked(AchievementId),
}

pub struct Session {
    control: ControlParams,
    state: SimulationState,
    score: u64,
    unlocked: BTreeSet<Material>,
    achievements: AchievementTracker,
    stats: SessionStats,
    pub tutorial: Tutorial,
    renderer: FieldRenderer,
    driver: AnimationDriver,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(canvas_width: u32, seed: Option<u64>) -> Self {
        let canvas_width = config::clamp_canvas_width(canvas_width);
        let control = ControlParams::default();
        let state = SimulationState::from_parts(control, engine::derive(&control, false).derived);
        let renderer = FieldRenderer::new(canvas_width as f32, config::CANVAS_HEIGHT as f32, seed, &state);

        let mut session = Self {
            control,
            state,
            score: 0,
            unlocked: Material::INITIALLY_UNLOCKED.into_iter().collect(),
            achievements: AchievementTracker::default(),
            stats: SessionStats::starting_at(Utc::now()),
            tutorial: Tutorial::default(),
            renderer,
            driver: AnimationDriver::default(),
            events: Vec::new(),
        };
        session.recompute();
        session
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn unlocked(&self) -> &BTreeSet<Material> {
        &self.unlocked
    }

    pub fn is_available(&self, material: Material) -> bool {
        material.is_none() || self.unlocked.contains(&material)
    }

    pub fn achievements(&self) -> &AchievementTracker {
        &self.achievements
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn renderer(&self) -> &FieldRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn available_presets(&self) -> impl Iterator<Item = &'static Preset> + '_ {
        presets::PRESETS.iter().filter(|p| p.is_available(&self.unlocked))
    }

    /// Set one control parameter. Locked materials are refused and leave the state untouched.
    pub fn set_parameter(&mut self, parameter: Parameter, value: ParameterValue) -> Result<(), CavityError> {
        if let (Parameter::InsertedMaterial, ParameterValue::Material(material)) = (parameter, value) {
            if !self.is_available(material) {
                return Err(CavityError::MaterialLocked(material));
            }
        }
        self.control.set(parameter, value)?;
        self.recompute();
        Ok(())
    }

    pub fn apply_patch(&mut self, patch: &StatePatch) {
        if patch.is_empty() {
            return;
        }
        patch.apply_to(&mut self.control);
        self.recompute();
    }

    pub fn load_preset(&mut self, id: &str) -> Result<&'static Preset, CavityError> {
        let preset = presets::find(id)?;
        if !preset.is_available(&self.unlocked) {
            return Err(CavityError::PresetLocked {
                preset: preset.id,
                material: preset.material(),
            });
        }
        self.apply_patch(&preset.patch);
        log::info!("Loaded preset '{}'", preset.name);
        Ok(preset)
    }

    pub fn set_running(&mut self, running: bool) {
        if running {
            if self.driver.start().is_some() {
                self.stats.experiments_run += 1;
                log::info!("Simulation started (run {})", self.stats.experiments_run);
            }
        } else if self.driver.is_running() {
            self.driver.stop();
            log::info!("Simulation stopped");
        }
    }

    pub fn toggle_running(&mut self) {
        self.set_running(!self.is_running());
    }

    /// Back to the default controls and stopped. Score, unlocks and achievements persist.
    pub fn reset(&mut self) {
        self.driver.stop();
        self.control = ControlParams::default();
        self.recompute();
        log::info!("Simulation reset");
    }

    /// Container width changed. The height stays fixed and the particle pool is kept.
    /// Returns the width actually applied after capping.
    pub fn resize(&mut self, width: u32) -> u32 {
        let width = config::clamp_canvas_width(width);
        self.renderer.resize(width as f32, config::CANVAS_HEIGHT as f32);
        width
    }

    /// Ignored while the tutorial is hidden.
    pub fn tutorial_next(&mut self) {
        if !self.tutorial.is_visible() {
            return;
        }
        if let Some(patch) = self.tutorial.next() {
            self.apply_patch(&patch);
        }
    }

    pub fn tutorial_restart(&mut self) {
        let patch = self.tutorial.restart();
        self.tutorial.open();
        self.apply_patch(&patch);
    }

    /// Run the pending animation frame, if any. Returns whether a frame ran.
    pub fn frame(&mut self, canvas: &mut dyn Canvas) -> bool {
        if self.driver.begin_frame().is_none() {
            return false;
        }
        self.renderer.tick(&self.state, true, canvas);
        self.driver.end_frame();
        true
    }

    /// Draw the current state without advancing the particles.
    pub fn redraw(&mut self, canvas: &mut dyn Canvas) {
        self.renderer.tick(&self.state, false, canvas);
    }

    pub fn teardown(&mut self) {
        self.driver.teardown();
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn export_context(&self) -> ExportContext<'_> {
        ExportContext {
            state: &self.state,
            score: self.score,
            session: &self.stats,
        }
    }

    fn recompute(&mut self) {
        self.control = self.control.clamped();
        let Derivation { derived, event } = engine::derive(&self.control, self.state.topological_phase);
        self.state = SimulationState::from_parts(self.control, derived);

        if let Some(PhaseEvent::Entered) = event {
            self.score += config::PHASE_ENTERED_POINTS;
            self.events.push(SessionEvent::PhaseEntered { score: self.score });
            if self.unlocked.insert(Material::Bismuthene) {
                self.events.push(SessionEvent::MaterialUnlocked(Material::Bismuthene));
            }
        }

        self.stats.record(&self.state);
        let fresh = self.achievements.evaluate(&self.state, self.score);
        self.events
            .extend(fresh.into_iter().map(SessionEvent::AchievementUnlocked));
    }
}
