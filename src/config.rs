// Centralized configuration for the cavity model, particle field and app shell

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CavityError;

// ====================
// Control Parameter Domains
// ====================
pub const MIRROR_ANGLE_RANGE: (f64, f64) = (0.0, 90.0); // degrees
pub const MIRROR_SPACING_RANGE: (f64, f64) = (50.0, 200.0); // nm
pub const MAGNETIC_FIELD_RANGE: (f64, f64) = (0.0, 1.0); // Tesla
pub const FIELD_DIRECTION_RANGE: (f64, f64) = (0.0, 360.0); // degrees

// ====================
// Default Control Parameters
// ====================
pub const DEFAULT_MIRROR_ANGLE: f64 = 45.0;
pub const DEFAULT_MIRROR_SPACING: f64 = 100.0;
pub const DEFAULT_MAGNETIC_FIELD: f64 = 0.5;
pub const DEFAULT_FIELD_DIRECTION: f64 = 0.0;

// ====================
// Cavity Model
// ====================
/// Mirror spacing at which the cavity resonates.
pub const RESONANCE_SPACING_NM: f64 = 100.0;
/// Resonance holds while |spacing - RESONANCE_SPACING_NM| is strictly below this.
pub const RESONANCE_TOLERANCE_NM: f64 = 10.0;
pub const OPTIMAL_MIRROR_ANGLE: f64 = 45.0;
pub const OPTIMAL_ANGLE_TOLERANCE: f64 = 5.0;
/// Energy (μeV) per Tesla before any gain is applied.
pub const ENERGY_PER_TESLA: f64 = 100.0;
pub const RESONANCE_GAIN: f64 = 1.5;
pub const OPTIMAL_ANGLE_GAIN: f64 = 1.3;
pub const COHERENCE_PER_ENERGY: f64 = 0.8;
pub const MAX_COHERENCE: f64 = 100.0;
pub const TOPOLOGICAL_FIELD_THRESHOLD: f64 = 0.7; // strictly greater
pub const TOPOLOGICAL_COHERENCE_THRESHOLD: f64 = 60.0; // strictly greater

// ====================
// Scoring
// ====================
pub const PHASE_ENTERED_POINTS: u64 = 100;

// ====================
// Particle Field
// ====================
pub const MIN_PARTICLES: usize = 50;
pub const CHIRAL_FORCE: f32 = 0.01; // per unit chirality
pub const CHIRAL_WAVENUMBER: f32 = 0.01; // 1/px
pub const MAGNETIC_FORCE: f32 = 0.05; // per Tesla
pub const VELOCITY_DAMPING: f32 = 0.98;
/// Velocity multiplier applied to the component that crossed a wall.
pub const WALL_RESTITUTION: f32 = -0.8;
/// Life value at which a particle is drawn at full alpha.
pub const LIFE_ALPHA_SCALE: f32 = 150.0;
pub const PARTICLE_LIFE_RANGE: std::ops::Range<i32> = 50..150;
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_SPAN: f32 = 3.0; // sizes land in [1, 4)
pub const INITIAL_ALPHA_MIN: f32 = 0.2;
pub const INITIAL_ALPHA_SPAN: f32 = 0.8;

// ====================
// Rendering
// ====================
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400; // fixed regardless of container height
pub const MAX_CANVAS_WIDTH: u32 = 8192;
pub const TRAIL_FADE_ALPHA: f32 = 0.1;
pub const FIELD_LINE_COUNT: usize = 10;
pub const FIELD_LINE_MIN_STRENGTH: f64 = 0.1;
pub const FIELD_LINE_SKEW_PX: f32 = 10.0;
pub const FIELD_ARROW_SIZE: f32 = 5.0;
pub const MIRROR_ANCHOR_X: f32 = 0.2; // fraction of width
pub const MIRROR_LENGTH: f32 = 0.6; // fraction of height
pub const MIRROR_SPACING_SCALE: f32 = 0.3; // fraction of width per 100 nm
pub const MIRROR_WIDTH: f32 = 4.0;
pub const CAVITY_OUTLINE_PAD: f32 = 20.0;
pub const CAVITY_DASH: (f32, f32) = (5.0, 5.0);
pub const GLOW_ENERGY_THRESHOLD: f64 = 50.0;
pub const GLOW_BLUR_FACTOR: f32 = 2.0; // halo reach in particle sizes
pub const GLOW_ALPHA: f32 = 0.25;
pub const ECHO_COHERENCE_THRESHOLD: f64 = 70.0;
pub const ECHO_ALPHA: f32 = 0.3;
pub const ECHO_LAG_FRAMES: f32 = 2.0;
pub const MATERIAL_MARKER_SIZE: f32 = 40.0;
pub const MATERIAL_LABEL_OFFSET: f32 = 15.0;

// ====================
// Frame Loop
// ====================
pub const DEFAULT_FRAME_RATE_HZ: f32 = 60.0;

/// Optional file read at startup; every key may be omitted.
pub const CONFIG_FILE: &str = "cavity_config.toml";

/// Runtime settings for the application shell.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub frame_rate_hz: f32,
    /// Directory that receives JSON, CSV and Markdown exports
    pub export_dir: String,
    /// Seed for particle spawning. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Begin animating as soon as the session starts
    pub autostart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            export_dir: "exports".to_string(),
            seed: None,
            autostart: false,
        }
    }
}

/// Canvas widths beyond the supported maximum are capped.
pub fn clamp_canvas_width(width: u32) -> u32 {
    if width > MAX_CANVAS_WIDTH {
        log::warn!("canvas width {} capped to {}", width, MAX_CANVAS_WIDTH);
        MAX_CANVAS_WIDTH
    } else {
        width
    }
}

impl AppConfig {
    pub fn frame_interval(&self) -> std::time::Duration {
        let hz = if self.frame_rate_hz.is_finite() && self.frame_rate_hz > 0.0 {
            self.frame_rate_hz
        } else {
            DEFAULT_FRAME_RATE_HZ
        };
        std::time::Duration::from_secs_f32(1.0 / hz)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CavityError> {
        Ok(toml::from_str(text)?)
    }

    /// Load the config at `path`, falling back to defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, CavityError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}
