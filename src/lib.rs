pub mod achievements;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod export;
pub mod material;
pub mod particle;
pub mod phase;
pub mod presets;
pub mod renderer;
pub mod session;
pub mod simulation;
pub mod state;
pub mod tutorial;

pub mod app;

pub use error::CavityError;
pub use session::Session;
pub use state::SimulationState;
