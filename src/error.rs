//! Error types for the application shell.
//!
//! The cavity model and particle field are total functions and never fail.
//! Everything here comes from the edges: user-typed names and values,
//! locked content, config and export I/O, and the simulation thread going away.

use std::fmt;

use crate::material::Material;
use crate::state::Parameter;

#[derive(Debug)]
pub enum CavityError {
    /// No control parameter has this name.
    UnknownParameter(String),
    /// The value kind does not match the parameter (number vs material).
    ParameterType {
        parameter: Parameter,
        expected: &'static str,
    },
    UnknownMaterial(String),
    /// The material has not been unlocked in this session.
    MaterialLocked(Material),
    UnknownPreset(String),
    /// The preset inserts a material that is still locked.
    PresetLocked { preset: &'static str, material: Material },
    /// The simulation thread is no longer receiving commands.
    Disconnected,
    Io(std::io::Error),
    Config(toml::de::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl fmt::Display for CavityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CavityError::UnknownParameter(name) => write!(f, "Unknown parameter '{}'", name),
            CavityError::ParameterType { parameter, expected } => {
                write!(f, "Parameter {} expects {}", parameter, expected)
            }
            CavityError::UnknownMaterial(key) => write!(f, "Unknown material '{}'", key),
            CavityError::MaterialLocked(material) => {
                write!(f, "Material {} is locked", material.display_name())
            }
            CavityError::UnknownPreset(id) => write!(f, "Unknown preset '{}'", id),
            CavityError::PresetLocked { preset, material } => write!(
                f,
                "Preset '{}' needs {} which is locked",
                preset,
                material.display_name()
            ),
            CavityError::Disconnected => write!(f, "Simulation thread is not running"),
            CavityError::Io(e) => write!(f, "I/O error: {}", e),
            CavityError::Config(e) => write!(f, "Invalid config: {}", e),
            CavityError::Json(e) => write!(f, "JSON serialization error: {}", e),
            CavityError::Image(e) => write!(f, "Failed to encode frame: {}", e),
        }
    }
}

impl std::error::Error for CavityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CavityError::Io(e) => Some(e),
            CavityError::Config(e) => Some(e),
            CavityError::Json(e) => Some(e),
            CavityError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CavityError {
    fn from(e: std::io::Error) -> Self {
        CavityError::Io(e)
    }
}

impl From<toml::de::Error> for CavityError {
    fn from(e: toml::de::Error) -> Self {
        CavityError::Config(e)
    }
}

impl From<serde_json::Error> for CavityError {
    fn from(e: serde_json::Error) -> Self {
        CavityError::Json(e)
    }
}

impl From<image::ImageError> for CavityError {
    fn from(e: image::ImageError) -> Self {
        CavityError::Image(e)
    }
}
