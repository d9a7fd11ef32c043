// material.rs
// Materials that can be inserted into the cavity, and their catalogue text

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CavityError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Material {
    #[default]
    None,
    Graphene,
    Bismuthene,
    TwistedBilayer,
    Phosphorene,
}

#[derive(Clone, Copy, Debug)]
pub struct MaterialProps {
    pub name: &'static str,
    pub description: &'static str,
    pub properties: &'static str,
}

impl Material {
    pub const ALL: [Material; 5] = [
        Material::None,
        Material::Graphene,
        Material::Bismuthene,
        Material::TwistedBilayer,
        Material::Phosphorene,
    ];

    /// Materials a fresh session may insert besides `None`.
    pub const INITIALLY_UNLOCKED: [Material; 1] = [Material::Graphene];

    pub fn key(&self) -> &'static str {
        match self {
            Material::None => "none",
            Material::Graphene => "graphene",
            Material::Bismuthene => "bismuthene",
            Material::TwistedBilayer => "twisted-bilayer",
            Material::Phosphorene => "phosphorene",
        }
    }

    pub fn props(&self) -> MaterialProps {
        match self {
            Material::None => MaterialProps {
                name: "No Material",
                description: "Empty cavity",
                properties: "Baseline state",
            },
            Material::Graphene => MaterialProps {
                name: "Graphene",
                description: "Single layer carbon atoms",
                properties: "High conductivity, Dirac fermions",
            },
            Material::Bismuthene => MaterialProps {
                name: "Bismuthene",
                description: "Topological insulator",
                properties: "Spin-orbit coupling, edge states",
            },
            Material::TwistedBilayer => MaterialProps {
                name: "Twisted Bilayer",
                description: "Magic angle graphene",
                properties: "Superconductivity, flat bands",
            },
            Material::Phosphorene => MaterialProps {
                name: "Phosphorene",
                description: "Black phosphorus monolayer",
                properties: "Anisotropic transport",
            },
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.props().name
    }

    pub fn is_none(&self) -> bool {
        *self == Material::None
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Material {
    type Err = CavityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.key() == key || m.key().replace('-', "_") == key)
            .ok_or_else(|| CavityError::UnknownMaterial(s.to_string()))
    }
}
