// presets.rs
// Built-in parameter presets loaded through the patch entry point

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::CavityError;
use crate::material::Material;
use crate::state::StatePatch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub patch: StatePatch,
}

const fn full_patch(angle: f64, spacing: f64, field: f64, direction: f64, material: Material) -> StatePatch {
    StatePatch {
        mirror_angle: Some(angle),
        mirror_spacing: Some(spacing),
        magnetic_field: Some(field),
        field_direction: Some(direction),
        inserted_material: Some(material),
    }
}

pub const PRESETS: [Preset; 4] = [
    Preset {
        id: "resonance",
        name: "Perfect Resonance",
        description: "Achieve optimal cavity resonance conditions",
        difficulty: Difficulty::Beginner,
        patch: full_patch(45.0, 100.0, 0.5, 0.0, Material::None),
    },
    Preset {
        id: "graphene-basic",
        name: "Graphene Introduction",
        description: "Basic graphene quantum effects",
        difficulty: Difficulty::Beginner,
        patch: full_patch(42.0, 95.0, 0.6, 30.0, Material::Graphene),
    },
    Preset {
        id: "topological",
        name: "Topological Phase",
        description: "Create topological quantum states",
        difficulty: Difficulty::Intermediate,
        patch: full_patch(47.0, 105.0, 0.8, 45.0, Material::Graphene),
    },
    Preset {
        id: "advanced-chiral",
        name: "Advanced Chirality",
        description: "Maximum chiral quantum effects",
        difficulty: Difficulty::Advanced,
        patch: full_patch(50.0, 110.0, 0.9, 90.0, Material::Bismuthene),
    },
];

impl Preset {
    pub fn material(&self) -> Material {
        self.patch.inserted_material.unwrap_or(Material::None)
    }

    /// A preset can be loaded once its material is unlocked. Empty cavities always can.
    pub fn is_available(&self, unlocked: &BTreeSet<Material>) -> bool {
        let material = self.material();
        material.is_none() || unlocked.contains(&material)
    }
}

pub fn find(id: &str) -> Result<&'static Preset, CavityError> {
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| CavityError::UnknownPreset(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_follows_unlocks() {
        let mut unlocked: BTreeSet<Material> = Material::INITIALLY_UNLOCKED.into_iter().collect();
        let available: Vec<_> = PRESETS.iter().filter(|p| p.is_available(&unlocked)).map(|p| p.id).collect();
        assert_eq!(available, vec!["resonance", "graphene-basic", "topological"]);

        unlocked.insert(Material::Bismuthene);
        assert!(find("advanced-chiral").unwrap().is_available(&unlocked));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(find("Topological").unwrap().name, "Topological Phase");
        assert!(matches!(find("nope"), Err(CavityError::UnknownPreset(_))));
    }
}
