// phase.rs
// Human-readable classification of the current cavity state

use serde::Serialize;

use crate::material::Material;
use crate::state::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    TopologicalInsulator,
    HighEnergyCoherent,
    SymmetryBroken,
    Trivial,
}

impl PhaseKind {
    /// First match wins.
    pub fn classify(state: &SimulationState) -> Self {
        if state.topological_phase {
            PhaseKind::TopologicalInsulator
        } else if state.energy > 70.0 && state.coherence > 50.0 {
            PhaseKind::HighEnergyCoherent
        } else if state.inserted_material != Material::None && state.magnetic_field > 0.3 {
            PhaseKind::SymmetryBroken
        } else {
            PhaseKind::Trivial
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhaseKind::TopologicalInsulator => "Topological Insulator Phase",
            PhaseKind::HighEnergyCoherent => "High Energy Coherent State",
            PhaseKind::SymmetryBroken => "Symmetry Broken Phase",
            PhaseKind::Trivial => "Trivial Phase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PhaseKind::TopologicalInsulator => "Material exhibits protected edge states with spin-momentum locking",
            PhaseKind::HighEnergyCoherent => "Strong vacuum fluctuations with maintained coherence",
            PhaseKind::SymmetryBroken => "Magnetic field breaks time-reversal symmetry",
            PhaseKind::Trivial => "Standard material properties, no exotic states",
        }
    }
}
