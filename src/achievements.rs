// achievements.rs
// One-shot milestones checked after every state change

use serde::Serialize;

use crate::state::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    FirstTopological,
    HighCoherence,
    EnergyEfficiency,
    PerfectResonance,
    ScoreMaster,
    ChiralMaster,
}

#[derive(Clone, Copy, Debug)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub points: u32,
    pub rarity: Rarity,
}

pub const ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: AchievementId::FirstTopological,
        name: "Phase Pioneer",
        description: "Achieve your first topological phase",
        points: 50,
        rarity: Rarity::Common,
    },
    Achievement {
        id: AchievementId::HighCoherence,
        name: "Coherence Master",
        description: "Achieve 90%+ quantum coherence",
        points: 75,
        rarity: Rarity::Rare,
    },
    Achievement {
        id: AchievementId::EnergyEfficiency,
        name: "Energy Wizard",
        description: "Generate 80+ μeV with minimal magnetic field",
        points: 100,
        rarity: Rarity::Epic,
    },
    Achievement {
        id: AchievementId::PerfectResonance,
        name: "Resonance Expert",
        description: "Achieve perfect cavity resonance",
        points: 60,
        rarity: Rarity::Rare,
    },
    Achievement {
        id: AchievementId::ScoreMaster,
        name: "Quantum Virtuoso",
        description: "Reach 500 points",
        points: 150,
        rarity: Rarity::Epic,
    },
    Achievement {
        id: AchievementId::ChiralMaster,
        name: "Chirality Champion",
        description: "Achieve maximum chirality (>0.8)",
        points: 120,
        rarity: Rarity::Legendary,
    },
];

impl AchievementId {
    pub fn info(&self) -> &'static Achievement {
        let index = ACHIEVEMENTS
            .iter()
            .position(|a| a.id == *self)
            .unwrap_or_default();
        &ACHIEVEMENTS[index]
    }

    fn is_met(&self, state: &SimulationState, score: u64) -> bool {
        match self {
            AchievementId::FirstTopological => state.topological_phase,
            AchievementId::HighCoherence => state.coherence >= 90.0,
            AchievementId::EnergyEfficiency => state.energy >= 80.0 && state.magnetic_field <= 0.3,
            AchievementId::PerfectResonance => {
                (state.mirror_spacing - 100.0).abs() < 2.0 && (state.mirror_angle - 45.0).abs() < 2.0
            }
            AchievementId::ScoreMaster => score >= 500,
            AchievementId::ChiralMaster => state.chirality.abs() >= 0.8,
        }
    }
}

/// Unlocked achievements in unlock order.
#[derive(Clone, Debug, Default)]
pub struct AchievementTracker {
    unlocked: Vec<AchievementId>,
}

impl AchievementTracker {
    /// Unlock everything newly satisfied by `state` and `score`; returns the new ones.
    pub fn evaluate(&mut self, state: &SimulationState, score: u64) -> Vec<AchievementId> {
        let fresh: Vec<AchievementId> = ACHIEVEMENTS
            .iter()
            .map(|a| a.id)
            .filter(|id| !self.unlocked.contains(id) && id.is_met(state, score))
            .collect();
        self.unlocked.extend(fresh.iter().copied());
        fresh
    }

    pub fn unlocked(&self) -> &[AchievementId] {
        &self.unlocked
    }

    pub fn points(&self) -> u32 {
        self.unlocked.iter().map(|id| id.info().points).sum()
    }
}
