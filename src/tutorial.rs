// tutorial.rs
// Guided walkthrough that nudges the controls one step at a time

use crate::material::Material;
use crate::state::{ControlParams, StatePatch};

#[derive(Clone, Copy, Debug)]
pub struct TutorialStep {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
    /// Applied when the user moves past this step
    pub target: Option<StatePatch>,
}

const fn nothing() -> StatePatch {
    StatePatch {
        mirror_angle: None,
        mirror_spacing: None,
        magnetic_field: None,
        field_direction: None,
        inserted_material: None,
    }
}

pub const STEPS: [TutorialStep; 8] = [
    TutorialStep {
        title: "Welcome to Quantum Vacuum Manipulation",
        description: "This simulation lets you explore the fascinating world of quantum vacuum effects using cavity optomechanics.",
        action: "Click Next to begin your journey",
        target: None,
    },
    TutorialStep {
        title: "Mirror Configuration",
        description: "Adjust the mirror angle and spacing to create optical cavities. The spacing determines resonance conditions.",
        action: "Try adjusting the Mirror Spacing to 100nm",
        target: Some(StatePatch { mirror_spacing: Some(100.0), ..nothing() }),
    },
    TutorialStep {
        title: "Mirror Angle Effects",
        description: "The mirror angle affects how light bounces within the cavity. 45° often provides optimal conditions.",
        action: "Set the Mirror Angle to 45°",
        target: Some(StatePatch { mirror_angle: Some(45.0), ..nothing() }),
    },
    TutorialStep {
        title: "Magnetic Field Control",
        description: "Apply magnetic fields to influence quantum states. Higher fields can induce topological phases.",
        action: "Increase the Magnetic Field to 0.7T",
        target: Some(StatePatch { magnetic_field: Some(0.7), ..nothing() }),
    },
    TutorialStep {
        title: "Field Direction",
        description: "The direction of the magnetic field affects chirality - the handedness of quantum states.",
        action: "Adjust Field Direction to 45°",
        target: Some(StatePatch { field_direction: Some(45.0), ..nothing() }),
    },
    TutorialStep {
        title: "Material Insertion",
        description: "Insert materials like graphene to enhance quantum effects. Different materials have unique properties.",
        action: "Select Graphene as the inserted material",
        target: Some(StatePatch { inserted_material: Some(Material::Graphene), ..nothing() }),
    },
    TutorialStep {
        title: "Start the Simulation",
        description: "Now start the simulation to see quantum field dynamics in real-time!",
        action: "Click the Start Simulation button",
        target: None,
    },
    TutorialStep {
        title: "Observe the Results",
        description: "Watch the energy, coherence, and topological phase indicators. Try to achieve a topological phase transition!",
        action: "Experiment with different parameters",
        target: None,
    },
];

#[derive(Clone, Debug, Default)]
pub struct Tutorial {
    current: usize,
    visible: bool,
}

impl Tutorial {
    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &'static TutorialStep {
        &STEPS[self.current]
    }

    /// Leave the current step, returning its target patch. Closes after the last step.
    pub fn next(&mut self) -> Option<StatePatch> {
        let patch = self.current().target;
        if self.current + 1 < STEPS.len() {
            self.current += 1;
        } else {
            self.visible = false;
        }
        patch
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn skip(&mut self) {
        self.visible = false;
    }

    /// Back to the first step, returning a patch that restores the default controls.
    pub fn restart(&mut self) -> StatePatch {
        self.current = 0;
        StatePatch::full(ControlParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_through_collects_targets_and_closes() {
        let mut t = Tutorial::default();
        t.open();
        let mut control = ControlParams { mirror_spacing: 180.0, magnetic_field: 0.1, ..Default::default() };
        for _ in 0..STEPS.len() {
            if let Some(patch) = t.next() {
                patch.apply_to(&mut control);
            }
        }
        assert!(!t.is_visible());
        assert_eq!(control.mirror_spacing, 100.0);
        assert_eq!(control.magnetic_field, 0.7);
        assert_eq!(control.field_direction, 45.0);
        assert_eq!(control.inserted_material, Material::Graphene);
    }

    #[test]
    fn previous_stops_at_start_and_restart_resets() {
        let mut t = Tutorial::default();
        t.previous();
        assert_eq!(t.current_index(), 0);
        t.next();
        t.next();
        assert_eq!(t.current_index(), 2);
        let patch = t.restart();
        assert_eq!(t.current_index(), 0);
        assert_eq!(patch.magnetic_field, Some(0.5));
        assert_eq!(patch.inserted_material, Some(Material::None));
    }
}
