// state.rs
// Control parameters, derived quantities and the combined SimulationState snapshot

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::CavityError;
use crate::material::Material;

/// The five user-controlled inputs of the cavity model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlParams {
    pub mirror_angle: f64,
    pub mirror_spacing: f64,
    pub magnetic_field: f64,
    pub field_direction: f64,
    pub inserted_material: Material,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            mirror_angle: config::DEFAULT_MIRROR_ANGLE,
            mirror_spacing: config::DEFAULT_MIRROR_SPACING,
            magnetic_field: config::DEFAULT_MAGNETIC_FIELD,
            field_direction: config::DEFAULT_FIELD_DIRECTION,
            inserted_material: Material::None,
        }
    }
}

fn clamp_to(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

impl ControlParams {
    /// Pull every numeric field into its slider domain. NaN becomes the domain minimum.
    pub fn clamped(&self) -> Self {
        Self {
            mirror_angle: clamp_to(self.mirror_angle, config::MIRROR_ANGLE_RANGE),
            mirror_spacing: clamp_to(self.mirror_spacing, config::MIRROR_SPACING_RANGE),
            magnetic_field: clamp_to(self.magnetic_field, config::MAGNETIC_FIELD_RANGE),
            field_direction: clamp_to(self.field_direction, config::FIELD_DIRECTION_RANGE),
            inserted_material: self.inserted_material,
        }
    }

    pub fn set(&mut self, parameter: Parameter, value: ParameterValue) -> Result<(), CavityError> {
        match (parameter, value) {
            (Parameter::InsertedMaterial, ParameterValue::Material(material)) => {
                self.inserted_material = material;
            }
            (Parameter::InsertedMaterial, ParameterValue::Number(_)) => {
                return Err(CavityError::ParameterType { parameter, expected: "a material key" });
            }
            (_, ParameterValue::Material(_)) => {
                return Err(CavityError::ParameterType { parameter, expected: "a number" });
            }
            (Parameter::MirrorAngle, ParameterValue::Number(v)) => self.mirror_angle = v,
            (Parameter::MirrorSpacing, ParameterValue::Number(v)) => self.mirror_spacing = v,
            (Parameter::MagneticField, ParameterValue::Number(v)) => self.magnetic_field = v,
            (Parameter::FieldDirection, ParameterValue::Number(v)) => self.field_direction = v,
        }
        Ok(())
    }
}

/// Quantities computed from the control parameters. Never set directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    /// μeV, rounded to an integer value
    pub energy: f64,
    /// 0..=100, rounded to an integer value
    pub coherence: f64,
    /// Signed handedness, rounded to two decimals
    pub chirality: f64,
    pub topological_phase: bool,
}

/// Full snapshot consumed by the renderer, panels and exports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub mirror_angle: f64,
    pub mirror_spacing: f64,
    pub magnetic_field: f64,
    pub field_direction: f64,
    pub chirality: f64,
    pub inserted_material: Material,
    pub energy: f64,
    pub coherence: f64,
    pub topological_phase: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::from_parts(ControlParams::default(), DerivedFields::default())
    }
}

impl SimulationState {
    pub fn from_parts(control: ControlParams, derived: DerivedFields) -> Self {
        Self {
            mirror_angle: control.mirror_angle,
            mirror_spacing: control.mirror_spacing,
            magnetic_field: control.magnetic_field,
            field_direction: control.field_direction,
            chirality: derived.chirality,
            inserted_material: control.inserted_material,
            energy: derived.energy,
            coherence: derived.coherence,
            topological_phase: derived.topological_phase,
        }
    }

    pub fn control(&self) -> ControlParams {
        ControlParams {
            mirror_angle: self.mirror_angle,
            mirror_spacing: self.mirror_spacing,
            magnetic_field: self.magnetic_field,
            field_direction: self.field_direction,
            inserted_material: self.inserted_material,
        }
    }

    /// Current value of a control parameter, with its unit.
    pub fn display_value(&self, parameter: Parameter) -> String {
        match parameter {
            Parameter::MirrorAngle => format!("{}{}", self.mirror_angle, parameter.unit()),
            Parameter::MirrorSpacing => format!("{} {}", self.mirror_spacing, parameter.unit()),
            Parameter::MagneticField => format!("{} {}", self.magnetic_field, parameter.unit()),
            Parameter::FieldDirection => format!("{}{}", self.field_direction, parameter.unit()),
            Parameter::InsertedMaterial => self.inserted_material.key().to_string(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Parameter {
    MirrorAngle,
    MirrorSpacing,
    MagneticField,
    FieldDirection,
    InsertedMaterial,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::MirrorAngle,
        Parameter::MirrorSpacing,
        Parameter::MagneticField,
        Parameter::FieldDirection,
        Parameter::InsertedMaterial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::MirrorAngle => "mirrorAngle",
            Parameter::MirrorSpacing => "mirrorSpacing",
            Parameter::MagneticField => "magneticField",
            Parameter::FieldDirection => "fieldDirection",
            Parameter::InsertedMaterial => "insertedMaterial",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::MirrorAngle | Parameter::FieldDirection => "°",
            Parameter::MirrorSpacing => "nm",
            Parameter::MagneticField => "T",
            Parameter::InsertedMaterial => "",
        }
    }

    /// Parse a raw value typed for this parameter.
    pub fn parse_value(&self, raw: &str) -> Result<ParameterValue, CavityError> {
        match self {
            Parameter::InsertedMaterial => Ok(ParameterValue::Material(raw.parse()?)),
            _ => raw
                .trim()
                .parse::<f64>()
                .map(ParameterValue::Number)
                .map_err(|_| CavityError::ParameterType { parameter: *self, expected: "a number" }),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Parameter {
    type Err = CavityError;

    /// Accepts camelCase, snake_case, kebab-case and short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mirrorangle" | "angle" => Ok(Parameter::MirrorAngle),
            "mirrorspacing" | "spacing" => Ok(Parameter::MirrorSpacing),
            "magneticfield" | "field" | "b" => Ok(Parameter::MagneticField),
            "fielddirection" | "direction" => Ok(Parameter::FieldDirection),
            "insertedmaterial" | "material" => Ok(Parameter::InsertedMaterial),
            _ => Err(CavityError::UnknownParameter(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterValue {
    Number(f64),
    Material(Material),
}

impl From<f64> for ParameterValue {
    fn from(v: f64) -> Self {
        ParameterValue::Number(v)
    }
}

impl From<Material> for ParameterValue {
    fn from(m: Material) -> Self {
        ParameterValue::Material(m)
    }
}

/// Partial control update pushed by presets and the tutorial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatePatch {
    pub mirror_angle: Option<f64>,
    pub mirror_spacing: Option<f64>,
    pub magnetic_field: Option<f64>,
    pub field_direction: Option<f64>,
    pub inserted_material: Option<Material>,
}

impl StatePatch {
    /// A patch that sets every control field.
    pub fn full(control: ControlParams) -> Self {
        Self {
            mirror_angle: Some(control.mirror_angle),
            mirror_spacing: Some(control.mirror_spacing),
            magnetic_field: Some(control.magnetic_field),
            field_direction: Some(control.field_direction),
            inserted_material: Some(control.inserted_material),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, control: &mut ControlParams) {
        if let Some(v) = self.mirror_angle {
            control.mirror_angle = v;
        }
        if let Some(v) = self.mirror_spacing {
            control.mirror_spacing = v;
        }
        if let Some(v) = self.magnetic_field {
            control.magnetic_field = v;
        }
        if let Some(v) = self.field_direction {
            control.field_direction = v;
        }
        if let Some(m) = self.inserted_material {
            control.inserted_material = m;
        }
    }
}
