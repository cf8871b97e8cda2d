//! Value + unit pairs and the unit toggles for height and body sizes.
//!
//! Units are never converted numerically. Switching a field to its other
//! unit always clears the value so a stale number is never shown under the
//! wrong unit.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Units a measured value can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "ft-in")]
    FtIn,
    #[serde(rename = "in")]
    In,
}

impl Unit {
    /// Parse a stored preference value. Unknown values yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cm" => Some(Unit::Cm),
            "ft-in" | "ft" => Some(Unit::FtIn),
            "in" => Some(Unit::In),
            _ => None,
        }
    }

    /// Height alternates between centimetres and feet/inches.
    pub fn alternate_for_height(&self) -> Unit {
        match self {
            Unit::Cm => Unit::FtIn,
            _ => Unit::Cm,
        }
    }

    /// Body sizes alternate between centimetres and inches.
    pub fn alternate_for_body(&self) -> Unit {
        match self {
            Unit::Cm => Unit::In,
            _ => Unit::Cm,
        }
    }

    pub fn is_height_unit(&self) -> bool {
        matches!(self, Unit::Cm | Unit::FtIn)
    }

    pub fn is_body_unit(&self) -> bool {
        matches!(self, Unit::Cm | Unit::In)
    }
}

/// Raw user input paired with the unit it was entered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasuredValue {
    pub value: String,
    pub unit: Unit,
}

impl MeasuredValue {
    pub fn empty(unit: Unit) -> Self {
        Self {
            value: String::new(),
            unit,
        }
    }

    /// Replace the value, keeping the unit. Any text is accepted here;
    /// presence is checked when the form is submitted.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: self.unit,
        }
    }

    /// Switch to `unit` and drop the value.
    pub fn toggled(self, unit: Unit) -> Self {
        Self::empty(unit)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Height is either a single centimetre value or a feet/inches pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HeightRepr")]
pub enum Height {
    Single(MeasuredValue),
    Split { feet: String, inches: String },
}

/// Wire shape of [`Height`] before the unit is checked.
#[derive(Deserialize)]
enum HeightRepr {
    Single(MeasuredValue),
    Split { feet: String, inches: String },
}

impl TryFrom<HeightRepr> for Height {
    type Error = ValidationError;

    fn try_from(repr: HeightRepr) -> Result<Self, Self::Error> {
        match repr {
            HeightRepr::Single(mv) if mv.unit == Unit::Cm => Ok(Height::Single(mv)),
            HeightRepr::Single(mv) => Err(ValidationError::UnitNotAllowed {
                field: "height",
                unit: mv.unit,
            }),
            HeightRepr::Split { feet, inches } => Ok(Height::Split { feet, inches }),
        }
    }
}

impl Height {
    /// Empty height in the given unit. Anything other than feet/inches
    /// is treated as centimetres.
    pub fn empty(unit: Unit) -> Self {
        match unit {
            Unit::FtIn => Height::Split {
                feet: String::new(),
                inches: String::new(),
            },
            _ => Height::Single(MeasuredValue::empty(Unit::Cm)),
        }
    }

    pub fn centimetres(value: impl Into<String>) -> Self {
        Height::Single(MeasuredValue::empty(Unit::Cm).with_value(value))
    }

    pub fn feet_inches(feet: impl Into<String>, inches: impl Into<String>) -> Self {
        Height::Split {
            feet: feet.into(),
            inches: inches.into(),
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            Height::Single(_) => Unit::Cm,
            Height::Split { .. } => Unit::FtIn,
        }
    }

    /// Fresh empty height in the other representation.
    pub fn toggled(&self) -> Self {
        Height::empty(self.unit().alternate_for_height())
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Height::Single(mv) => !mv.is_blank(),
            Height::Split { feet, inches } => {
                !feet.trim().is_empty() && !inches.trim().is_empty()
            }
        }
    }
}

/// The fixed set of body parts measured on every profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Chest,
    Arm,
    Waist,
    Hips,
    Thigh,
}

impl BodyPart {
    pub const ALL: [BodyPart; 5] = [
        BodyPart::Chest,
        BodyPart::Arm,
        BodyPart::Waist,
        BodyPart::Hips,
        BodyPart::Thigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Chest => "chest",
            BodyPart::Arm => "arm",
            BodyPart::Waist => "waist",
            BodyPart::Hips => "hips",
            BodyPart::Thigh => "thigh",
        }
    }
}

/// Body sizes for all five parts, sharing a single unit.
///
/// The shared `unit` is stored once, so a part can never disagree with its
/// siblings. The group is toggled as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BodySizesRepr")]
pub struct BodySizes {
    unit: Unit,
    chest: String,
    arm: String,
    waist: String,
    hips: String,
    thigh: String,
}

#[derive(Deserialize)]
struct BodySizesRepr {
    unit: Unit,
    chest: String,
    arm: String,
    waist: String,
    hips: String,
    thigh: String,
}

impl TryFrom<BodySizesRepr> for BodySizes {
    type Error = ValidationError;

    fn try_from(repr: BodySizesRepr) -> Result<Self, Self::Error> {
        if !repr.unit.is_body_unit() {
            return Err(ValidationError::UnitNotAllowed {
                field: "body size",
                unit: repr.unit,
            });
        }
        Ok(BodySizes {
            unit: repr.unit,
            chest: repr.chest,
            arm: repr.arm,
            waist: repr.waist,
            hips: repr.hips,
            thigh: repr.thigh,
        })
    }
}

impl BodySizes {
    pub fn empty(unit: Unit) -> Self {
        let unit = if unit.is_body_unit() { unit } else { Unit::Cm };
        Self {
            unit,
            chest: String::new(),
            arm: String::new(),
            waist: String::new(),
            hips: String::new(),
            thigh: String::new(),
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn get(&self, part: BodyPart) -> MeasuredValue {
        MeasuredValue {
            value: self.slot(part).clone(),
            unit: self.unit,
        }
    }

    pub fn with_value(mut self, part: BodyPart, value: impl Into<String>) -> Self {
        *self.slot_mut(part) = value.into();
        self
    }

    /// All five parts emptied and moved to the other unit.
    pub fn toggled(&self) -> Self {
        BodySizes::empty(self.unit.alternate_for_body())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, MeasuredValue)> + '_ {
        BodyPart::ALL.into_iter().map(move |part| (part, self.get(part)))
    }

    /// First part whose value is blank, if any.
    pub fn first_blank(&self) -> Option<BodyPart> {
        BodyPart::ALL
            .into_iter()
            .find(|part| self.slot(*part).trim().is_empty())
    }

    fn slot(&self, part: BodyPart) -> &String {
        match part {
            BodyPart::Chest => &self.chest,
            BodyPart::Arm => &self.arm,
            BodyPart::Waist => &self.waist,
            BodyPart::Hips => &self.hips,
            BodyPart::Thigh => &self.thigh,
        }
    }

    fn slot_mut(&mut self, part: BodyPart) -> &mut String {
        match part {
            BodyPart::Chest => &mut self.chest,
            BodyPart::Arm => &mut self.arm,
            BodyPart::Waist => &mut self.waist,
            BodyPart::Hips => &mut self.hips,
            BodyPart::Thigh => &mut self.thigh,
        }
    }
}

impl Default for BodySizes {
    fn default() -> Self {
        BodySizes::empty(Unit::Cm)
    }
}
