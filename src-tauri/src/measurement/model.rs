use serde::{Deserialize, Serialize};

use super::units::{BodyPart, BodySizes, Height, Unit};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClothingSize {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

/// Identity captured once before any measurement profile can be managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    pub name: String,
    /// Data URL of the portrait, empty when none was picked.
    #[serde(default)]
    pub image: String,
    pub gender: Gender,
}

impl HostProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::HostName);
        }
        Ok(())
    }
}

/// A named set of body measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementProfile {
    pub name: String,
    pub gender: Gender,
    pub height: Height,
    pub clothing_size: Option<ClothingSize>,
    pub body_sizes: BodySizes,
    #[serde(default)]
    pub custom_field: String,
    /// Opaque portrait blob from the image picker.
    #[serde(default)]
    pub image: String,
}

impl MeasurementProfile {
    /// Empty profile seeded with the given units.
    pub fn blank(defaults: EditorDefaults) -> Self {
        Self {
            name: String::new(),
            gender: Gender::Male,
            height: Height::empty(defaults.height_unit),
            clothing_size: None,
            body_sizes: BodySizes::empty(defaults.body_size_unit),
            custom_field: String::new(),
            image: String::new(),
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn with_gender(self, gender: Gender) -> Self {
        Self { gender, ..self }
    }

    pub fn with_height(self, height: Height) -> Self {
        Self { height, ..self }
    }

    pub fn with_clothing_size(self, clothing_size: Option<ClothingSize>) -> Self {
        Self {
            clothing_size,
            ..self
        }
    }

    pub fn with_body_size(self, part: BodyPart, value: impl Into<String>) -> Self {
        Self {
            body_sizes: self.body_sizes.with_value(part, value),
            ..self
        }
    }

    pub fn with_custom_field(self, custom_field: impl Into<String>) -> Self {
        Self {
            custom_field: custom_field.into(),
            ..self
        }
    }

    pub fn with_image(self, image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..self
        }
    }

    pub fn toggle_height_unit(self) -> Self {
        Self {
            height: self.height.toggled(),
            ..self
        }
    }

    pub fn toggle_body_size_unit(self) -> Self {
        Self {
            body_sizes: self.body_sizes.toggled(),
            ..self
        }
    }
}

/// Units used to seed a freshly created draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDefaults {
    pub height_unit: Unit,
    pub body_size_unit: Unit,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            height_unit: Unit::Cm,
            body_size_unit: Unit::Cm,
        }
    }
}

/// What the editor submits: the draft profile plus editor-only state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDraft {
    pub profile: MeasurementProfile,
    /// Whether the body-size inputs were expanded. Hidden inputs are not
    /// required.
    #[serde(default)]
    pub show_body_sizes: bool,
}

impl EditorDraft {
    pub fn new(profile: MeasurementProfile) -> Self {
        Self {
            profile,
            show_body_sizes: false,
        }
    }

    pub fn with_body_sizes_shown(self, show_body_sizes: bool) -> Self {
        Self {
            show_body_sizes,
            ..self
        }
    }

    /// Required-field presence check. Reports the first missing field in
    /// form order. A centimetre height entered under another unit is rejected.
    pub fn validate(self) -> Result<MeasurementProfile, ValidationError> {
        let profile = self.profile;

        if profile.image.is_empty() {
            return Err(ValidationError::Image);
        }
        if profile.name.trim().is_empty() {
            return Err(ValidationError::Name);
        }
        if let Height::Single(mv) = &profile.height {
            if mv.unit != Unit::Cm {
                return Err(ValidationError::UnitNotAllowed {
                    field: "height",
                    unit: mv.unit,
                });
            }
        }
        if !profile.height.is_complete() {
            return Err(ValidationError::Height);
        }
        if profile.clothing_size.is_none() {
            return Err(ValidationError::ClothingSize);
        }
        if self.show_body_sizes {
            if let Some(part) = profile.body_sizes.first_blank() {
                return Err(ValidationError::BodySize(part));
            }
        }

        Ok(profile)
    }
}
