use thiserror::Error;

use crate::measurement::{BodyPart, Unit};

/// A submitted field that is missing or uses a unit the field does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Measurement profile name is required")]
    Name,

    #[error("Profile image is required")]
    Image,

    #[error("Height is required")]
    Height,

    #[error("Clothing size is required")]
    ClothingSize,

    #[error("Body size '{}' is required", .0.label())]
    BodySize(BodyPart),

    #[error("Host profile name is required")]
    HostName,

    #[error("'{unit:?}' is not a valid {field} unit")]
    UnitNotAllowed { field: &'static str, unit: Unit },
}

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Profile index {index} out of range (have {len} profiles)")]
    Index { index: usize, len: usize },

    #[error("Create a host profile before managing measurements")]
    HostProfileMissing,

    #[error("Host profile has already been created")]
    HostAlreadyCaptured,

    #[error("Portrait error: {0}")]
    Portrait(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Measurement session is unavailable")]
    SessionUnavailable,
}

impl From<MeasurementError> for String {
    fn from(err: MeasurementError) -> Self {
        err.to_string()
    }
}
