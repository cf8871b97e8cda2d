use anyhow::{bail, Result};
use serde_json::Value;
use tracing::warn;

use crate::measurement::{EditorDefaults, Unit};

/// Store file holding user preferences.
pub const PREFERENCES_FILE: &str = "preferences.json";

pub const THEME_KEY: &str = "theme";
pub const HEIGHT_UNIT_KEY: &str = "default_height_unit";
pub const BODY_SIZE_UNIT_KEY: &str = "default_body_size_unit";

/// Parse the unit preferences read from the store into editor defaults.
///
/// Missing values use centimetres. Values that are not valid for the
/// field fall back to centimetres with a warning.
pub fn editor_defaults_from_values(height: Option<&Value>, body: Option<&Value>) -> EditorDefaults {
    let fallback = EditorDefaults::default();
    EditorDefaults {
        height_unit: parse_unit(HEIGHT_UNIT_KEY, height, Unit::is_height_unit)
            .unwrap_or(fallback.height_unit),
        body_size_unit: parse_unit(BODY_SIZE_UNIT_KEY, body, Unit::is_body_unit)
            .unwrap_or(fallback.body_size_unit),
    }
}

fn parse_unit(key: &str, value: Option<&Value>, allowed: fn(&Unit) -> bool) -> Option<Unit> {
    let raw = value?.as_str()?;
    match Unit::from_key(raw).filter(allowed) {
        Some(unit) => Some(unit),
        None => {
            warn!("Ignoring invalid {} preference: {}", key, raw);
            None
        }
    }
}

/// Validate a preference before it is written.
pub fn validate_preference(key: &str, value: &str) -> Result<()> {
    match key {
        THEME_KEY => {
            if !matches!(value, "system" | "light" | "dark") {
                bail!("Unknown theme '{}'", value);
            }
        }
        HEIGHT_UNIT_KEY => {
            if !Unit::from_key(value).is_some_and(|u| u.is_height_unit()) {
                bail!("'{}' is not a height unit", value);
            }
        }
        BODY_SIZE_UNIT_KEY => {
            if !Unit::from_key(value).is_some_and(|u| u.is_body_unit()) {
                bail!("'{}' is not a body size unit", value);
            }
        }
        _ => bail!("Unknown preference '{}'", key),
    }
    Ok(())
}

pub fn is_unit_preference(key: &str) -> bool {
    key == HEIGHT_UNIT_KEY || key == BODY_SIZE_UNIT_KEY
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(editor_defaults_from_values(None, None), EditorDefaults::default());
    }

    #[test]
    fn test_defaults_from_stored_values() {
        let defaults = editor_defaults_from_values(Some(&json!("ft-in")), Some(&json!("in")));
        assert_eq!(defaults.height_unit, Unit::FtIn);
        assert_eq!(defaults.body_size_unit, Unit::In);
    }

    #[test]
    fn test_units_invalid_for_field_fall_back() {
        let defaults = editor_defaults_from_values(Some(&json!("in")), Some(&json!("ft-in")));
        assert_eq!(defaults, EditorDefaults::default());

        let defaults = editor_defaults_from_values(Some(&json!(3)), None);
        assert_eq!(defaults.height_unit, Unit::Cm);
    }

    #[test]
    fn test_validate_preference() {
        assert!(validate_preference(THEME_KEY, "dark").is_ok());
        assert!(validate_preference(THEME_KEY, "neon").is_err());
        assert!(validate_preference(HEIGHT_UNIT_KEY, "ft-in").is_ok());
        assert!(validate_preference(HEIGHT_UNIT_KEY, "in").is_err());
        assert!(validate_preference(BODY_SIZE_UNIT_KEY, "in").is_ok());
        assert!(validate_preference("bambu_path", "x").is_err());
    }
}
