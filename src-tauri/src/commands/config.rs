use tauri::{AppHandle, Manager};
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use crate::error::MeasurementError;
use crate::preferences::{
    editor_defaults_from_values, is_unit_preference, validate_preference, BODY_SIZE_UNIT_KEY,
    HEIGHT_UNIT_KEY, PREFERENCES_FILE,
};
use crate::session::SessionState;

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    let value = store.get(key).and_then(|v| v.as_str().map(|s| s.to_string()));
    Ok(value)
}

/// Save a preference. Unit preferences also become the defaults for the
/// next draft opened in this session.
#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    validate_preference(key, value)
        .map_err(|e| String::from(MeasurementError::Config(e.to_string())))?;

    let store = app.store(PREFERENCES_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        e.to_string()
    })?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        e.to_string()
    })?;

    if is_unit_preference(key) {
        let defaults = editor_defaults_from_values(
            store.get(HEIGHT_UNIT_KEY).as_ref(),
            store.get(BODY_SIZE_UNIT_KEY).as_ref(),
        );
        app.state::<SessionState>()
            .with_controller(|c| {
                c.set_defaults(defaults);
                Ok(())
            })
            .map_err(String::from)?;
    }
    Ok(())
}
