pub mod error;
pub mod measurement;
pub mod portrait;
pub mod preferences;
pub mod session;

mod commands;

pub use error::{MeasurementError, ValidationError};
pub use measurement::{Intent, SessionSnapshot, WorkflowController, WorkflowState};
pub use session::SessionState;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .manage(SessionState::default())
        .invoke_handler(tauri::generate_handler![
            commands::config::get_preference,
            commands::config::set_preference,
            commands::session::get_session,
            commands::session::capture_host_profile,
            commands::session::dispatch_intent,
            commands::draft::toggle_height_unit,
            commands::draft::toggle_body_size_unit,
            commands::portrait::prepare_portrait,
        ])
        .setup(|app| {
            // Seed new drafts with the saved unit preferences
            use tauri::Manager;
            use tauri_plugin_store::StoreExt;
            if let Ok(store) = app.store(preferences::PREFERENCES_FILE) {
                let defaults = preferences::editor_defaults_from_values(
                    store.get(preferences::HEIGHT_UNIT_KEY).as_ref(),
                    store.get(preferences::BODY_SIZE_UNIT_KEY).as_ref(),
                );
                let state = app.state::<SessionState>();
                if let Err(e) = state.with_controller(|c| {
                    c.set_defaults(defaults);
                    Ok(())
                }) {
                    tracing::warn!("Failed to apply unit preferences: {}", e);
                }
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
