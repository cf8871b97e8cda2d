use tauri::{AppHandle, Manager};
use tracing::info;

use crate::measurement::{HostProfile, Intent, SessionSnapshot};
use crate::session::SessionState;

#[tauri::command]
pub fn get_session(app: AppHandle) -> Result<SessionSnapshot, String> {
    let session = app.state::<SessionState>();
    session
        .with_controller(|c| Ok(c.snapshot()))
        .map_err(String::from)
}

#[tauri::command]
pub fn capture_host_profile(app: AppHandle, host: HostProfile) -> Result<SessionSnapshot, String> {
    info!("Capturing host profile");
    let session = app.state::<SessionState>();
    session
        .with_controller(|c| {
            c.capture_host(host)?;
            Ok(c.snapshot())
        })
        .map_err(String::from)
}

/// Apply one UI intent and return the resulting session.
#[tauri::command]
pub fn dispatch_intent(app: AppHandle, intent: Intent) -> Result<SessionSnapshot, String> {
    let session = app.state::<SessionState>();
    session
        .with_controller(|c| {
            let outcome = c.handle(intent)?;
            info!("Intent handled: {:?}", outcome);
            Ok(c.snapshot())
        })
        .map_err(String::from)
}
