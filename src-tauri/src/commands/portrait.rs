use tracing::{info, warn};

use crate::portrait;

/// Turn a picked image (base64) into an embeddable portrait data URL.
#[tauri::command]
pub async fn prepare_portrait(image_base64: String) -> Result<String, String> {
    info!("Preparing portrait ({} base64 chars)", image_base64.len());

    tauri::async_runtime::spawn_blocking(move || portrait::prepare_portrait(&image_base64))
        .await
        .map_err(|e| format!("Portrait task failed: {}", e))?
        .map_err(|e| {
            warn!("Portrait rejected: {}", e);
            String::from(e)
        })
}
