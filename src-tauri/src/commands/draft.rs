//! Stateless helpers the editor calls while a draft is being filled in.
//! They never touch the session.

use crate::measurement::{BodySizes, Height};

#[tauri::command]
pub fn toggle_height_unit(height: Height) -> Height {
    height.toggled()
}

#[tauri::command]
pub fn toggle_body_size_unit(body_sizes: BodySizes) -> BodySizes {
    body_sizes.toggled()
}
