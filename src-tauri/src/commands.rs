//! Simple Tauri command handlers.
//!
//! Window controls for the frameless main window, plus provider status for
//! the UI's status pill. Each command receives the calling window
//! explicitly; there is no global window handle.
//!
//! Model-backed commands live in pipeline.rs instead.

use crate::llm;

/// Tauri command: minimize the calling window.
#[tauri::command]
pub fn window_minimize(window: tauri::WebviewWindow) -> Result<(), String> {
    window.minimize().map_err(|e| e.to_string())
}

/// Tauri command: toggle maximized / restored.
#[tauri::command]
pub fn window_maximize(window: tauri::WebviewWindow) -> Result<(), String> {
    let maximized = window.is_maximized().map_err(|e| e.to_string())?;
    if maximized {
        window.unmaximize().map_err(|e| e.to_string())?;
    } else {
        window.maximize().map_err(|e| e.to_string())?;
    }
    log::info!("[WINDOW] Maximized: {}", !maximized);
    Ok(())
}

/// Tauri command: close the calling window.
#[tauri::command]
pub fn window_close(window: tauri::WebviewWindow) -> Result<(), String> {
    window.close().map_err(|e| e.to_string())
}

/// Tauri command: whether the calling window is maximized.
///
/// Reports `false` if the platform can't answer.
#[tauri::command]
pub fn window_is_maximized(window: tauri::WebviewWindow) -> bool {
    window.is_maximized().unwrap_or(false)
}

/// Tauri command: which model is configured and whether a key is present.
#[tauri::command]
pub fn get_provider_status(
    gateway: tauri::State<'_, llm::GeminiClient>,
) -> llm::provider::ProviderStatus {
    gateway.config().status()
}
