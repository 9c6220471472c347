//! Model-backed Tauri commands.
//!
//! Thin adapters from `invoke()` to the `llm` pipelines. Every command
//! resolves with an outcome struct carrying `success`; gateway failures
//! never reject the frontend promise. Tauri requires a `Result` return for
//! async commands that borrow managed state.

use tauri_plugin_dialog::DialogExt;

use crate::llm::{
    self, ContinuationContext, CsvAnalysisOutcome, CsvAnalysisRequest, ExecutePathRequest,
    ExecuteStepsRequest, ExecutionOutcome, GeminiClient, PathsOutcome, PingOutcome,
};

/// Tauri command: connectivity check for the status pill.
#[tauri::command]
pub async fn send_to_llm(
    gateway: tauri::State<'_, GeminiClient>,
    message: Option<String>,
) -> Result<PingOutcome, String> {
    Ok(llm::ping(&gateway, message.as_deref()).await)
}

/// Tauri command: four thinking paths for a new query.
#[tauri::command]
pub async fn generate_thinking_paths(
    gateway: tauri::State<'_, GeminiClient>,
    query: String,
) -> Result<PathsOutcome, String> {
    Ok(llm::generate_thinking_paths(&gateway, &query).await)
}

/// Tauri command: four follow-up paths after an execution.
#[tauri::command]
pub async fn generate_updated_paths(
    gateway: tauri::State<'_, GeminiClient>,
    context: ContinuationContext,
) -> Result<PathsOutcome, String> {
    Ok(llm::generate_updated_paths(&gateway, &context).await)
}

/// Tauri command: execute steps 1..=N of a path.
#[tauri::command]
pub async fn execute_thinking_path(
    gateway: tauri::State<'_, GeminiClient>,
    request: ExecutePathRequest,
) -> Result<ExecutionOutcome, String> {
    Ok(llm::execute_thinking_path(&gateway, &request).await)
}

/// Tauri command: execute an arbitrary selection of steps.
#[tauri::command]
pub async fn execute_thinking_steps(
    gateway: tauri::State<'_, GeminiClient>,
    request: ExecuteStepsRequest,
) -> Result<ExecutionOutcome, String> {
    Ok(llm::execute_thinking_steps(&gateway, &request).await)
}

/// Tauri command: analyze CSV text read by the frontend.
#[tauri::command]
pub async fn analyze_csv(
    gateway: tauri::State<'_, GeminiClient>,
    request: CsvAnalysisRequest,
) -> Result<CsvAnalysisOutcome, String> {
    Ok(llm::analyze_csv(&gateway, &request).await)
}

/// Tauri command: pick a CSV file with the native dialog and analyze it.
///
/// Cancelling the dialog resolves with `success: false`.
#[tauri::command]
pub async fn analyze_csv_file(
    app: tauri::AppHandle,
    gateway: tauri::State<'_, GeminiClient>,
) -> Result<CsvAnalysisOutcome, String> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("CSV", &["csv"])
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx.await.map_err(|e| e.to_string())?;
    let path = match picked {
        Some(file_path) => file_path.into_path().map_err(|e| e.to_string())?,
        None => {
            log::info!("[CSV] File dialog cancelled");
            return Ok(CsvAnalysisOutcome::error("No file selected."));
        }
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) => {
            log::error!("[CSV] Failed to read {}: {}", path.display(), e);
            return Ok(CsvAnalysisOutcome::error(format!("Failed to read file: {}", e)));
        }
    };

    let request = CsvAnalysisRequest {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        csv_text: String::from_utf8_lossy(&bytes).to_string(),
    };
    Ok(llm::analyze_csv(&gateway, &request).await)
}
