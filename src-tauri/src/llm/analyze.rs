//! CSV analysis and connectivity ping: single-shot prompts whose answers
//! are returned verbatim.

use super::gemini::GeminiClient;
use super::prompts_csv::{self, CSV_MAX_TOKENS};
use super::types::{CsvAnalysisOutcome, CsvAnalysisRequest, PingOutcome};

pub const EMPTY_CSV: &str = "Empty or invalid CSV content.";
pub const PING_MAX_TOKENS: u32 = 128;

/// Analyze an uploaded CSV file's text.
///
/// Empty input fails before any request is made. Longer input is cut to
/// `CSV_MAX_CHARS` characters.
pub async fn analyze_csv(client: &GeminiClient, req: &CsvAnalysisRequest) -> CsvAnalysisOutcome {
    if req.csv_text.is_empty() {
        log::warn!("[CSV] Empty CSV content for '{}'", req.file_name);
        return CsvAnalysisOutcome::error(EMPTY_CSV);
    }

    let sample = prompts_csv::csv_sample(&req.csv_text);
    log::info!(
        "[CSV] Analyzing '{}': {} of {} chars",
        req.file_name,
        sample.chars().count(),
        req.csv_text.chars().count()
    );
    let prompt = prompts_csv::build_csv_prompt(sample);

    match client.call_model(&prompt, CSV_MAX_TOKENS).await {
        Ok(text) => CsvAnalysisOutcome {
            success: true,
            text: Some(text),
            error: None,
        },
        Err(e) => {
            log::error!("[CSV] Analysis failed: {}", e);
            CsvAnalysisOutcome::error(e.to_string())
        }
    }
}

/// Minimal round trip used by the UI's status indicator.
///
/// An empty or missing message is sent as `ping`.
pub async fn ping(client: &GeminiClient, message: Option<&str>) -> PingOutcome {
    let message = message.filter(|m| !m.is_empty()).unwrap_or("ping");
    match client.call_model(message, PING_MAX_TOKENS).await {
        Ok(text) => PingOutcome {
            success: true,
            response: Some(text),
            error: None,
        },
        Err(e) => PingOutcome {
            success: false,
            response: None,
            error: Some(e.to_string()),
        },
    }
}
