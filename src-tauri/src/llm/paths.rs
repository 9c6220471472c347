//! PATHS pipeline: ask Gemini for four thinking paths, parse them, and
//! fall back to canned paths when anything goes wrong.
//!
//! The model answers in free text, so the JSON object is located with a
//! greedy first-`{`-to-last-`}` match, not a balanced
//! brace scan: prose containing a stray `}` after the object makes the
//! parse fail and the fallback kick in.

use std::sync::OnceLock;

use regex::Regex;

use super::fallback::{continuation_paths, fallback_paths};
use super::gemini::GeminiClient;
use super::prompts::{self, CONTINUATION_MAX_TOKENS, PATHS_MAX_TOKENS};
use super::types::{ContinuationContext, PathsEnvelope, PathsOutcome, ThinkingPath};

const NO_JSON_FOUND: &str = "No JSON found in Gemini output.";

fn json_object_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"))
}

/// The substring from the first `{` to the last `}` that follows it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    json_object_regex().find(text).map(|m| m.as_str())
}

/// Parse the `paths` array out of model text.
///
/// A missing `paths` key yields an empty list, not an error.
pub fn parse_paths(text: &str) -> Result<Vec<ThinkingPath>, String> {
    let json = extract_json_object(text).ok_or_else(|| NO_JSON_FOUND.to_string())?;
    let envelope: PathsEnvelope = serde_json::from_str(json).map_err(|e| e.to_string())?;
    Ok(envelope.paths)
}

/// Generate four thinking paths for a new query.
pub async fn generate_thinking_paths(client: &GeminiClient, query: &str) -> PathsOutcome {
    let prompt = prompts::build_paths_prompt(query);
    log::info!("[PATHS] Generating paths for query ({} chars)", query.len());

    let text = match client.call_model(&prompt, PATHS_MAX_TOKENS).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("[PATHS] Gateway failed, using keyword fallback: {}", e);
            return PathsOutcome::fallback(fallback_paths(query), e.to_string());
        }
    };

    match parse_paths(&text) {
        Ok(paths) => {
            log::info!("[PATHS] Parsed {} paths", paths.len());
            PathsOutcome::parsed(paths)
        }
        Err(e) => {
            log::warn!("[PATHS] Parse failed: {}", e);
            PathsOutcome::fallback(
                fallback_paths(query),
                format!("Failed to parse thinking paths JSON: {}", e),
            )
        }
    }
}

/// Generate four follow-up paths from the current conversation state.
pub async fn generate_updated_paths(
    client: &GeminiClient,
    ctx: &ContinuationContext,
) -> PathsOutcome {
    let prompt = prompts::build_continuation_prompt(ctx);
    log::info!(
        "[PATHS] Generating continuation after \"{}\" ({} steps)",
        ctx.last_path_name,
        ctx.last_steps_executed
    );
    let fallback = || continuation_paths(&ctx.last_path_name, ctx.last_steps_executed);

    let text = match client.call_model(&prompt, CONTINUATION_MAX_TOKENS).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("[PATHS] Gateway failed, using continuation fallback: {}", e);
            return PathsOutcome::fallback(fallback(), e.to_string());
        }
    };

    match parse_paths(&text) {
        Ok(paths) => {
            log::info!("[PATHS] Parsed {} continuation paths", paths.len());
            PathsOutcome::parsed(paths)
        }
        Err(e) => {
            log::warn!("[PATHS] Continuation parse failed: {}", e);
            PathsOutcome::fallback(
                fallback(),
                format!("Failed to parse continuation paths JSON: {}", e),
            )
        }
    }
}
