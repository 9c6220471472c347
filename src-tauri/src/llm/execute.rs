//! EXECUTE pipeline — run the steps of a chosen thinking path.
//!
//! This is the second model call in the product flow:
//! 1. PATHS: query → four candidate paths (what could we do?)
//! 2. EXECUTE: query + path + steps → Markdown answer (do it)
//!
//! Unlike PATHS, the answer is never parsed; the UI renders it as-is.

use std::collections::BTreeSet;

use super::gemini::GeminiClient;
use super::prompts_execute::{self, EXECUTE_MAX_TOKENS};
use super::types::{ExecutePathRequest, ExecuteStepsRequest, ExecutionOutcome};

pub const NO_STEPS_SELECTED: &str = "No steps selected.";

/// Execute a path from step 1 through `execute_up_to_step`.
///
/// The step count is clamped into `1..=steps.len()` so the prompt never
/// references a step the path doesn't have.
pub async fn execute_thinking_path(
    client: &GeminiClient,
    req: &ExecutePathRequest,
) -> ExecutionOutcome {
    let up_to = clamp_step_count(req.execute_up_to_step, req.steps.len());
    if up_to != req.execute_up_to_step {
        log::warn!(
            "[EXECUTE] executeUpToStep {} clamped to {} ({} steps)",
            req.execute_up_to_step,
            up_to,
            req.steps.len()
        );
    }

    let prompt =
        prompts_execute::build_execute_path_prompt(&req.query, &req.path_name, &req.steps, up_to);
    log::info!("[EXECUTE] Path \"{}\" up to step {}", req.path_name, up_to);

    match client.call_model(&prompt, EXECUTE_MAX_TOKENS).await {
        Ok(text) => {
            log::info!("[EXECUTE] Response: {} chars", text.len());
            ExecutionOutcome {
                success: true,
                response: Some(text),
                path_name: Some(req.path_name.clone()),
                steps_executed: Some(up_to),
                ..ExecutionOutcome::default()
            }
        }
        Err(e) => {
            log::error!("[EXECUTE] Path execution failed: {}", e);
            ExecutionOutcome::error(e.to_string())
        }
    }
}

/// Execute an arbitrary selection of steps.
///
/// Selected step numbers are deduplicated and sorted ascending before the
/// prompt is built; the sorted list is what the outcome reports.
pub async fn execute_thinking_steps(
    client: &GeminiClient,
    req: &ExecuteStepsRequest,
) -> ExecutionOutcome {
    if req.selected_steps.is_empty() {
        log::warn!("[EXECUTE] No steps selected");
        return ExecutionOutcome::error(NO_STEPS_SELECTED);
    }

    let ordered = order_selected_steps(&req.selected_steps);
    let prompt = prompts_execute::build_execute_steps_prompt(
        &req.query,
        &req.path_name,
        &req.steps,
        &ordered,
    );
    log::info!("[EXECUTE] Path \"{}\" selected steps {:?}", req.path_name, ordered);

    match client.call_model(&prompt, EXECUTE_MAX_TOKENS).await {
        Ok(text) => ExecutionOutcome {
            success: true,
            response: Some(text),
            path_name: Some(req.path_name.clone()),
            selected_steps: Some(ordered),
            ..ExecutionOutcome::default()
        },
        Err(e) => {
            log::error!("[EXECUTE] Selected-steps execution failed: {}", e);
            ExecutionOutcome::error(e.to_string())
        }
    }
}

/// Deduplicate and sort step numbers numerically.
pub fn order_selected_steps(selected: &[u32]) -> Vec<u32> {
    selected.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn clamp_step_count(requested: usize, available: usize) -> usize {
    requested.clamp(1, available.max(1))
}
