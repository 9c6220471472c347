//! LLM domain — the Gemini gateway and the prompt pipelines built on it.
//!
//! Public API for the model side of Stratify.
//! External code should only use the functions exported here.
//!
//! Gateway:
//!   - gemini.rs   — the single `generateContent` call + error normalisation
//!   - provider.rs — API key / model / endpoint configuration
//!
//! Pipelines:
//!   - paths.rs    — generate and continue thinking paths (JSON + fallback)
//!   - execute.rs  — execute a path sequentially or by selected steps
//!   - analyze.rs  — CSV analysis, connectivity ping
//!
//! Shared:
//!   - prompts*.rs — prompt templates
//!   - fallback.rs — deterministic canned paths
//!   - types.rs    — IPC request/outcome types

pub mod analyze;
pub mod execute;
pub mod fallback;
mod gemini;
pub mod paths;
pub mod prompts;
pub mod prompts_csv;
pub mod prompts_execute;
pub mod provider;
pub mod types;

pub use analyze::{analyze_csv, ping};
pub use execute::{execute_thinking_path, execute_thinking_steps};
pub use fallback::{continuation_paths, fallback_paths};
pub use gemini::{extract_candidate_text, GatewayError, GeminiClient, DEFAULT_MAX_TOKENS};
pub use paths::{generate_thinking_paths, generate_updated_paths};
pub use provider::GatewayConfig;
pub use types::{
    ContinuationContext, CsvAnalysisOutcome, CsvAnalysisRequest, ExecutePathRequest,
    ExecuteStepsRequest, ExecutionOutcome, PathsOutcome, PingOutcome, ThinkingPath,
};
