//! Request and response types shared by the gateway pipelines and the UI.
//!
//! Everything here crosses the Tauri IPC boundary as camelCase JSON.
//! Outcome types always carry a `success` flag: failures are data, the
//! frontend never sees a rejected promise from a model call.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A named strategy with (by convention) three ordered steps.
///
/// Paths parsed from model output are not validated: a path missing its
/// name or steps deserializes with empty defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingPath {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl ThinkingPath {
    pub fn new(name: &str, steps: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The JSON shape the path prompts ask the model for.
///
/// Read leniently: a null or non-array `paths` is an empty list, and each
/// entry is coerced by `ThinkingPath::from_model_value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsEnvelope {
    #[serde(default, deserialize_with = "lenient_paths")]
    pub paths: Vec<ThinkingPath>,
}

impl ThinkingPath {
    /// Coerce one model-produced path entry.
    ///
    /// Null or missing fields become empty, scalar steps are stringified,
    /// and a non-array `steps` is treated as no steps.
    pub fn from_model_value(value: &Value) -> Self {
        let steps = value
            .get("steps")
            .and_then(|s| s.as_array())
            .map(|steps| steps.iter().map(model_text).collect())
            .unwrap_or_default();
        Self {
            name: value.get("name").map(model_text).unwrap_or_default(),
            steps,
        }
    }
}

fn lenient_paths<'de, D>(deserializer: D) -> Result<Vec<ThinkingPath>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|entries| entries.iter().map(ThinkingPath::from_model_value).collect())
        .unwrap_or_default())
}

fn model_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Result of generating a batch of thinking paths.
///
/// On failure `paths` holds fallback data and `error` says why.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsOutcome {
    pub success: bool,
    pub paths: Vec<ThinkingPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PathsOutcome {
    pub fn parsed(paths: Vec<ThinkingPath>) -> Self {
        Self {
            success: true,
            paths,
            error: None,
        }
    }

    pub fn fallback(paths: Vec<ThinkingPath>, error: String) -> Self {
        Self {
            success: false,
            paths,
            error: Some(error),
        }
    }
}

/// Conversation state used to propose follow-up paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuationContext {
    pub original_query: String,
    pub last_response: String,
    /// Accepted from the UI; the continuation prompt does not embed it.
    pub conversation_context: Option<Value>,
    pub last_path_name: String,
    pub last_steps_executed: usize,
}

/// Execute a path from its first step up to `execute_up_to_step` (1-based).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutePathRequest {
    pub query: String,
    pub path_name: String,
    pub steps: Vec<String>,
    pub execute_up_to_step: usize,
}

/// Execute an arbitrary selection of a path's steps (1-based numbers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStepsRequest {
    pub query: String,
    pub path_name: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub selected_steps: Vec<u32>,
}

/// Result of an execute call. Exactly one of `steps_executed` /
/// `selected_steps` is set on success, depending on the request kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_executed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_steps: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvAnalysisRequest {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub csv_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvAnalysisOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CsvAnalysisOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(message.into()),
        }
    }
}

/// Connectivity check result for the UI status pill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
