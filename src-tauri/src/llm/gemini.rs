//! Gemini gateway — the single outbound call to `generateContent`.
//!
//! Every model interaction in Stratify goes through `GeminiClient::call_model`.
//! It never panics and never retries: the caller gets either the trimmed
//! text of the first candidate or a `GatewayError` whose `Display` is the
//! human-readable message shown in the UI.
//!
//! Wire notes:
//! - API key in URL query param, not header
//! - non-streaming `generateContent`; no `responseMimeType`, so JSON answers
//!   may arrive wrapped in prose and are located by the callers
//! - all text parts of `candidates[0]` are concatenated

use serde_json::Value;

use super::provider::GatewayConfig;

pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f64 = 0.8;
pub const TOP_P: f64 = 0.9;

/// Failure modes of a gateway call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("Gemini API key not found. Please set GEMINI_API_KEY (or GROQ_API_KEY) in your .env file.")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("Gemini API Error (N/A): {message}")]
    Transport { message: String },

    /// The provider answered with a non-success status.
    #[error("Gemini API Error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Gemini response contained no text.")]
    EmptyOutput,
}

/// Gemini `generateContent` client.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GeminiClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(GatewayConfig::from_env())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send one prompt and return the model's text.
    ///
    /// Fails fast with `MissingApiKey` before touching the network when no
    /// key is configured.
    pub async fn call_model(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GatewayError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) => key,
            None => {
                log::warn!("[LLM] No Gemini API key configured, skipping request");
                return Err(GatewayError::MissingApiKey);
            }
        };

        log::info!(
            "[LLM] Gemini request: model={}, prompt={} chars, maxOutputTokens={}",
            self.config.model,
            prompt.len(),
            max_output_tokens
        );
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.config.generate_content_url())
            .query(&[("key", api_key)])
            .header("content-type", "application/json")
            .json(&request_body(prompt, max_output_tokens))
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the key; never let it reach logs or the UI.
                let e = e.without_url();
                log::error!("[LLM] HTTP request failed: {}", e);
                GatewayError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                log::error!("[LLM] Failed to read response body ({}): {}", status, e);
                return Err(if status.is_success() {
                    GatewayError::Transport {
                        message: e.to_string(),
                    }
                } else {
                    GatewayError::Provider {
                        status: status.as_u16(),
                        message: status_text(status.as_u16()),
                    }
                });
            }
        };
        let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

        if !status.is_success() {
            log::error!(
                "[LLM] Gemini API returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            );
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message: provider_message(&json).unwrap_or_else(|| status_text(status.as_u16())),
            });
        }

        log::info!("[LLM] Gemini responded in {}ms", start.elapsed().as_millis());

        let text = extract_candidate_text(&json);
        if text.is_empty() {
            log::warn!("[LLM] Gemini response contained no text");
            return Err(GatewayError::EmptyOutput);
        }
        Ok(text)
    }
}

/// JSON body for a single-turn `generateContent` request.
pub fn request_body(prompt: &str, max_output_tokens: u32) -> Value {
    serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    {
                        "text": prompt
                    }
                ]
            }
        ],
        "generationConfig": {
            "maxOutputTokens": max_output_tokens,
            "temperature": TEMPERATURE,
            "topP": TOP_P
        }
    })
}

/// Concatenate every text part of the first candidate, trimmed.
///
/// Gemini format: candidates[0].content.parts[*].text
pub fn extract_candidate_text(response: &Value) -> String {
    let parts = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    match parts {
        Some(parts) => parts
            .iter()
            .map(|p| p.get("text").and_then(|t| t.as_str()).unwrap_or(""))
            .collect::<String>()
            .trim()
            .to_string(),
        None => String::new(),
    }
}

fn status_text(status: u16) -> String {
    format!("Request failed with status code {}", status)
}

/// Provider-supplied error message: `error.message`, then `message`.
pub fn provider_message(body: &Value) -> Option<String> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(|m| m.to_string())
    };
    non_empty(body.get("error").and_then(|e| e.get("message")))
        .or_else(|| non_empty(body.get("message")))
}
