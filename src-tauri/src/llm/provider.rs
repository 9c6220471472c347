//! Gemini provider configuration — API key, model and endpoint resolution.
//!
//! Everything here is read from the process environment once, after
//! `.env.local` / `.env` have been loaded by the app shell. The key can come
//! from either of two variables; the literal placeholder shipped in the
//! sample `.env` counts as "not configured".

use serde::{Deserialize, Serialize};

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Env vars checked for the API key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GROQ_API_KEY"];

/// Value shipped in the sample `.env`. Treated as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Provider status exposed to the UI's status pill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub name: String,
    pub model: String,
    pub env_keys: Vec<String>,
    pub configured: bool,
}

/// Resolved gateway configuration.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|k| format!("<{} chars>", k.len())))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Build the config from environment variables.
    ///
    /// `GEMINI_API_KEY` wins over `GROQ_API_KEY`; an empty variable falls
    /// through to the next one.
    pub fn from_env() -> Self {
        let raw_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GEMINI_MODEL.to_string());
        let base_url = std::env::var("GEMINI_API_BASE")
            .ok()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| GEMINI_API_BASE.to_string());

        let config = Self::new(&raw_key).with_model(&model).with_base_url(&base_url);
        log::info!(
            "[LLM] Config: model={}, key configured={}",
            config.model,
            config.is_configured()
        );
        config
    }

    /// Config with the default model/endpoint and the given raw key.
    pub fn new(raw_key: &str) -> Self {
        Self {
            api_key: normalize_api_key(raw_key),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.trim().to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// True when a usable API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn status(&self) -> ProviderStatus {
        ProviderStatus {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            env_keys: API_KEY_VARS.iter().map(|v| v.to_string()).collect(),
            configured: self.is_configured(),
        }
    }

    /// Full `generateContent` URL, without the key query parameter.
    pub fn generate_content_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Trim a raw key and drop it if empty or the sample placeholder.
pub fn normalize_api_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        None
    } else {
        Some(key.to_string())
    }
}
