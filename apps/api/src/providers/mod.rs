//! Provider clients, one per hosted LLM vendor.
//!
//! Every vendor call goes through `run_provider`, which turns any failure into
//! a placeholder string so one provider can never abort the others.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;

pub mod chat;
pub mod gemini;
pub mod groq;
pub mod mistral;

pub use gemini::GeminiClient;
pub use groq::GroqClient;
pub use mistral::MistralClient;

/// System instruction sent with every enhancement request.
pub const SYSTEM_PROMPT: &str = "You are an expert in resume optimization.";

/// Placeholder returned in place of model output when a call fails.
pub const ENHANCE_ERROR: &str = "Error enhancing resume";

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Carries the vendor label used in the user-facing message.
    #[error("{0} API key is missing")]
    MissingApiKey(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider returned empty content")]
    EmptyContent,
}

/// A hosted chat model that turns a prompt into text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Vendor name used in logs.
    fn name(&self) -> &'static str;

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Result of one provider call as it is reported to the caller.
///
/// Serializes as a bare string: the model text, or the placeholder that
/// stands in for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProviderOutcome {
    Enhanced(String),
    Failed(String),
}

impl ProviderOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ProviderOutcome::Failed(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProviderOutcome::Enhanced(s) | ProviderOutcome::Failed(s) => s,
        }
    }
}

/// Calls `provider` and absorbs every error into a `ProviderOutcome::Failed`.
pub async fn run_provider(provider: &dyn CompletionProvider, prompt: &str) -> ProviderOutcome {
    match provider.complete(SYSTEM_PROMPT, prompt).await {
        Ok(text) => {
            debug!("{} returned {} chars", provider.name(), text.len());
            ProviderOutcome::Enhanced(text)
        }
        Err(ProviderError::MissingApiKey(label)) => {
            warn!("{} API key is not configured", provider.name());
            ProviderOutcome::Failed(format!("Error: {label} API key is missing."))
        }
        Err(e) => {
            error!("Error calling {} API: {e}", provider.name());
            ProviderOutcome::Failed(ENHANCE_ERROR.to_string())
        }
    }
}

/// The three providers the enhancement endpoint fans out to.
#[derive(Clone)]
pub struct ProviderSet {
    pub mistral: Arc<dyn CompletionProvider>,
    pub gemini: Arc<dyn CompletionProvider>,
    pub groq: Arc<dyn CompletionProvider>,
}

impl ProviderSet {
    pub fn from_config(config: &Config, client: Client) -> Self {
        Self {
            mistral: Arc::new(MistralClient::new(
                client.clone(),
                &config.mistral_base_url,
                config.mistral_api_key.clone(),
            )),
            gemini: Arc::new(GeminiClient::new(
                client.clone(),
                &config.gemini_base_url,
                config.gemini_api_key.clone(),
            )),
            groq: Arc::new(GroqClient::new(
                client,
                &config.groq_base_url,
                config.groq_api_key.clone(),
            )),
        }
    }
}

/// Builds an `Api` error from a non-2xx body, preferring the vendor's own
/// `error.message` (or top-level `message`) when the body is JSON.
pub(crate) fn api_error(status: reqwest::StatusCode, body: String) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or(body);

    ProviderError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Joins a base URL and an absolute path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
