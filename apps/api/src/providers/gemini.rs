//! Google Gemini `generateContent` client with a one-step model fallback
//! on transport and API errors.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{api_error, endpoint, CompletionProvider, ProviderError};

pub const PRIMARY_MODEL: &str = "gemini-1.5-pro";
/// Lower-tier model tried once when the primary call fails.
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";
const KEY_LABEL: &str = "Gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        }
    }

    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        // Key goes in a header so it never appears in reqwest's URL-bearing errors.
        let response = self
            .client
            .post(endpoint(
                &self.base_url,
                &format!("/v1beta/models/{model}:generateContent"),
            ))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, body));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.text().ok_or(ProviderError::EmptyContent)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(KEY_LABEL))?;

        match self.generate(api_key, PRIMARY_MODEL, system, prompt).await {
            Ok(text) => Ok(text),
            // An answer without text (e.g. a blocked prompt) is final.
            Err(ProviderError::EmptyContent) => Err(ProviderError::EmptyContent),
            Err(e) => {
                warn!("{PRIMARY_MODEL} is not available, falling back to {FALLBACK_MODEL}: {e}");
                self.generate(api_key, FALLBACK_MODEL, system, prompt).await
            }
        }
    }
}
