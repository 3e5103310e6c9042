use async_trait::async_trait;
use reqwest::Client;

use super::chat::{post_chat_completion, ChatRequest};
use super::{endpoint, CompletionProvider, ProviderError};

pub const MODEL: &str = "mistral-medium";
const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;
const KEY_LABEL: &str = "Mistral";

/// Mistral chat-completions client.
#[derive(Clone)]
pub struct MistralClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MistralClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionProvider for MistralClient {
    fn name(&self) -> &'static str {
        "Mistral"
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(KEY_LABEL))?;

        let request = ChatRequest {
            max_tokens: Some(MAX_TOKENS),
            temperature: Some(TEMPERATURE),
            ..ChatRequest::new(MODEL, system, prompt)
        };

        post_chat_completion(
            &self.client,
            &endpoint(&self.base_url, "/v1/chat/completions"),
            api_key,
            &request,
        )
        .await
    }
}
