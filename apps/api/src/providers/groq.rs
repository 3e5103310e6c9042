use async_trait::async_trait;
use reqwest::Client;

use super::chat::{post_chat_completion, ChatRequest};
use super::{endpoint, CompletionProvider, ProviderError};

pub const MODEL: &str = "llama3-8b-8192";
const KEY_LABEL: &str = "GROQ";

/// Groq client, speaking Groq's OpenAI-compatible chat endpoint.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(KEY_LABEL))?;

        post_chat_completion(
            &self.client,
            &endpoint(&self.base_url, "/openai/v1/chat/completions"),
            api_key,
            &ChatRequest::new(MODEL, system, prompt),
        )
        .await
    }
}
