use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// Provider keys are optional: a missing key is reported per provider at call
/// time instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub mistral_base_url: String,
    pub gemini_base_url: String,
    pub groq_base_url: String,
    pub media_root: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            mistral_api_key: optional_env("MISTRAL_API_KEY"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            groq_api_key: optional_env("GROQ_API_KEY"),
            mistral_base_url: env_or("MISTRAL_BASE_URL", DEFAULT_MISTRAL_BASE_URL),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            groq_base_url: env_or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            media_root: PathBuf::from(env_or("MEDIA_ROOT", "media")),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Reads `key`, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    normalize_env_value(std::env::var(key).ok())
}

fn normalize_env_value(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Config with no provider keys, rooted at `media_root`.
    pub fn for_tests(media_root: PathBuf) -> Self {
        Config {
            mistral_api_key: None,
            gemini_api_key: None,
            groq_api_key: None,
            mistral_base_url: DEFAULT_MISTRAL_BASE_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            media_root,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
