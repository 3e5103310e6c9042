//! Sequential fan-out of one prompt to every configured provider.

use serde::Serialize;
use tracing::info;

use crate::enhancement::prompts::{get_prompt, render_prompt, PromptKey};
use crate::providers::{run_provider, ProviderOutcome, ProviderSet};

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced_resume_mistral: ProviderOutcome,
    pub enhanced_resume_gemini: ProviderOutcome,
    pub enhanced_resume_groq: ProviderOutcome,
}

/// Picks the template for a request: a non-blank custom template wins,
/// otherwise `prompt_key` is looked up with the usual fallback.
pub fn select_template<'a>(custom: Option<&'a str>, prompt_key: Option<&str>) -> &'a str {
    match custom.filter(|t| !t.trim().is_empty()) {
        Some(template) => template,
        None => prompt_key
            .map(get_prompt)
            .unwrap_or_else(|| PromptKey::default().template()),
    }
}

/// Renders the prompt and calls Mistral, Gemini and Groq one after another.
/// Always returns all three outcomes.
pub async fn enhance_resume(
    providers: &ProviderSet,
    template: &str,
    resume_text: &str,
    job_description: &str,
) -> EnhanceResponse {
    let prompt = render_prompt(template, resume_text, job_description);

    let enhanced_resume_mistral = run_provider(providers.mistral.as_ref(), &prompt).await;
    let enhanced_resume_gemini = run_provider(providers.gemini.as_ref(), &prompt).await;
    let enhanced_resume_groq = run_provider(providers.groq.as_ref(), &prompt).await;

    let failed = [
        &enhanced_resume_mistral,
        &enhanced_resume_gemini,
        &enhanced_resume_groq,
    ]
    .iter()
    .filter(|o| o.is_failed())
    .count();
    info!("Resume enhancement finished: {} of 3 providers failed", failed);

    EnhanceResponse {
        enhanced_resume_mistral,
        enhanced_resume_gemini,
        enhanced_resume_groq,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::enhancement::prompts::{ATS_OPTIMIZATION_TEMPLATE, RESUME_ENHANCEMENT_TEMPLATE};
    use crate::providers::testing::{Script, ScriptedProvider};
    use crate::providers::ENHANCE_ERROR;

    #[test]
    fn test_select_template_defaults_to_resume_enhancement() {
        assert_eq!(select_template(None, None), RESUME_ENHANCEMENT_TEMPLATE);
    }

    #[test]
    fn test_select_template_resolves_key() {
        assert_eq!(
            select_template(None, Some("ats_optimization")),
            ATS_OPTIMIZATION_TEMPLATE
        );
        assert_eq!(select_template(None, Some("bogus")), RESUME_ENHANCEMENT_TEMPLATE);
    }

    #[test]
    fn test_select_template_custom_wins_unless_blank() {
        assert_eq!(
            select_template(Some("Rewrite {resume}"), Some("ats_optimization")),
            "Rewrite {resume}"
        );
        assert_eq!(select_template(Some("  "), None), RESUME_ENHANCEMENT_TEMPLATE);
    }

    #[tokio::test]
    async fn test_every_provider_gets_the_same_rendered_prompt() {
        let mistral = Arc::new(ScriptedProvider::new("Mistral", Script::Reply("m")));
        let gemini = Arc::new(ScriptedProvider::new("Gemini", Script::Reply("g")));
        let groq = Arc::new(ScriptedProvider::new("Groq", Script::Reply("q")));
        let providers = ProviderSet {
            mistral: mistral.clone(),
            gemini: gemini.clone(),
            groq: groq.clone(),
        };

        let response = enhance_resume(&providers, "{resume}|{job_description}", "R", "J").await;

        assert_eq!(response.enhanced_resume_mistral.as_str(), "m");
        assert_eq!(response.enhanced_resume_gemini.as_str(), "g");
        assert_eq!(response.enhanced_resume_groq.as_str(), "q");
        for provider in [&mistral, &gemini, &groq] {
            assert_eq!(*provider.prompts.lock().unwrap(), vec!["R|J".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_later_providers() {
        let groq = Arc::new(ScriptedProvider::new("Groq", Script::Reply("still here")));
        let providers = ProviderSet {
            mistral: Arc::new(ScriptedProvider::new("Mistral", Script::ServerError)),
            gemini: Arc::new(ScriptedProvider::new("Gemini", Script::MissingKey("Gemini"))),
            groq: groq.clone(),
        };

        let response = enhance_resume(&providers, RESUME_ENHANCEMENT_TEMPLATE, "R", "J").await;

        assert_eq!(response.enhanced_resume_mistral.as_str(), ENHANCE_ERROR);
        assert_eq!(
            response.enhanced_resume_gemini.as_str(),
            "Error: Gemini API key is missing."
        );
        assert_eq!(response.enhanced_resume_groq.as_str(), "still here");
        assert_eq!(groq.prompts.lock().unwrap().len(), 1);
    }
}
