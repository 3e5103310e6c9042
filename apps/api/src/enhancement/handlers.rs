use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::enhancement::service::{enhance_resume, select_template, EnhanceResponse};
use crate::errors::AppError;
use crate::state::AppState;

const REQUIRED_FIELDS_MESSAGE: &str = "Resume text and job description are required";

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
    /// Caller-supplied template with `{resume}` / `{job_description}` placeholders.
    pub prompt: Option<String>,
    /// Name of a built-in template; ignored when `prompt` is given.
    pub prompt_key: Option<String>,
}

/// POST /enhance_resume/
///
/// Always 200 once the input is valid; provider failures show up as
/// placeholder strings in the matching field.
pub async fn handle_enhance_resume(
    State(state): State<AppState>,
    payload: Result<Json<EnhanceRequest>, JsonRejection>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected enhancement request body: {rejection}");
        AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    })?;

    let resume_text = non_empty(request.resume_text.as_deref());
    let job_description = non_empty(request.job_description.as_deref());
    let (Some(resume_text), Some(job_description)) = (resume_text, job_description) else {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    let template = select_template(request.prompt.as_deref(), request.prompt_key.as_deref());
    let response = enhance_resume(&state.providers, template, resume_text, job_description).await;

    Ok(Json(response))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
