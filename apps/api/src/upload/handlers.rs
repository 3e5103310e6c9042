//! Axum handlers for the two upload endpoints.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::extract::extract_text;
use crate::upload::{save_uploaded_file, JOB_DESCRIPTION_FIELD, RESUME_FIELD};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub extracted_text: String,
}

/// POST /upload_resume/
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    process_upload(&state, multipart, RESUME_FIELD).await
}

/// POST /upload_jd/
pub async fn handle_upload_jd(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    process_upload(&state, multipart, JOB_DESCRIPTION_FIELD).await
}

/// Saves the file sent under `field` into the folder of the same name and
/// returns its extracted text.
async fn process_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    field: &str,
) -> Result<Json<UploadResponse>, AppError> {
    info!("Received {field} upload request");

    let upload = match multipart {
        Ok(mut multipart) => find_file(&mut multipart, field).await?,
        Err(rejection) => {
            warn!("Rejected {field} upload: {rejection}");
            None
        }
    };

    let Some((filename, data)) = upload else {
        warn!("No {field} file uploaded");
        return Err(AppError::Validation(format!("No {field} file uploaded")));
    };

    let stored = save_uploaded_file(state.store.as_ref(), field, filename.as_deref(), data).await?;
    let extracted_text = extract_text(stored.path).await;

    info!(
        "{} processed successfully ({} chars extracted from {})",
        field,
        extracted_text.len(),
        stored.key
    );
    Ok(Json(UploadResponse { extracted_text }))
}

/// First part named `field`, with its declared filename and bytes.
async fn find_file(
    multipart: &mut Multipart,
    field: &str,
) -> Result<Option<(Option<String>, Bytes)>, AppError> {
    while let Some(part) = multipart
        .next_field()
        .await
        .context("Failed to read multipart body")?
    {
        if part.name() != Some(field) {
            continue;
        }
        let filename = part.file_name().map(String::from);
        let data = part
            .bytes()
            .await
            .with_context(|| format!("Failed to read {field} file contents"))?;
        return Ok(Some((filename, data)));
    }
    Ok(None)
}
