// Upload API: persist an uploaded PDF and hand back its text.

pub mod extract;
pub mod handlers;

#[cfg(test)]
pub mod fixtures;

use bytes::Bytes;

use crate::storage::{FileStore, StorageError, StoredFile, FALLBACK_FILENAME};

/// Multipart field, and storage folder, for resume uploads.
pub const RESUME_FIELD: &str = "resume";
/// Multipart field, and storage folder, for job description uploads.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// Writes `data` to `{folder}/{filename}` in `store`.
pub async fn save_uploaded_file(
    store: &dyn FileStore,
    folder: &str,
    filename: Option<&str>,
    data: Bytes,
) -> Result<StoredFile, StorageError> {
    store
        .save(folder, filename.unwrap_or(FALLBACK_FILENAME), data)
        .await
}
