use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Name used when the client does not declare one, or declares only path separators.
pub const FALLBACK_FILENAME: &str = "upload.pdf";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a saved upload landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage-relative key, `{folder}/{filename}`.
    pub key: String,
    /// Absolute or root-relative path on disk, readable by the extractor.
    pub path: PathBuf,
}

/// Persists uploaded files. Existing files at the same key are overwritten.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(
        &self,
        folder: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<StoredFile, StorageError>;
}

/// Stores uploads under a root directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(
        &self,
        folder: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<StoredFile, StorageError> {
        let filename = sanitize_filename(filename);
        let dir = self.root.join(folder);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::Io {
                path: dir.clone(),
                source,
            })?;

        let path = dir.join(&filename);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        debug!("Saved {} bytes to {}", data.len(), path.display());

        Ok(StoredFile {
            key: format!("{folder}/{filename}"),
            path,
        })
    }
}

/// Keeps only the final path component of a client-declared name.
fn sanitize_filename(name: &str) -> String {
    name.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(FALLBACK_FILENAME)
        .to_string()
}
