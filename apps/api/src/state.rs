use std::sync::Arc;

use crate::config::Config;
use crate::providers::ProviderSet;
use crate::storage::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Where uploads are written before extraction.
    pub store: Arc<dyn FileStore>,
    pub providers: ProviderSet,
}
