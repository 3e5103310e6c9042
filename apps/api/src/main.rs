mod config;
mod enhancement;
mod errors;
mod providers;
mod routes;
mod state;
mod storage;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::providers::{gemini, groq, mistral, ProviderSet};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::LocalFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume enhancer API v{}", env!("CARGO_PKG_VERSION"));

    // One pooled client shared by all providers; reqwest defaults, no timeout.
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let providers = ProviderSet::from_config(&config, http);
    info!(
        "Providers: mistral={} ({}), gemini={} ({} -> {}), groq={} ({})",
        key_status(config.mistral_api_key.as_deref()),
        mistral::MODEL,
        key_status(config.gemini_api_key.as_deref()),
        gemini::PRIMARY_MODEL,
        gemini::FALLBACK_MODEL,
        key_status(config.groq_api_key.as_deref()),
        groq::MODEL,
    );

    let store = LocalFileStore::new(&config.media_root);
    info!("Storing uploads under {}", store.root().display());

    let state = AppState {
        config: config.clone(),
        store: Arc::new(store),
        providers,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn key_status(key: Option<&str>) -> &'static str {
    if key.is_some() {
        "configured"
    } else {
        "missing key"
    }
}
