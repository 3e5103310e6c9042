pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::enhancement::handlers::handle_enhance_resume;
use crate::state::AppState;
use crate::upload::handlers::{handle_upload_jd, handle_upload_resume};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/upload_resume/", post(handle_upload_resume))
        .route("/upload_jd/", post(handle_upload_jd))
        // Only the upload routes above get the raised body limit.
        .layer(upload_limit)
        .route("/enhance_resume/", post(handle_enhance_resume))
        .route("/health", get(health::health_handler))
        .with_state(state)
}
