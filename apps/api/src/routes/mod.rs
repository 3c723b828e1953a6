pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::results::handlers as results;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.request_body_limit();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/upload", get(results::handle_upload_info))
        .route("/results", get(results::handle_results))
        .route("/api/extract", post(extraction::handle_extract))
        .route(
            "/api/extract/upload",
            post(extraction::handle_extract_upload),
        )
        .route("/api/suggestions", post(suggestions::handle_suggestions))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
