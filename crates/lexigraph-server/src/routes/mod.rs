//! HTTP route handlers.

pub mod assets;
pub mod progress;
pub mod stats;
pub mod visualize;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(assets::routes())
        .merge(visualize::routes())
        .merge(progress::routes())
        .merge(stats::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A word is addressable when it is non-empty and purely alphanumeric.
pub(crate) fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphanumeric())
}
