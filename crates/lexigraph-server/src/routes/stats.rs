//! Graph statistics route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// GET /stats — node/edge counts and average degree of the loaded graph.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.graph.stats();
    Json(serde_json::json!({
        "nodes": stats.nodes,
        "edges": stats.edges,
        "avg_degree": stats.avg_degree,
    }))
}
