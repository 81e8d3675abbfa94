//! Visualize route — builds the graph payload for a requested word.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::error;

use crate::routes::is_valid_word;
use crate::state::AppState;
use lexigraph_core::Error;
use lexigraph_graph::{create_visualization, Directions, VizParams};

pub const MAX_NODES_BOUNDS: (usize, usize) = (10, 200);
pub const DEPTH_BOUNDS: (usize, usize) = (1, 4);
pub const NEIGHBOR_LIMIT_BOUNDS: (usize, usize) = (1, 20);

/// Numeric fields deserialize as `i64` so out-of-contract values (negative
/// included) still clamp to their bounds instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct VisualizeRequest {
    pub word: String,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: i64,
    #[serde(default = "default_depth")]
    pub depth: i64,
    #[serde(default = "default_neighbor_limit")]
    pub neighbor_limit: i64,
    #[serde(default)]
    pub directions: Directions,
}

fn default_max_nodes() -> i64 {
    50
}
fn default_depth() -> i64 {
    2
}
fn default_neighbor_limit() -> i64 {
    5
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/visualize", post(visualize))
}

/// Snap a value to the nearest bound when it falls outside [min, max].
fn clamp(value: i64, (min, max): (usize, usize)) -> usize {
    value.clamp(min as i64, max as i64) as usize
}

/// Validate and clamp a request into build parameters, or produce the
/// user-facing rejection message.
pub fn validate_request(req: &VisualizeRequest) -> Result<(String, VizParams), String> {
    let word = req.word.trim().to_lowercase();
    if !is_valid_word(&word) {
        return Err("Invalid word provided".to_string());
    }
    if !req.directions.outgoing && !req.directions.incoming {
        return Err("At least one relationship direction is required".to_string());
    }

    let params = VizParams {
        max_nodes: clamp(req.max_nodes, MAX_NODES_BOUNDS),
        depth: clamp(req.depth, DEPTH_BOUNDS),
        neighbor_limit: clamp(req.neighbor_limit, NEIGHBOR_LIMIT_BOUNDS),
        directions: req.directions,
    };
    Ok((word, params))
}

/// POST /visualize — single request/response exchange carrying the validated
/// parameters; responds with either an error string or the graph payload.
async fn visualize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VisualizeRequest>,
) -> impl IntoResponse {
    let (word, params) = match validate_request(&req) {
        Ok(v) => v,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            );
        }
    };

    let graph = state.graph.clone();
    let tx = state.progress_sender(&word);
    let build_word = word.clone();

    let result = tokio::task::spawn_blocking(move || {
        create_visualization(&graph, &build_word, &params, |update| {
            // No subscribers is fine; progress is fire-and-forget
            let _ = tx.send(update);
        })
    })
    .await;

    // Dropping the sender ends any remaining progress streams for this word
    state.remove_progress(&word);

    match result {
        Ok(Ok(graph_data)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "graph_data": graph_data })),
        ),
        Ok(Err(Error::NotFound(_))) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Word not found in graph" })),
        ),
        Ok(Err(e)) => {
            error!("Visualization error for word '{}': {}", word, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
        }
        Err(e) => {
            error!("Visualization task panicked for word '{}': {}", word, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(word: &str) -> VisualizeRequest {
        VisualizeRequest {
            word: word.to_string(),
            max_nodes: 50,
            depth: 2,
            neighbor_limit: 5,
            directions: Directions::default(),
        }
    }

    #[test]
    fn test_rejects_empty_and_whitespace_words() {
        assert!(validate_request(&request("")).is_err());
        assert!(validate_request(&request("   ")).is_err());
        assert!(validate_request(&request("two words")).is_err());
    }

    #[test]
    fn test_rejects_no_direction() {
        let mut req = request("cat");
        req.directions = Directions {
            outgoing: false,
            incoming: false,
        };
        assert_eq!(
            validate_request(&req).unwrap_err(),
            "At least one relationship direction is required"
        );
    }

    #[test]
    fn test_word_normalized() {
        let (word, _) = validate_request(&request("  Cat ")).unwrap();
        assert_eq!(word, "cat");
    }

    #[test]
    fn test_clamps_to_bounds() {
        let mut req = request("cat");
        req.max_nodes = 500;
        req.depth = 0;
        req.neighbor_limit = 99;
        let (_, params) = validate_request(&req).unwrap();
        assert_eq!(params.max_nodes, 200);
        assert_eq!(params.depth, 1);
        assert_eq!(params.neighbor_limit, 20);
    }

    #[test]
    fn test_negative_values_clamp_to_minimum() {
        let req: VisualizeRequest = serde_json::from_str(
            r#"{"word": "cat", "max_nodes": -5, "depth": -1, "neighbor_limit": 0}"#,
        )
        .unwrap();
        let (_, params) = validate_request(&req).unwrap();
        assert_eq!(params.max_nodes, 10);
        assert_eq!(params.depth, 1);
        assert_eq!(params.neighbor_limit, 1);
    }

    #[test]
    fn test_in_range_values_untouched() {
        let req = request("cat");
        let (_, params) = validate_request(&req).unwrap();
        assert_eq!(params.max_nodes, 50);
        assert_eq!(params.depth, 2);
        assert_eq!(params.neighbor_limit, 5);
    }

    #[test]
    fn test_request_defaults() {
        let req: VisualizeRequest = serde_json::from_str(r#"{"word": "cat"}"#).unwrap();
        assert_eq!(req.max_nodes, 50);
        assert_eq!(req.depth, 2);
        assert_eq!(req.neighbor_limit, 5);
        assert!(req.directions.outgoing && req.directions.incoming);
    }

    #[test]
    fn test_request_body_shape() {
        // The wire shape the front-end sends
        let req: VisualizeRequest = serde_json::from_str(
            r#"{
                "word": "cat",
                "max_nodes": 50,
                "depth": 2,
                "neighbor_limit": 5,
                "directions": {"outgoing": true, "incoming": false}
            }"#,
        )
        .unwrap();
        assert_eq!(req.word, "cat");
        assert!(!req.directions.incoming);
    }
}
