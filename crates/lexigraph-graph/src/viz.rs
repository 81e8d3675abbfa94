//! Visualization payload assembly.
//!
//! Produces the node/edge/options structure the front-end hands to its
//! network widget, reporting progress through a caller-supplied callback.

use serde::{Deserialize, Serialize};

use lexigraph_core::{Error, Result};

use crate::graph::{DictionaryGraph, Directions};

const NODE_COLOR_DEFAULT: &str = "#97c2fc";
const NODE_COLOR_TARGET: &str = "#ff4444";
const NODE_COLOR_NEIGHBOR: &str = "#44ff44";

const NODE_SIZE_DEFAULT: u32 = 25;
const NODE_SIZE_TARGET: u32 = 35;
const NODE_SIZE_NEIGHBOR: u32 = 30;

/// A server-pushed progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub progress: u8,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(progress: u8, message: impl Into<String>) -> Self {
        Self {
            progress,
            message: message.into(),
        }
    }
}

/// Validated visualization parameters.
#[derive(Debug, Clone)]
pub struct VizParams {
    pub max_nodes: usize,
    pub depth: usize,
    pub neighbor_limit: usize,
    pub directions: Directions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizNode {
    pub id: String,
    pub label: String,
    pub size: u32,
    pub color: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Smooth {
    #[serde(rename = "type")]
    pub kind: String,
    pub roundness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizEdge {
    pub from: String,
    pub to: String,
    pub arrows: String,
    pub smooth: Smooth,
}

/// The opaque payload handed to the rendering widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<VizNode>,
    pub edges: Vec<VizEdge>,
    pub options: serde_json::Value,
}

fn render_options() -> serde_json::Value {
    serde_json::json!({
        "physics": {
            "forceAtlas2Based": {
                "gravitationalConstant": -50,
                "centralGravity": 0.01,
                "springLength": 100,
                "springConstant": 0.08
            },
            "maxVelocity": 50,
            "minVelocity": 0.1,
            "solver": "forceAtlas2Based",
            "timestep": 0.35
        },
        "interaction": {
            "navigationButtons": true,
            "keyboard": true
        }
    })
}

/// Assemble visualization data for `word`, emitting progress along the way.
///
/// Milestones: 5 while loading, 30–65 over nodes, 65–95 over edges, 100 when
/// the payload is ready. Returns [`Error::NotFound`] when the word has no
/// node in the graph.
pub fn create_visualization(
    graph: &DictionaryGraph,
    word: &str,
    params: &VizParams,
    mut progress: impl FnMut(ProgressUpdate),
) -> Result<GraphData> {
    progress(ProgressUpdate::new(5, "Loading graph data..."));

    let sub = graph
        .subgraph(
            word,
            params.depth,
            params.neighbor_limit,
            params.max_nodes,
            &params.directions,
        )
        .ok_or_else(|| Error::NotFound(format!("word '{word}' not in graph")))?;

    progress(ProgressUpdate::new(30, "Processing graph data..."));

    let is_neighbor = |node: &str| {
        (params.directions.outgoing && graph.has_edge(word, node))
            || (params.directions.incoming && graph.has_edge(node, word))
    };

    let node_count = sub.words.len();
    let mut nodes = Vec::with_capacity(node_count);
    for (i, node) in sub.words.iter().enumerate() {
        let (size, color) = if node == word {
            (NODE_SIZE_TARGET, NODE_COLOR_TARGET)
        } else if is_neighbor(node) {
            (NODE_SIZE_NEIGHBOR, NODE_COLOR_NEIGHBOR)
        } else {
            (NODE_SIZE_DEFAULT, NODE_COLOR_DEFAULT)
        };

        nodes.push(VizNode {
            id: node.clone(),
            label: node.clone(),
            size,
            color: color.to_string(),
            title: format!("Word: {node}"),
        });

        if i % (node_count / 10).max(1) == 0 {
            let pct = 30.0 + (i as f64 / node_count as f64) * 35.0;
            progress(ProgressUpdate::new(
                pct as u8,
                format!("Processing nodes ({i}/{node_count})..."),
            ));
        }
    }

    let edge_count = sub.edges.len();
    let mut edges = Vec::with_capacity(edge_count);
    for (i, (from, to)) in sub.edges.iter().enumerate() {
        edges.push(VizEdge {
            from: from.clone(),
            to: to.clone(),
            arrows: "to".to_string(),
            smooth: Smooth {
                kind: "curvedCW".to_string(),
                roundness: 0.2,
            },
        });

        if i % (edge_count / 10).max(1) == 0 {
            let pct = 65.0 + (i as f64 / edge_count.max(1) as f64) * 30.0;
            progress(ProgressUpdate::new(
                pct as u8,
                format!("Processing edges ({i}/{edge_count})..."),
            ));
        }
    }

    progress(ProgressUpdate::new(95, "Finalizing data..."));

    let data = GraphData {
        nodes,
        edges,
        options: render_options(),
    };

    progress(ProgressUpdate::new(100, "Visualization data ready!"));
    Ok(data)
}
