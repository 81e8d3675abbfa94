//! Lexigraph Graph — the directed dictionary graph: construction,
//! persistence, depth-limited subgraph extraction, and visualization
//! payload assembly.

pub mod graph;
pub mod subgraph;
pub mod viz;

pub use graph::{DictionaryGraph, Directions, GraphStats};
pub use subgraph::Subgraph;
pub use viz::{create_visualization, GraphData, ProgressUpdate, VizParams};
