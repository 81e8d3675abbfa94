//! Dictionary graph backend using petgraph.
//!
//! Nodes are headwords; an edge `a → b` means headword `b` appears in the
//! definition of headword `a`.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

use lexigraph_core::{Error, Result};

/// Which relationship directions to follow from a word.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Directions {
    #[serde(default = "default_true")]
    pub outgoing: bool,
    #[serde(default = "default_true")]
    pub incoming: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Directions {
    fn default() -> Self {
        Self {
            outgoing: true,
            incoming: true,
        }
    }
}

/// Basic graph statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub avg_degree: f64,
}

/// Persisted graph file format.
#[derive(Serialize, Deserialize)]
struct PersistedGraph {
    built_at: String,
    nodes: Vec<String>,
    /// Edges as (source index, target index) into `nodes`.
    edges: Vec<(usize, usize)>,
}

/// In-memory dictionary graph with a headword → node index side table.
#[derive(Debug)]
pub struct DictionaryGraph {
    graph: DiGraph<String, ()>,
    node_index: HashMap<String, NodeIndex>,
}

impl DictionaryGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Build the graph from preprocessed entries (headword → definition tokens).
    ///
    /// Every headword becomes a node; a definition token that is itself a
    /// headword becomes an edge. Self-references are skipped.
    pub fn build(entries: &HashMap<String, Vec<String>>) -> Self {
        let mut g = Self::new();

        for word in entries.keys() {
            g.intern(word);
        }

        let mut edge_count = 0usize;
        for (word, tokens) in entries {
            let from = g.node_index[word.as_str()];
            for token in tokens {
                if token == word {
                    continue;
                }
                if let Some(&to) = g.node_index.get(token.as_str()) {
                    g.graph.add_edge(from, to, ());
                    edge_count += 1;
                }
            }
        }

        info!(
            "Graph constructed: {} words, {} relationships",
            g.graph.node_count(),
            edge_count
        );
        g
    }

    fn intern(&mut self, word: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(word) {
            return idx;
        }
        let idx = self.graph.add_node(word.to_string());
        self.node_index.insert(word.to_string(), idx);
        idx
    }

    pub fn contains(&self, word: &str) -> bool {
        self.node_index.contains_key(word)
    }

    pub(crate) fn index_of(&self, word: &str) -> Option<NodeIndex> {
        self.node_index.get(word).copied()
    }

    pub(crate) fn word_at(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Whether `from`'s definition references `to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Neighbors of a word in the requested directions: successors first,
    /// then predecessors, deduped preserving order, truncated to `limit`.
    pub fn neighbors(&self, word: &str, directions: &Directions, limit: usize) -> Vec<String> {
        let idx = match self.index_of(word) {
            Some(idx) => idx,
            None => return Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut out = Vec::new();

        let push = |g: &Self, n: NodeIndex, out: &mut Vec<String>, seen: &mut HashSet<NodeIndex>| {
            if seen.insert(n) {
                out.push(g.word_at(n).to_string());
            }
        };

        if directions.outgoing {
            for n in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                push(self, n, &mut out, &mut seen);
            }
        }
        if directions.incoming {
            for n in self.graph.neighbors_directed(idx, Direction::Incoming) {
                push(self, n, &mut out, &mut seen);
            }
        }

        out.truncate(limit);
        out
    }

    pub fn stats(&self) -> GraphStats {
        let nodes = self.graph.node_count();
        let edges = self.graph.edge_count();
        let avg_degree = if nodes == 0 {
            0.0
        } else {
            // in-degree + out-degree summed over all nodes
            (2 * edges) as f64 / nodes as f64
        };
        GraphStats {
            nodes,
            edges,
            avg_degree,
        }
    }

    /// Save the graph to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let nodes: Vec<String> = self.graph.node_weights().cloned().collect();
        let edges: Vec<(usize, usize)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (a.index(), b.index()))
            .collect();

        let persisted = PersistedGraph {
            built_at: chrono::Utc::now().to_rfc3339(),
            nodes,
            edges,
        };
        std::fs::write(path.as_ref(), serde_json::to_string(&persisted)?)?;
        info!("Graph saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a graph previously written by [`DictionaryGraph::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Graph(format!(
                "cannot read {}: {} (run `lexigraph build` first)",
                path.as_ref().display(),
                e
            ))
        })?;
        let persisted: PersistedGraph = serde_json::from_str(&raw)?;

        let mut g = Self::new();
        let indices: Vec<NodeIndex> = persisted.nodes.iter().map(|w| g.intern(w)).collect();
        for (a, b) in &persisted.edges {
            let (from, to) = match (indices.get(*a), indices.get(*b)) {
                (Some(&from), Some(&to)) => (from, to),
                _ => return Err(Error::Graph(format!("edge ({a}, {b}) out of range"))),
            };
            g.graph.add_edge(from, to, ());
        }

        info!(
            "Loaded graph with {} nodes and {} edges",
            g.graph.node_count(),
            g.graph.edge_count()
        );
        Ok(g)
    }
}

impl Default for DictionaryGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> DictionaryGraph {
        let entries: HashMap<String, Vec<String>> = [
            ("cat", vec!["animal", "mammal"]),
            ("mammal", vec!["animal"]),
            ("animal", vec!["life"]),
            ("life", vec![]),
            ("dog", vec!["animal", "cat"]),
        ]
        .into_iter()
        .map(|(w, ts)| {
            (
                w.to_string(),
                ts.into_iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect();
        DictionaryGraph::build(&entries)
    }

    #[test]
    fn test_build_edges() {
        let g = sample_graph();
        assert!(g.contains("cat"));
        assert!(g.has_edge("cat", "animal"));
        assert!(g.has_edge("dog", "cat"));
        assert!(!g.has_edge("cat", "dog"));
        // tokens that are not headwords produce no nodes
        assert!(!g.contains("feline"));
    }

    #[test]
    fn test_self_references_skipped() {
        let entries: HashMap<String, Vec<String>> =
            [("echo".to_string(), vec!["echo".to_string(), "sound".to_string()])]
                .into_iter()
                .collect();
        let g = DictionaryGraph::build(&entries);
        assert!(!g.has_edge("echo", "echo"));
    }

    #[test]
    fn test_stats() {
        let g = sample_graph();
        let stats = g.stats();
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.edges, 6);
        assert!((stats.avg_degree - 12.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_neighbors_directions() {
        let g = sample_graph();
        let out_only = Directions {
            outgoing: true,
            incoming: false,
        };
        let in_only = Directions {
            outgoing: false,
            incoming: true,
        };

        let outgoing = g.neighbors("cat", &out_only, 10);
        assert!(outgoing.contains(&"animal".to_string()));
        assert!(!outgoing.contains(&"dog".to_string()));

        let incoming = g.neighbors("cat", &in_only, 10);
        assert_eq!(incoming, vec!["dog".to_string()]);

        assert_eq!(g.neighbors("cat", &Directions::default(), 1).len(), 1);
        assert!(g.neighbors("missing", &Directions::default(), 10).is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let g = sample_graph();
        g.save(&path).unwrap();

        let loaded = DictionaryGraph::load(&path).unwrap();
        assert_eq!(loaded.stats().nodes, g.stats().nodes);
        assert_eq!(loaded.stats().edges, g.stats().edges);
        assert!(loaded.has_edge("dog", "cat"));
        assert!(loaded.has_edge("mammal", "animal"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DictionaryGraph::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::Graph(_)));
    }
}
