//! Depth-limited subgraph extraction around a target word.

use petgraph::Direction;
use std::collections::{HashSet, VecDeque};

use crate::graph::{DictionaryGraph, Directions};

/// A subgraph around a target word: the collected words in breadth-first
/// order and the induced edges (graph direction preserved).
#[derive(Debug, Clone)]
pub struct Subgraph {
    pub words: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl DictionaryGraph {
    /// Extract the neighborhood of `word`.
    ///
    /// Breadth-first expansion: at most `neighbor_limit` neighbors per word,
    /// at most `depth` levels out from the target, at most `max_nodes` words
    /// in total. Returns `None` when `word` is not in the graph.
    pub fn subgraph(
        &self,
        word: &str,
        depth: usize,
        neighbor_limit: usize,
        max_nodes: usize,
        directions: &Directions,
    ) -> Option<Subgraph> {
        let start = self.index_of(word)?;

        let mut included = HashSet::new();
        let mut words = Vec::new();
        let mut queue = VecDeque::new();

        included.insert(start);
        words.push(self.word_at(start).to_string());
        queue.push_back((start, 0usize));

        while let Some((idx, level)) = queue.pop_front() {
            if level >= depth || words.len() >= max_nodes {
                continue;
            }
            let current = self.word_at(idx).to_string();
            for neighbor in self.neighbors(&current, directions, neighbor_limit) {
                if words.len() >= max_nodes {
                    break;
                }
                // neighbors() only returns words present in the graph
                let n_idx = match self.index_of(&neighbor) {
                    Some(idx) => idx,
                    None => continue,
                };
                if included.insert(n_idx) {
                    words.push(neighbor);
                    queue.push_back((n_idx, level + 1));
                }
            }
        }

        // Induced edges over the collected set, in graph direction.
        let mut edges = Vec::new();
        for &idx in &included {
            for target in self.inner().neighbors_directed(idx, Direction::Outgoing) {
                if included.contains(&target) {
                    edges.push((
                        self.word_at(idx).to_string(),
                        self.word_at(target).to_string(),
                    ));
                }
            }
        }
        edges.sort();
        edges.dedup();

        Some(Subgraph { words, edges })
    }
}
