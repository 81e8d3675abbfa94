//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use lexigraph_core::LexigraphConfig;
use lexigraph_graph::{DictionaryGraph, ProgressUpdate};

/// Capacity of a per-word progress channel. Producers never block; slow
/// subscribers skip ahead past lagged events.
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: LexigraphConfig,
    pub graph: Arc<DictionaryGraph>,
    /// Per-word progress fan-out channels. An entry lives from the first
    /// subscription or visualize call for a word until that visualize call
    /// completes or the last subscriber disconnects; removal drops the
    /// sender, which ends remaining streams.
    progress: RwLock<HashMap<String, broadcast::Sender<ProgressUpdate>>>,
}

impl AppState {
    pub fn new(config: LexigraphConfig, graph: DictionaryGraph) -> Self {
        Self {
            config,
            graph: Arc::new(graph),
            progress: RwLock::new(HashMap::new()),
        }
    }

    /// Get the progress sender for a word, creating the channel if absent.
    pub fn progress_sender(&self, word: &str) -> broadcast::Sender<ProgressUpdate> {
        if let Some(tx) = self.progress.read().get(word) {
            return tx.clone();
        }
        let mut channels = self.progress.write();
        channels
            .entry(word.to_string())
            .or_insert_with(|| broadcast::channel(PROGRESS_CHANNEL_CAPACITY).0)
            .clone()
    }

    /// Drop a word's progress channel once its visualize request finishes.
    pub fn remove_progress(&self, word: &str) {
        self.progress.write().remove(word);
    }

    /// Drop a word's channel when its last subscriber disconnects. The
    /// departing receiver is still alive when this runs, so a count of one
    /// means nobody else is listening.
    pub fn release_progress(&self, word: &str) {
        let mut channels = self.progress.write();
        if channels
            .get(word)
            .is_some_and(|tx| tx.receiver_count() <= 1)
        {
            channels.remove(word);
        }
    }

    #[cfg(test)]
    pub fn progress_channel_count(&self) -> usize {
        self.progress.read().len()
    }
}
