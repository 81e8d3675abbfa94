//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to all Lexigraph data artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Raw dictionary input (`data/dictionary.json`).
    pub dictionary_file: PathBuf,
    /// Preprocessed definition tokens (`data/preprocessed.json`).
    pub preprocessed_file: PathBuf,
    /// Persisted dictionary graph (`data/graph.json`).
    pub graph_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            dictionary_file: root.join("dictionary.json"),
            preprocessed_file: root.join("preprocessed.json"),
            graph_file: root.join("graph.json"),
            root,
        })
    }
}

/// Top-level Lexigraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexigraphConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data artifact paths.
    pub data_paths: DataPaths,
}

impl LexigraphConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self { port, data_paths })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_layout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("data")).unwrap();
        assert!(paths.root.exists());
        assert_eq!(paths.dictionary_file.file_name().unwrap(), "dictionary.json");
        assert_eq!(paths.graph_file.file_name().unwrap(), "graph.json");
        assert!(paths.preprocessed_file.starts_with(&paths.root));
    }
}
