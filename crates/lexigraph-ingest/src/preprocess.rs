//! Dictionary preprocessing — turns `dictionary.json` into the persisted
//! token table the graph builder consumes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::info;

use lexigraph_core::{DataPaths, Error, Result};

use crate::tokenize::normalize;

/// Preprocessed dictionary: headword → normalized definition tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessedDictionary {
    /// SHA-256 of the dictionary file this was built from.
    pub content_hash: String,
    /// RFC3339 timestamp of the preprocessing run.
    pub processed_at: String,
    pub entries: HashMap<String, Vec<String>>,
}

/// Preprocess the dictionary file, skipping work when the stored artifact
/// already matches the current dictionary contents.
pub fn preprocess_dictionary(paths: &DataPaths) -> Result<PreprocessedDictionary> {
    let raw = std::fs::read_to_string(&paths.dictionary_file).map_err(|e| {
        Error::Preprocess(format!(
            "cannot read {}: {}",
            paths.dictionary_file.display(),
            e
        ))
    })?;

    let content_hash = hex::encode(Sha256::digest(raw.as_bytes()));

    if let Ok(existing) = load_preprocessed(paths) {
        if existing.content_hash == content_hash {
            info!(
                "Dictionary unchanged ({} entries), skipping preprocessing",
                existing.entries.len()
            );
            return Ok(existing);
        }
    }

    let dictionary: HashMap<String, String> = serde_json::from_str(&raw)?;
    info!("Preprocessing {} dictionary entries", dictionary.len());

    let mut entries = HashMap::with_capacity(dictionary.len());
    for (word, definition) in &dictionary {
        let headword = word.trim().to_lowercase();
        if headword.is_empty() {
            continue;
        }
        entries.insert(headword, normalize(definition));
    }

    let processed = PreprocessedDictionary {
        content_hash,
        processed_at: chrono::Utc::now().to_rfc3339(),
        entries,
    };

    let json = serde_json::to_string(&processed)?;
    std::fs::write(&paths.preprocessed_file, json)?;
    info!(
        "Saved {} preprocessed entries to {}",
        processed.entries.len(),
        paths.preprocessed_file.display()
    );

    Ok(processed)
}

/// Load a previously saved preprocessing artifact.
pub fn load_preprocessed(paths: &DataPaths) -> Result<PreprocessedDictionary> {
    let raw = std::fs::read_to_string(&paths.preprocessed_file).map_err(|e| {
        Error::Preprocess(format!(
            "cannot read {}: {} (run `lexigraph process` first)",
            paths.preprocessed_file.display(),
            e
        ))
    })?;
    Ok(serde_json::from_str(&raw)?)
}
