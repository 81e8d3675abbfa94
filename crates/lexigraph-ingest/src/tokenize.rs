//! Definition tokenization — lowercase, split, stop-word filter, stem.
//!
//! Heuristic replacement for the lemmatizer the original pipeline used; the
//! goal is only to turn a definition into candidate headwords.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::stemmer::stem;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").unwrap());

/// Function words that carry no dictionary relationship.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "nor", "not", "no", "of", "in",
        "on", "at", "to", "for", "from", "by", "with", "without", "as", "is",
        "are", "was", "were", "be", "been", "being", "am", "do", "does", "did",
        "have", "has", "had", "will", "would", "shall", "should", "can",
        "could", "may", "might", "must", "it", "its", "this", "that", "these",
        "those", "he", "she", "they", "them", "his", "her", "their", "which",
        "who", "whom", "whose", "what", "when", "where", "why", "how", "if",
        "then", "than", "so", "such", "into", "onto", "upon", "about", "over",
        "under", "between", "through", "during", "before", "after", "above",
        "below", "up", "down", "out", "off", "again", "further", "once",
        "here", "there", "all", "any", "both", "each", "few", "more", "most",
        "other", "some", "one", "two", "used", "especially", "usually",
        "often", "also", "etc",
    ]
    .into_iter()
    .collect()
});

/// Normalize a definition into candidate relationship tokens.
///
/// Lowercases, splits on non-alphanumeric runs, drops single characters and
/// stop words, stems each token, and dedupes preserving first occurrence.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for m in TOKEN_RE.find_iter(&lowered) {
        let raw = m.as_str();
        if raw.len() <= 1 || STOP_WORDS.contains(raw) {
            continue;
        }
        let token = stem(raw);
        if token.len() <= 1 || STOP_WORDS.contains(token.as_str()) {
            continue;
        }
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }

    tokens
}
