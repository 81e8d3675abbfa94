//! Lexigraph Ingest — dictionary preprocessing: tokenization, stop-word
//! filtering, suffix stemming, and the persisted token table the graph
//! builder consumes.

pub mod preprocess;
pub mod stemmer;
pub mod tokenize;

pub use preprocess::{load_preprocessed, preprocess_dictionary, PreprocessedDictionary};
pub use stemmer::stem;
pub use tokenize::normalize;
