//! # Xiphos
//!
//! An embeddable text search engine: in-memory inverted indices with
//! TF-IDF, BM25 and boolean retrieval over JSON documents.
//!
//! ## Features
//!
//! - Batch indexing with all-or-nothing ingestion
//! - TF-IDF cosine and Okapi BM25 ranking
//! - Boolean queries with `AND`, `OR`, `NOT` and parentheses
//! - English and Czech text preprocessing
//! - Named indices behind a thread-safe registry

pub mod analysis;
pub mod cli;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::analysis::{Language, Preprocessor, PreprocessorConfig, StandardPreprocessor};
    pub use crate::document::{DocId, Document, NewDocument};
    pub use crate::engine::{IndexConfig, IndexRegistry, IndexSummary, SearchIndex};
    pub use crate::error::{ErrorKind, Result, XiphosError};
    pub use crate::search::{Bm25Params, ModelKind, SearchHit, SearchResponse};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
