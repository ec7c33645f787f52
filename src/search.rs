//! Ranking models.
//!
//! Every index carries one [`model::SearchModel`] per enabled retrieval model.
//! The models share the index's inverted index and keep only their own
//! recomputable caches.
//!
//! - [`tfidf::TfIdfModel`] - cosine similarity of TF-IDF vectors
//! - [`bm25::Bm25Model`] - Okapi BM25
//! - [`boolean::BooleanModel`] - unranked AND/OR/NOT set algebra

pub mod bm25;
pub mod boolean;
pub mod model;
pub mod result;
pub mod tfidf;

pub use bm25::{Bm25Model, Bm25Params};
pub use boolean::BooleanModel;
pub use model::{ModelKind, SearchModel};
pub use result::{SearchHit, SearchResponse};
pub use tfidf::TfIdfModel;

/// Candidate count from which ranked models score documents in parallel.
pub const PARALLEL_SCORING_THRESHOLD: usize = 2048;
