//! Documents and their ingestion.
//!
//! A [`document::NewDocument`] is what callers hand in: raw text plus metadata.
//! Once preprocessed it becomes an immutable [`document::Document`] carrying its
//! terms and the per-term frequency views the ranking models read.

pub mod document;
pub mod parser;

pub use document::{DocId, Document, NewDocument};
pub use parser::DocumentParser;
