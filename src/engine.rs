//! Index façade and registry.
//!
//! [`search_index::SearchIndex`] wraps one inverted index behind a
//! reader-writer lock: searches share it, while every mutating batch takes it
//! exclusively for the whole apply-and-recalculate step. Preprocessing runs
//! before the lock is taken. [`registry::IndexRegistry`] maps names to indices
//! under its own short-lived lock, so operations on different indices never
//! contend.
//!
//! # Examples
//!
//! ```
//! use xiphos::engine::{IndexConfig, IndexRegistry};
//! use xiphos::search::ModelKind;
//!
//! let registry = IndexRegistry::new();
//! let books = registry.create_index("books", IndexConfig::default()).unwrap();
//!
//! books
//!     .ingest_json(r#"[{"id": "d1", "text": "The cat sat"}, {"id": "d2", "text": "The dog sat"}]"#)
//!     .unwrap();
//!
//! let response = books.search("cat", ModelKind::TfIdf, None).unwrap();
//! assert_eq!(response.ids(), vec!["d1"]);
//! ```

pub mod config;
pub mod registry;
pub mod search_index;

pub use config::IndexConfig;
pub use registry::IndexRegistry;
pub use search_index::{IndexSummary, SearchIndex};
