//! The inverted index.
//!
//! [`index::Index`] is the single owner of every document (held in one table
//! keyed by id) and maps each term to a [`term_info::TermInfo`] that refers to
//! documents by id only. It also owns the bound ranking models and refreshes
//! their caches once per mutating batch.

pub mod index;
pub mod term_info;

pub use index::{DocumentTable, Index};
pub use term_info::{DocumentInfo, TermInfo};
