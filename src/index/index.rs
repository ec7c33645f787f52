//! Inverted index with batch mutation.
//!
//! # Examples
//!
//! ```
//! use xiphos::document::Document;
//! use xiphos::index::Index;
//!
//! let mut index = Index::default();
//! index
//!     .add_batch(vec![
//!         Document::from_terms("d1", "cat sat", vec!["cat".into(), "sat".into()]),
//!         Document::from_terms("d2", "dog sat", vec!["dog".into(), "sat".into()]),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(index.term("sat").unwrap().document_frequency(), 2);
//!
//! index.delete_batch(&["d1", "missing"]).unwrap();
//! assert!(index.term("cat").is_none());
//! assert_eq!(index.document_count(), 1);
//! ```

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::{debug, error};

use crate::document::{DocId, Document};
use crate::error::{Result, XiphosError};
use crate::index::term_info::TermInfo;
use crate::search::model::{ModelKind, SearchModel};

/// The authoritative document table: id → document.
pub type DocumentTable = AHashMap<DocId, Arc<Document>>;

/// In-memory inverted index together with its bound ranking models.
#[derive(Debug, Default)]
pub struct Index {
    documents: DocumentTable,
    inverted_idx: AHashMap<String, TermInfo>,
    models: Vec<SearchModel>,
    generation: u64,
}

impl Index {
    /// Create an empty index bound to `models`.
    pub fn new(models: Vec<SearchModel>) -> Self {
        Index {
            documents: AHashMap::new(),
            inverted_idx: AHashMap::new(),
            models,
            generation: 0,
        }
    }

    /// Insert documents, replacing any existing document with the same id.
    ///
    /// Model caches are refreshed once, after the whole batch.
    pub fn add_batch(&mut self, batch: Vec<Document>) -> Result<()> {
        let batch_len = batch.len();
        let result = batch.into_iter().try_for_each(|document| self.insert(document));

        self.recalculate_models();
        debug!(
            "added batch of {batch_len} documents ({} documents, {} terms)",
            self.documents.len(),
            self.inverted_idx.len()
        );
        result
    }

    /// Remove documents by id. Unknown ids are ignored.
    ///
    /// Model caches are refreshed once, after the whole batch.
    pub fn delete_batch<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        let mut removed = 0;
        let result = ids.iter().try_for_each(|id| {
            if self.remove(id.as_ref())? {
                removed += 1;
            } else {
                debug!("ignoring delete of unknown document '{}'", id.as_ref());
            }
            Ok(())
        });

        self.recalculate_models();
        debug!(
            "deleted {removed} of {} requested documents ({} documents, {} terms)",
            ids.len(),
            self.documents.len(),
            self.inverted_idx.len()
        );
        result
    }

    pub fn add_document(&mut self, document: Document) -> Result<()> {
        self.add_batch(vec![document])
    }

    pub fn delete_document(&mut self, id: &str) -> Result<()> {
        self.delete_batch(&[id])
    }

    fn insert(&mut self, document: Document) -> Result<()> {
        // replacing an id drops every association of the old version first
        self.remove(document.id())?;

        for term in document.distinct_terms() {
            match self.inverted_idx.get_mut(term) {
                Some(info) => info.append_document(&document, term),
                None => {
                    self.inverted_idx
                        .insert(term.to_string(), TermInfo::new(&document, term));
                }
            }
        }

        self.documents
            .insert(document.id().to_string(), Arc::new(document));
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        let Some(document) = self.documents.remove(id) else {
            return Ok(false);
        };

        for term in document.distinct_terms() {
            let Some(info) = self.inverted_idx.get_mut(term) else {
                error!("document '{id}' references term '{term}' missing from the inverted index");
                return Err(XiphosError::invariant(format!(
                    "term '{term}' of document '{id}' is missing from the inverted index"
                )));
            };

            if !info.remove_document(id) {
                error!("term '{term}' does not list document '{id}' that contains it");
                return Err(XiphosError::invariant(format!(
                    "term '{term}' does not reference document '{id}'"
                )));
            }

            if info.is_empty() {
                self.inverted_idx.remove(term);
            }
        }

        Ok(true)
    }

    fn recalculate_models(&mut self) {
        for model in &mut self.models {
            model.recalculate(&self.documents);
        }
        self.generation += 1;
    }

    /// Number of completed batch mutations. Models are refreshed exactly once
    /// per generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn document(&self, id: &str) -> Option<&Arc<Document>> {
        self.documents.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn documents(&self) -> &DocumentTable {
        &self.documents
    }

    pub fn term(&self, term: &str) -> Option<&TermInfo> {
        self.inverted_idx.get(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &TermInfo)> {
        self.inverted_idx
            .iter()
            .map(|(term, info)| (term.as_str(), info))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn term_count(&self) -> usize {
        self.inverted_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Ids of every document currently in the index.
    pub fn all_ids(&self) -> AHashSet<&str> {
        self.documents.keys().map(String::as_str).collect()
    }

    /// The bound model of the given kind.
    pub fn model(&self, kind: ModelKind) -> Option<&SearchModel> {
        self.models.iter().find(|model| model.kind() == kind)
    }

    pub fn models(&self) -> &[SearchModel] {
        &self.models
    }

    /// Check that the document table and the inverted index agree.
    ///
    /// Every term must list exactly the documents containing it, with a
    /// matching document frequency, and no term may be left without documents.
    pub fn check_invariants(&self) -> Result<()> {
        for (term, info) in &self.inverted_idx {
            if info.is_empty() {
                return Err(XiphosError::invariant(format!(
                    "term '{term}' has no documents"
                )));
            }
            if info.document_frequency() != info.documents().len() {
                return Err(XiphosError::invariant(format!(
                    "term '{term}' has document frequency {} but {} documents",
                    info.document_frequency(),
                    info.documents().len()
                )));
            }
            for (doc_id, posting) in info.documents() {
                let Some(document) = self.documents.get(doc_id) else {
                    return Err(XiphosError::invariant(format!(
                        "term '{term}' references unknown document '{doc_id}'"
                    )));
                };
                if document.tf_log(term) != Some(posting.term_frequency) {
                    return Err(XiphosError::invariant(format!(
                        "term '{term}' has a stale frequency for document '{doc_id}'"
                    )));
                }
            }
        }

        for (doc_id, document) in &self.documents {
            for term in document.distinct_terms() {
                if !self
                    .inverted_idx
                    .get(term)
                    .is_some_and(|info| info.contains(doc_id))
                {
                    return Err(XiphosError::invariant(format!(
                        "document '{doc_id}' term '{term}' is not indexed"
                    )));
                }
            }
        }

        Ok(())
    }
}
