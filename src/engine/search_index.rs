//! A named, concurrently searchable index.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::{RwLock, RwLockReadGuard};
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::{Preprocessor, StandardPreprocessor};
use crate::document::document::generate_id;
use crate::document::{DocId, Document, DocumentParser, NewDocument};
use crate::engine::config::IndexConfig;
use crate::error::{Result, XiphosError};
use crate::index::Index;
use crate::search::{ModelKind, SearchModel, SearchResponse};

/// Overview of an index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub name: String,
    pub term_count: usize,
    pub document_count: usize,
    pub models: Vec<ModelKind>,
    pub created_at: DateTime<Utc>,

    /// The first documents by ascending id.
    pub sample_documents: Vec<Arc<Document>>,
}

/// One named index: configuration, preprocessor and the locked inverted index.
///
/// All methods take `&self`; share it across threads through an `Arc`.
pub struct SearchIndex {
    name: String,
    config: IndexConfig,
    preprocessor: Arc<dyn Preprocessor>,
    index: RwLock<Index>,
    created_at: DateTime<Utc>,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("preprocessor", &self.preprocessor.name())
            .finish()
    }
}

impl SearchIndex {
    /// Create an empty index using the configured standard preprocessor.
    pub fn new<S: Into<String>>(name: S, config: IndexConfig) -> Result<Self> {
        let preprocessor = Arc::new(StandardPreprocessor::new(config.preprocessor.clone())?);
        Self::with_preprocessor(name, config, preprocessor)
    }

    /// Create an empty index with a caller-supplied preprocessor.
    ///
    /// `config.preprocessor` is kept for reference only.
    pub fn with_preprocessor<S: Into<String>>(
        name: S,
        config: IndexConfig,
        preprocessor: Arc<dyn Preprocessor>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(XiphosError::validation("index name must not be empty"));
        }
        config.validate()?;

        let models = config
            .models
            .iter()
            .map(|&kind| SearchModel::new(kind, config.bm25))
            .collect();

        Ok(SearchIndex {
            name,
            config,
            preprocessor,
            index: RwLock::new(Index::new(models)),
            created_at: Utc::now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn preprocessor(&self) -> &Arc<dyn Preprocessor> {
        &self.preprocessor
    }

    /// Shared access to the underlying index.
    ///
    /// Mutations wait until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, Index> {
        self.index.read()
    }

    /// Add documents.
    ///
    /// A requested id is kept unless a document with that id already exists
    /// (or appears earlier in the same batch), in which case a fresh id is
    /// generated. The batch is validated as a whole first: one invalid
    /// document rejects all of them. Returns the ids in input order.
    pub fn add_documents(&self, documents: Vec<NewDocument>) -> Result<Vec<DocId>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }
        let start = Instant::now();
        let prepared = self.prepare(documents)?;

        let mut index = self.index.write();
        let mut taken: AHashSet<DocId> = AHashSet::new();
        let mut ids = Vec::with_capacity(prepared.len());
        let batch: Vec<Document> = prepared
            .into_iter()
            .map(|(new, terms)| {
                let id = match &new.id {
                    Some(id) if !index.contains(id) && !taken.contains(id) => id.clone(),
                    _ => generate_id(),
                };
                taken.insert(id.clone());
                ids.push(id.clone());
                Document::new(id, new, terms)
            })
            .collect();

        index.add_batch(batch)?;
        let (document_count, term_count) = (index.document_count(), index.term_count());
        drop(index);

        info!(
            "index '{}': added {} documents in {:?} ({document_count} documents, {term_count} terms)",
            self.name,
            ids.len(),
            start.elapsed()
        );
        Ok(ids)
    }

    /// Add a single document. See [`add_documents`](Self::add_documents).
    pub fn add_document(&self, document: NewDocument) -> Result<DocId> {
        let mut ids = self.add_documents(vec![document])?;
        ids.pop()
            .ok_or_else(|| XiphosError::invariant("document batch produced no id"))
    }

    /// Parse a bulk JSON payload and add its documents.
    pub fn ingest_json(&self, payload: &str) -> Result<Vec<DocId>> {
        let documents = DocumentParser::new().parse_str(payload)?;
        self.add_documents(documents)
    }

    /// Read a bulk JSON payload from a file and add its documents.
    pub fn ingest_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<DocId>> {
        let documents = DocumentParser::new().parse_file(path)?;
        self.add_documents(documents)
    }

    /// Replace the document `id` wholesale.
    ///
    /// Fails with `NotFound` when no such document exists. Any id carried by
    /// `document` is ignored.
    pub fn update_document(&self, id: &str, document: NewDocument) -> Result<()> {
        self.update_documents(vec![(id.to_string(), document)])
    }

    /// Replace several documents in one batch.
    ///
    /// Every id must exist and appear once; otherwise nothing is changed.
    /// Ids carried by the new documents are ignored. Models are refreshed
    /// once for the whole batch.
    pub fn update_documents(&self, updates: Vec<(DocId, NewDocument)>) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let start = Instant::now();

        let (ids, documents): (Vec<DocId>, Vec<NewDocument>) = updates.into_iter().unzip();
        {
            let mut seen = AHashSet::with_capacity(ids.len());
            if let Some(id) = ids.iter().find(|id| !seen.insert(id.as_str())) {
                return Err(XiphosError::validation(format!(
                    "document '{id}' appears more than once in the update batch"
                )));
            }
        }
        self.ensure_present(&self.index.read(), &ids)?;
        let prepared = self.prepare(documents)?;

        let mut index = self.index.write();
        // some may have been deleted while preprocessing ran
        self.ensure_present(&index, &ids)?;
        let batch = ids
            .into_iter()
            .zip(prepared)
            .map(|(id, (new, terms))| Document::new(id, new, terms))
            .collect::<Vec<_>>();
        let updated = batch.len();
        index.add_batch(batch)?;
        drop(index);

        info!(
            "index '{}': updated {updated} documents in {:?}",
            self.name,
            start.elapsed()
        );
        Ok(())
    }

    fn ensure_present(&self, index: &Index, ids: &[DocId]) -> Result<()> {
        match ids.iter().find(|id| !index.contains(id)) {
            Some(id) => Err(self.document_not_found(id)),
            None => Ok(()),
        }
    }

    /// Delete one document; `NotFound` when absent.
    pub fn delete_document(&self, id: &str) -> Result<()> {
        let mut index = self.index.write();
        if !index.contains(id) {
            return Err(self.document_not_found(id));
        }
        index.delete_document(id)?;
        drop(index);

        debug!("index '{}': deleted document '{id}'", self.name);
        Ok(())
    }

    /// Delete documents, ignoring unknown ids. Returns how many were removed.
    pub fn delete_documents<S: AsRef<str>>(&self, ids: &[S]) -> Result<usize> {
        let start = Instant::now();
        let mut index = self.index.write();
        let before = index.document_count();
        index.delete_batch(ids)?;
        let removed = before - index.document_count();
        drop(index);

        info!(
            "index '{}': deleted {removed} of {} requested documents in {:?}",
            self.name,
            ids.len(),
            start.elapsed()
        );
        Ok(removed)
    }

    pub fn get_document(&self, id: &str) -> Result<Arc<Document>> {
        self.index
            .read()
            .document(id)
            .cloned()
            .ok_or_else(|| self.document_not_found(id))
    }

    /// Run `query` with `model`.
    ///
    /// `limit` of `None` or `Some(0)` returns every match. Fails with
    /// `NotFound` when the model is not enabled on this index.
    pub fn search(&self, query: &str, model: ModelKind, limit: Option<usize>) -> Result<SearchResponse> {
        let index = self.index.read();
        let search_model = index.model(model).ok_or_else(|| {
            XiphosError::not_found(format!(
                "model '{model}' is not enabled on index '{}'",
                self.name
            ))
        })?;

        let start = Instant::now();
        let response = search_model.search(&index, self.preprocessor.as_ref(), query, limit)?;
        debug!(
            "index '{}': {model} query {query:?} matched {} documents in {:?}",
            self.name,
            response.total,
            start.elapsed()
        );
        Ok(response)
    }

    /// Like [`search`](Self::search) with the model given by name.
    pub fn search_with(&self, query: &str, model: &str, limit: Option<usize>) -> Result<SearchResponse> {
        self.search(query, model.parse()?, limit)
    }

    pub fn summary(&self) -> IndexSummary {
        let index = self.index.read();

        let mut documents: Vec<&Arc<Document>> = index.documents().values().collect();
        documents.sort_unstable_by(|a, b| a.id().cmp(b.id()));
        let sample_documents = documents
            .into_iter()
            .take(self.config.sample_size)
            .cloned()
            .collect();

        IndexSummary {
            name: self.name.clone(),
            term_count: index.term_count(),
            document_count: index.document_count(),
            models: index.models().iter().map(SearchModel::kind).collect(),
            created_at: self.created_at,
            sample_documents,
        }
    }

    pub fn document_count(&self) -> usize {
        self.index.read().document_count()
    }

    pub fn term_count(&self) -> usize {
        self.index.read().term_count()
    }

    /// See [`Index::check_invariants`].
    pub fn check_invariants(&self) -> Result<()> {
        self.index.read().check_invariants()
    }

    /// Validate and preprocess outside the index lock.
    fn prepare(&self, documents: Vec<NewDocument>) -> Result<Vec<(NewDocument, Vec<String>)>> {
        if let Some(position) = documents.iter().position(|doc| doc.text.is_empty()) {
            return Err(XiphosError::validation(format!(
                "document {position}: field 'text' must not be empty"
            )));
        }

        let preprocessor = self.preprocessor.as_ref();
        documents
            .into_par_iter()
            .map(|document| -> Result<(NewDocument, Vec<String>)> {
                let terms = preprocessor.get_tokens(&document.text)?;
                Ok((document, terms))
            })
            .collect()
    }

    fn document_not_found(&self, id: &str) -> XiphosError {
        XiphosError::not_found(format!("document '{id}' in index '{}'", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn index() -> SearchIndex {
        SearchIndex::new("test", IndexConfig::default()).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let index = index();
        let id = index
            .add_document(NewDocument::new("The cat sat").with_id("d1"))
            .unwrap();

        assert_eq!(id, "d1");
        let document = index.get_document("d1").unwrap();
        assert_eq!(document.terms(), ["cat", "sat"]);
        assert_eq!(index.get_document("nope").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_existing_id_gets_fresh_id() {
        let index = index();
        index.add_document(NewDocument::new("first").with_id("d1")).unwrap();

        let ids = index
            .add_documents(vec![
                NewDocument::new("second").with_id("d1"),
                NewDocument::new("third").with_id("x"),
                NewDocument::new("fourth").with_id("x"),
            ])
            .unwrap();

        assert_ne!(ids[0], "d1");
        assert_eq!(ids[1], "x");
        assert_ne!(ids[2], "x");
        assert_eq!(index.document_count(), 4);
        assert_eq!(index.get_document("d1").unwrap().text(), "first");
    }

    #[test]
    fn test_invalid_batch_adds_nothing() {
        let index = index();
        let err = index
            .add_documents(vec![NewDocument::new("a cat"), NewDocument::new("")])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(index.document_count(), 0);
    }

    #[test]
    fn test_update_document() {
        let index = index();
        index.add_document(NewDocument::new("The cat sat").with_id("d1")).unwrap();

        index
            .update_document("d1", NewDocument::new("A dog ran"))
            .unwrap();

        let response = index.search("cat", ModelKind::TfIdf, None).unwrap();
        assert_eq!(response.total, 0);
        assert_eq!(index.get_document("d1").unwrap().text(), "A dog ran");
        index.check_invariants().unwrap();

        let err = index
            .update_document("missing", NewDocument::new("x"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete() {
        let index = index();
        index
            .ingest_json(r#"[{"id": "a", "text": "cat"}, {"id": "b", "text": "dog"}]"#)
            .unwrap();

        assert_eq!(index.delete_document("nope").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(index.delete_documents(&["a", "nope"]).unwrap(), 1);
        index.delete_document("b").unwrap();
        assert_eq!(index.document_count(), 0);
        assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn test_disabled_model() {
        let index = SearchIndex::new(
            "bool-only",
            IndexConfig::default().with_models([ModelKind::Boolean]),
        )
        .unwrap();

        let err = index.search("cat", ModelKind::Bm25, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(index.search_with("cat", "lm", None).unwrap_err().kind(), ErrorKind::NotFound);
        assert!(index.search_with("cat", "bool", None).is_ok());
    }

    #[test]
    fn test_summary() {
        let index = index();
        index
            .ingest_json(
                r#"[{"id": "c", "text": "three"}, {"id": "a", "text": "one"}, {"id": "b", "text": "two"}]"#,
            )
            .unwrap();

        let summary = index.summary();
        assert_eq!(summary.name, "test");
        assert_eq!(summary.document_count, 3);
        assert_eq!(summary.term_count, 3);
        assert_eq!(summary.models, ModelKind::ALL.to_vec());

        let sample: Vec<_> = summary.sample_documents.iter().map(|d| d.id()).collect();
        assert_eq!(sample, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_name() {
        let err = SearchIndex::new(" ", IndexConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
