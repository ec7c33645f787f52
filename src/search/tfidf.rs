//! TF-IDF vector space model.
//!
//! Documents and the query are weighted with `idf(t) * (1 + ln(tf))` where
//! `idf(t) = ln(N / df(t))`, and candidates are ranked by the cosine of the
//! angle between the two vectors. Only documents sharing at least one term
//! with the query are candidates.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::debug;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::analysis::Preprocessor;
use crate::document::{DocId, Document};
use crate::error::Result;
use crate::index::{DocumentTable, Index, TermInfo};
use crate::search::PARALLEL_SCORING_THRESHOLD;
use crate::search::model::ModelKind;
use crate::search::result::{SearchResponse, rank};

/// TF-IDF cosine similarity model.
///
/// idf values and document vector norms are computed on first use and kept
/// until the next [`recalculate`](TfIdfModel::recalculate).
#[derive(Debug, Default)]
pub struct TfIdfModel {
    n_docs: usize,
    idf_cache: RwLock<AHashMap<String, f64>>,
    norm_cache: RwLock<AHashMap<DocId, f64>>,
}

/// A query term found in the index with its query-side weight.
struct WeightedTerm<'a> {
    term: &'a str,
    idf: f64,
    weight: f64,
}

impl TfIdfModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached values; the document count is refreshed.
    pub fn recalculate(&mut self, documents: &DocumentTable) {
        self.n_docs = documents.len();
        self.idf_cache.get_mut().clear();
        self.norm_cache.get_mut().clear();
    }

    /// Number of documents the cached statistics refer to.
    pub fn n_docs(&self) -> usize {
        self.n_docs
    }

    /// `ln(N / df)` for a term present in the index.
    pub fn idf(&self, term: &str, info: &TermInfo) -> f64 {
        if let Some(&idf) = self.idf_cache.read().get(term) {
            return idf;
        }

        let idf = (self.n_docs as f64 / info.document_frequency() as f64).ln();
        self.idf_cache.write().insert(term.to_string(), idf);
        idf
    }

    /// Euclidean norm of the document's full TF-IDF vector.
    pub fn document_norm(&self, document: &Document, index: &Index) -> f64 {
        if let Some(&norm) = self.norm_cache.read().get(document.id()) {
            return norm;
        }

        let norm = document
            .log_weights()
            .filter_map(|(term, tf)| index.term(term).map(|info| self.idf(term, info) * tf))
            .map(|weight| weight * weight)
            .sum::<f64>()
            .sqrt();

        self.norm_cache
            .write()
            .insert(document.id().to_string(), norm);
        norm
    }

    pub fn search(
        &self,
        index: &Index,
        preprocessor: &dyn Preprocessor,
        query: &str,
        limit: Option<usize>,
    ) -> Result<SearchResponse> {
        let tokens = preprocessor.get_tokens(query)?;

        let mut counts: AHashMap<&str, u32> = AHashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        // terms missing from the index carry no weight on either side
        let mut query_terms = Vec::with_capacity(counts.len());
        let mut candidates: AHashSet<&str> = AHashSet::new();
        for (term, count) in counts {
            let Some(info) = index.term(term) else {
                continue;
            };
            let idf = self.idf(term, info);
            query_terms.push(WeightedTerm {
                term,
                idf,
                weight: idf * (1.0 + f64::from(count).ln()),
            });
            candidates.extend(info.doc_ids());
        }

        let query_norm = query_terms
            .iter()
            .map(|t| t.weight * t.weight)
            .sum::<f64>()
            .sqrt();

        debug!(
            "tfidf query {:?}: {} indexed terms, {} candidates",
            tokens,
            query_terms.len(),
            candidates.len()
        );

        let documents: Vec<&Arc<Document>> = candidates
            .into_iter()
            .filter_map(|id| index.document(id))
            .collect();

        let score = |document: &&Arc<Document>| {
            let similarity = self.similarity(document, index, &query_terms, query_norm);
            (similarity, Arc::clone(document))
        };

        let scored: Vec<(f64, Arc<Document>)> = if documents.len() >= PARALLEL_SCORING_THRESHOLD {
            documents.par_iter().map(score).collect()
        } else {
            documents.iter().map(score).collect()
        };

        Ok(rank(ModelKind::TfIdf, scored, limit))
    }

    fn similarity(
        &self,
        document: &Document,
        index: &Index,
        query_terms: &[WeightedTerm<'_>],
        query_norm: f64,
    ) -> f64 {
        let document_norm = self.document_norm(document, index);
        if document_norm == 0.0 || query_norm == 0.0 {
            return 0.0;
        }

        let dot: f64 = query_terms
            .iter()
            .filter_map(|t| document.tf_log(t.term).map(|tf| t.weight * t.idf * tf))
            .sum();

        dot / (document_norm * query_norm)
    }
}
