//! Okapi BM25 model.
//!
//! For every query term `t` contained in document `d`:
//!
//! ```text
//! idf(t)   = ln(1 + (N - df + 0.5) / (df + 0.5))
//! tf'(t,d) = tf * (k1 + 1) / (tf + k1 * (1 - b + b * |d| / avgdl))
//! score   += qtf(t) * tf'(t,d) * idf(t)
//! ```
//!
//! `qtf` is the number of times the term occurs in the query.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::debug;
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::Preprocessor;
use crate::document::Document;
use crate::error::{Result, XiphosError};
use crate::index::{DocumentTable, Index, TermInfo};
use crate::search::PARALLEL_SCORING_THRESHOLD;
use crate::search::model::ModelKind;
use crate::search::result::{SearchResponse, rank};

/// BM25 tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f64,

    /// Document length normalization, between 0 and 1.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Params {
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(XiphosError::validation(format!(
                "bm25 k1 must be a non-negative number, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(XiphosError::validation(format!(
                "bm25 b must be between 0 and 1, got {}",
                self.b
            )));
        }
        Ok(())
    }
}

/// BM25 ranking model.
#[derive(Debug)]
pub struct Bm25Model {
    params: Bm25Params,
    n_docs: usize,
    average_document_length: f64,
    idf_cache: RwLock<AHashMap<String, f64>>,
}

impl Bm25Model {
    pub fn new(params: Bm25Params) -> Self {
        Bm25Model {
            params,
            n_docs: 0,
            average_document_length: 0.0,
            idf_cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Recompute the collection statistics and drop cached idf values.
    pub fn recalculate(&mut self, documents: &DocumentTable) {
        self.n_docs = documents.len();
        let total_length: usize = documents.values().map(|document| document.length()).sum();
        self.average_document_length = if self.n_docs == 0 {
            0.0
        } else {
            total_length as f64 / self.n_docs as f64
        };
        self.idf_cache.get_mut().clear();
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    pub fn n_docs(&self) -> usize {
        self.n_docs
    }

    /// Mean token count over all documents.
    pub fn average_document_length(&self) -> f64 {
        self.average_document_length
    }

    pub fn idf(&self, term: &str, info: &TermInfo) -> f64 {
        if let Some(&idf) = self.idf_cache.read().get(term) {
            return idf;
        }

        let n = self.n_docs as f64;
        let df = info.document_frequency() as f64;
        let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
        self.idf_cache.write().insert(term.to_string(), idf);
        idf
    }

    pub fn search(
        &self,
        index: &Index,
        preprocessor: &dyn Preprocessor,
        query: &str,
        limit: Option<usize>,
    ) -> Result<SearchResponse> {
        let tokens = preprocessor.get_tokens(query)?;

        let mut query_weights: AHashMap<&str, u32> = AHashMap::new();
        for token in &tokens {
            *query_weights.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut query_terms = Vec::with_capacity(query_weights.len());
        let mut candidates: AHashSet<&str> = AHashSet::new();
        for (term, weight) in query_weights {
            if let Some(info) = index.term(term) {
                query_terms.push((term, f64::from(weight), self.idf(term, info)));
                candidates.extend(info.doc_ids());
            }
        }

        debug!(
            "bm25 query {:?}: {} indexed terms, {} candidates",
            tokens,
            query_terms.len(),
            candidates.len()
        );

        let documents: Vec<&Arc<Document>> = candidates
            .into_iter()
            .filter_map(|id| index.document(id))
            .collect();

        let score = |document: &&Arc<Document>| {
            (self.score(document, &query_terms), Arc::clone(document))
        };

        let scored: Vec<(f64, Arc<Document>)> = if documents.len() >= PARALLEL_SCORING_THRESHOLD {
            documents.par_iter().map(score).collect()
        } else {
            documents.iter().map(score).collect()
        };

        Ok(rank(ModelKind::Bm25, scored, limit))
    }

    fn score(&self, document: &Document, query_terms: &[(&str, f64, f64)]) -> f64 {
        let Bm25Params { k1, b } = self.params;
        let length_ratio = if self.average_document_length > 0.0 {
            document.length() as f64 / self.average_document_length
        } else {
            0.0
        };
        let norm = k1 * (1.0 - b + b * length_ratio);

        query_terms
            .iter()
            .filter_map(|&(term, query_weight, idf)| {
                let tf = f64::from(document.tf_raw(term));
                (tf > 0.0).then(|| query_weight * (tf * (k1 + 1.0)) / (tf + norm) * idf)
            })
            .sum()
    }
}
