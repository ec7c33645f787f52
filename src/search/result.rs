//! Search results and their ordering.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::document::Document;
use crate::search::model::ModelKind;

/// One matching document.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Relevance score; `None` for unranked models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    pub document: Arc<Document>,
}

/// Result of a search against one index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub model: ModelKind,

    /// Number of matches before `limit` was applied.
    pub total: usize,

    pub hits: Vec<SearchHit>,

    /// Query words ignored as stopwords (boolean model only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<BTreeSet<String>>,
}

impl SearchResponse {
    /// Ids of the hits in result order.
    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|hit| hit.document.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Sort scored candidates and apply `limit`.
///
/// Higher scores come first; equal scores are ordered by ascending document id.
pub fn rank(model: ModelKind, mut scored: Vec<(f64, Arc<Document>)>, limit: Option<usize>) -> SearchResponse {
    scored.sort_by(|(a_score, a_doc), (b_score, b_doc)| compare_scored(*a_score, a_doc, *b_score, b_doc));

    let total = scored.len();
    if let Some(limit) = limit.filter(|&limit| limit > 0) {
        scored.truncate(limit);
    }

    SearchResponse {
        model,
        total,
        hits: scored
            .into_iter()
            .map(|(score, document)| SearchHit {
                score: Some(score),
                document,
            })
            .collect(),
        stopwords: None,
    }
}

fn compare_scored(a_score: f64, a_doc: &Document, b_score: f64, b_doc: &Document) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| a_doc.id().cmp(b_doc.id()))
}
