//! Model selection and dispatch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::Preprocessor;
use crate::error::{Result, XiphosError};
use crate::index::{DocumentTable, Index};
use crate::search::bm25::{Bm25Model, Bm25Params};
use crate::search::boolean::BooleanModel;
use crate::search::result::SearchResponse;
use crate::search::tfidf::TfIdfModel;

/// The closed set of retrieval models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "tfidf")]
    TfIdf,
    #[serde(rename = "bm25")]
    Bm25,
    #[serde(rename = "bool")]
    Boolean,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::TfIdf, ModelKind::Bm25, ModelKind::Boolean];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::TfIdf => "tfidf",
            ModelKind::Bm25 => "bm25",
            ModelKind::Boolean => "bool",
        }
    }

    /// Whether results carry scores.
    pub fn is_ranked(&self) -> bool {
        !matches!(self, ModelKind::Boolean)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = XiphosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tfidf" => Ok(ModelKind::TfIdf),
            "bm25" => Ok(ModelKind::Bm25),
            "bool" => Ok(ModelKind::Boolean),
            other => Err(XiphosError::not_found(format!(
                "model '{other}' (expected one of tfidf, bm25, bool)"
            ))),
        }
    }
}

/// A retrieval model bound to an index.
#[derive(Debug)]
pub enum SearchModel {
    TfIdf(TfIdfModel),
    Bm25(Bm25Model),
    Boolean(BooleanModel),
}

impl SearchModel {
    /// Create an empty model of the given kind.
    pub fn new(kind: ModelKind, bm25: Bm25Params) -> Self {
        match kind {
            ModelKind::TfIdf => SearchModel::TfIdf(TfIdfModel::new()),
            ModelKind::Bm25 => SearchModel::Bm25(Bm25Model::new(bm25)),
            ModelKind::Boolean => SearchModel::Boolean(BooleanModel::new()),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            SearchModel::TfIdf(_) => ModelKind::TfIdf,
            SearchModel::Bm25(_) => ModelKind::Bm25,
            SearchModel::Boolean(_) => ModelKind::Boolean,
        }
    }

    /// Run `query` against `index`.
    ///
    /// `limit` of `None` or `Some(0)` returns every match. The boolean model
    /// ignores it.
    pub fn search(
        &self,
        index: &Index,
        preprocessor: &dyn Preprocessor,
        query: &str,
        limit: Option<usize>,
    ) -> Result<SearchResponse> {
        match self {
            SearchModel::TfIdf(model) => model.search(index, preprocessor, query, limit),
            SearchModel::Bm25(model) => model.search(index, preprocessor, query, limit),
            SearchModel::Boolean(model) => model.search(index, preprocessor, query),
        }
    }

    /// Refresh cached statistics after the document table changed.
    pub fn recalculate(&mut self, documents: &DocumentTable) {
        match self {
            SearchModel::TfIdf(model) => model.recalculate(documents),
            SearchModel::Bm25(model) => model.recalculate(documents),
            SearchModel::Boolean(_) => {}
        }
    }
}
