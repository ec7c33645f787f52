//! Per-index configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::PreprocessorConfig;
use crate::error::{Result, XiphosError};
use crate::search::{Bm25Params, ModelKind};

/// Configuration of one index.
///
/// Every field has a default, so `{}` is a valid configuration file.
///
/// # Examples
///
/// ```
/// use xiphos::engine::IndexConfig;
/// use xiphos::search::ModelKind;
///
/// let config = IndexConfig::from_json_str(r#"{"models": ["bm25"], "bm25": {"k1": 2.0}}"#).unwrap();
/// assert_eq!(config.models, vec![ModelKind::Bm25]);
/// assert_eq!(config.bm25.k1, 2.0);
/// assert_eq!(config.bm25.b, 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub preprocessor: PreprocessorConfig,

    /// Retrieval models bound to the index.
    pub models: Vec<ModelKind>,

    pub bm25: Bm25Params,

    /// Number of documents listed in an index summary.
    #[serde(alias = "sampleSize")]
    pub sample_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            preprocessor: PreprocessorConfig::default(),
            models: ModelKind::ALL.to_vec(),
            bm25: Bm25Params::default(),
            sample_size: 5,
        }
    }
}

impl IndexConfig {
    pub fn with_preprocessor(mut self, preprocessor: PreprocessorConfig) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_models<I: IntoIterator<Item = ModelKind>>(mut self, models: I) -> Self {
        self.models = models.into_iter().collect();
        self
    }

    pub fn with_bm25(mut self, bm25: Bm25Params) -> Self {
        self.bm25 = bm25;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(XiphosError::validation("at least one model must be enabled"));
        }
        for (i, model) in self.models.iter().enumerate() {
            if self.models[..i].contains(model) {
                return Err(XiphosError::validation(format!(
                    "model '{model}' is listed more than once"
                )));
            }
        }
        self.bm25.validate()
    }
}
