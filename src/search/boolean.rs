//! Boolean retrieval model.

use std::sync::Arc;

use log::debug;

use crate::analysis::Preprocessor;
use crate::error::Result;
use crate::index::Index;
use crate::query::{QueryParser, evaluate, normalize};
use crate::search::model::ModelKind;
use crate::search::result::{SearchHit, SearchResponse};

/// Exact-match AND/OR/NOT retrieval.
///
/// Keeps no state of its own; `NOT` is resolved against the documents present
/// when the query runs. Hits are unscored and returned in ascending id order.
#[derive(Debug, Default, Clone)]
pub struct BooleanModel {
    parser: QueryParser,
}

impl BooleanModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(
        &self,
        index: &Index,
        preprocessor: &dyn Preprocessor,
        query: &str,
    ) -> Result<SearchResponse> {
        let ast = self.parser.parse(query)?;
        let normalized = normalize(ast, preprocessor)?;

        let mut ids: Vec<&str> = match &normalized.root {
            Some(root) => {
                debug!("boolean query {root}, ignored {:?}", normalized.stopwords);
                evaluate(root, index).into_iter().collect()
            }
            None => {
                debug!("boolean query {query:?} reduced to nothing");
                Vec::new()
            }
        };
        ids.sort_unstable();

        let hits: Vec<SearchHit> = ids
            .into_iter()
            .filter_map(|id| index.document(id))
            .map(|document| SearchHit {
                score: None,
                document: Arc::clone(document),
            })
            .collect();

        Ok(SearchResponse {
            model: ModelKind::Boolean,
            total: hits.len(),
            hits,
            stopwords: Some(normalized.stopwords),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PreprocessorConfig, StandardPreprocessor};
    use crate::document::Document;
    use crate::error::ErrorKind;

    fn setup() -> (Index, StandardPreprocessor) {
        let preprocessor = StandardPreprocessor::new(PreprocessorConfig::default()).unwrap();
        let mut index = Index::default();
        let docs = [("d1", "the cat sat"), ("d2", "the dog sat")]
            .into_iter()
            .map(|(id, text)| Document::from_terms(id, text, preprocessor.get_tokens(text).unwrap()))
            .collect();
        index.add_batch(docs).unwrap();
        (index, preprocessor)
    }

    fn ids(query: &str) -> Vec<String> {
        let (index, preprocessor) = setup();
        BooleanModel::new()
            .search(&index, &preprocessor, query)
            .unwrap()
            .ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(ids("cat AND sat"), vec!["d1"]);
        assert_eq!(ids("cat OR dog"), vec!["d1", "d2"]);
        assert_eq!(ids("NOT cat"), vec!["d2"]);
        assert_eq!(ids("sat"), vec!["d1", "d2"]);
    }

    #[test]
    fn test_stopwords_reported() {
        let (index, preprocessor) = setup();
        let response = BooleanModel::new()
            .search(&index, &preprocessor, "the cat")
            .unwrap();

        assert_eq!(response.ids(), vec!["d1"]);
        assert!(response.hits[0].score.is_none());
        assert!(response.stopwords.unwrap().contains("the"));
    }

    #[test]
    fn test_stopword_only_query_is_empty() {
        let (index, preprocessor) = setup();
        let response = BooleanModel::new()
            .search(&index, &preprocessor, "the")
            .unwrap();

        assert_eq!(response.total, 0);
        assert!(response.hits.is_empty());
        assert_eq!(response.stopwords.unwrap().len(), 1);
    }

    #[test]
    fn test_syntax_error() {
        let (index, preprocessor) = setup();
        let err = BooleanModel::new()
            .search(&index, &preprocessor, "cat AND (dog")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QuerySyntax);
    }
}
