//! Semantic pass that runs query terms through the preprocessor.
//!
//! Each term literal is replaced by its normalized terms: none prunes the
//! leaf, one replaces it and several become an `AND` of the terms. Pruning
//! propagates upward. An `AND`/`OR` left with one child collapses into that
//! child, one left with none is pruned, and a `NOT` of a pruned child is pruned.

use std::collections::BTreeSet;

use crate::analysis::Preprocessor;
use crate::error::Result;
use crate::query::ast::{BooleanOperator, QueryNode};

/// A preprocessed query ready for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// `None` when every term was pruned; such a query matches nothing.
    pub root: Option<QueryNode>,

    /// Words dropped as stopwords.
    pub stopwords: BTreeSet<String>,
}

/// Normalize `node` with `preprocessor`.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::{PreprocessorConfig, StandardPreprocessor};
/// use xiphos::query::{QueryParser, normalize};
///
/// let preprocessor = StandardPreprocessor::new(PreprocessorConfig::default()).unwrap();
/// let ast = QueryParser::new().parse("the cats AND NOT the").unwrap();
///
/// let normalized = normalize(ast, &preprocessor).unwrap();
/// assert_eq!(normalized.root.unwrap().to_string(), "cat");
/// assert!(normalized.stopwords.contains("the"));
/// ```
pub fn normalize(node: QueryNode, preprocessor: &dyn Preprocessor) -> Result<NormalizedQuery> {
    let mut stopwords = BTreeSet::new();
    let root = normalize_node(node, preprocessor, &mut stopwords)?;
    Ok(NormalizedQuery { root, stopwords })
}

fn normalize_node(
    node: QueryNode,
    preprocessor: &dyn Preprocessor,
    stopwords: &mut BTreeSet<String>,
) -> Result<Option<QueryNode>> {
    match node {
        QueryNode::Term(literal) => {
            let (terms, stopped) = preprocessor.get_tokens_with_stopwords(&literal)?;
            stopwords.extend(stopped);

            let mut seen = BTreeSet::new();
            let children: Vec<QueryNode> = terms
                .into_iter()
                .filter(|term| seen.insert(term.clone()))
                .map(QueryNode::Term)
                .collect();

            Ok(match children.len() {
                0 => None,
                _ => Some(QueryNode::operation(BooleanOperator::And, children)),
            })
        }
        QueryNode::Operation {
            operator: BooleanOperator::Not,
            children,
        } => {
            let mut kept = Vec::with_capacity(1);
            for child in children {
                if let Some(child) = normalize_node(child, preprocessor, stopwords)? {
                    kept.push(child);
                }
            }
            Ok(match kept.pop() {
                Some(child) if kept.is_empty() => Some(QueryNode::not(child)),
                _ => None,
            })
        }
        QueryNode::Operation { operator, children } => {
            let mut kept = Vec::with_capacity(children.len());
            for child in children {
                if let Some(child) = normalize_node(child, preprocessor, stopwords)? {
                    kept.push(child);
                }
            }
            Ok(match kept.len() {
                0 => None,
                _ => Some(QueryNode::operation(operator, kept)),
            })
        }
    }
}
