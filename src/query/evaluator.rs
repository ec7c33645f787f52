//! Set-valued evaluation of normalized boolean queries.

use ahash::AHashSet;

use crate::index::Index;
use crate::query::ast::{BooleanOperator, QueryNode};

/// Ids of the documents in `index` matching `node`.
///
/// A term absent from the index matches nothing. `NOT` is the complement
/// against the documents present in `index` right now.
pub fn evaluate<'a>(node: &QueryNode, index: &'a Index) -> AHashSet<&'a str> {
    match node {
        QueryNode::Term(term) => index
            .term(term)
            .map(|info| info.doc_ids().collect())
            .unwrap_or_default(),
        QueryNode::Operation { operator, children } => match operator {
            BooleanOperator::And => {
                let mut children = children.iter();
                let Some(first) = children.next() else {
                    return AHashSet::new();
                };
                let mut result = evaluate(first, index);
                for child in children {
                    if result.is_empty() {
                        break;
                    }
                    let other = evaluate(child, index);
                    result.retain(|id| other.contains(id));
                }
                result
            }
            BooleanOperator::Or => children.iter().fold(AHashSet::new(), |mut acc, child| {
                acc.extend(evaluate(child, index));
                acc
            }),
            BooleanOperator::Not => {
                let excluded = children
                    .first()
                    .map(|child| evaluate(child, index))
                    .unwrap_or_default();
                index
                    .documents()
                    .keys()
                    .map(String::as_str)
                    .filter(|id| !excluded.contains(id))
                    .collect()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::query::parser::QueryParser;

    fn index() -> Index {
        let mut index = Index::default();
        index
            .add_batch(vec![
                Document::from_terms("d1", "cat sat", vec!["cat".into(), "sat".into()]),
                Document::from_terms("d2", "dog sat", vec!["dog".into(), "sat".into()]),
                Document::from_terms("d3", "bird", vec!["bird".into()]),
            ])
            .unwrap();
        index
    }

    fn ids(query: &str, index: &Index) -> Vec<String> {
        let ast = QueryParser::new().parse(query).unwrap();
        let mut ids: Vec<String> = evaluate(&ast, index).into_iter().map(str::to_string).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_operators() {
        let index = index();

        assert_eq!(ids("cat AND sat", &index), vec!["d1"]);
        assert_eq!(ids("cat OR dog", &index), vec!["d1", "d2"]);
        assert_eq!(ids("NOT sat", &index), vec!["d3"]);
        assert_eq!(ids("sat AND NOT cat", &index), vec!["d2"]);
        assert_eq!(ids("NOT NOT cat", &index), vec!["d1"]);
    }

    #[test]
    fn test_unknown_term_matches_nothing() {
        let index = index();

        assert!(ids("unicorn", &index).is_empty());
        assert_eq!(ids("NOT unicorn", &index), vec!["d1", "d2", "d3"]);
        assert_eq!(ids("unicorn OR bird", &index), vec!["d3"]);
    }

    #[test]
    fn test_not_uses_current_documents() {
        let mut index = index();
        let ast = QueryParser::new().parse("NOT cat").unwrap();
        assert_eq!(evaluate(&ast, &index).len(), 2);

        index
            .add_document(Document::from_terms("d4", "fish", vec!["fish".into()]))
            .unwrap();
        assert_eq!(evaluate(&ast, &index).len(), 3);
    }
}
