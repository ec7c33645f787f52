//! Boolean query syntax tree.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    And,
    Or,
    /// Always has exactly one child.
    Not,
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanOperator::And => write!(f, "AND"),
            BooleanOperator::Or => write!(f, "OR"),
            BooleanOperator::Not => write!(f, "NOT"),
        }
    }
}

/// A node of a parsed boolean query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNode {
    /// A raw term literal.
    Term(String),

    /// An operator applied to its children.
    Operation {
        operator: BooleanOperator,
        children: Vec<QueryNode>,
    },
}

impl QueryNode {
    pub fn term<S: Into<String>>(term: S) -> Self {
        QueryNode::Term(term.into())
    }

    pub fn not(child: QueryNode) -> Self {
        QueryNode::Operation {
            operator: BooleanOperator::Not,
            children: vec![child],
        }
    }

    /// Build an `AND`/`OR` node.
    ///
    /// Children with the same operator are merged into the new node and a
    /// single child is returned unwrapped. `NOT` nodes are built as given.
    pub fn operation(operator: BooleanOperator, children: Vec<QueryNode>) -> Self {
        if operator == BooleanOperator::Not {
            return QueryNode::Operation { operator, children };
        }

        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                QueryNode::Operation {
                    operator: child_operator,
                    children: grandchildren,
                } if child_operator == operator => flat.extend(grandchildren),
                other => flat.push(other),
            }
        }

        if flat.len() == 1 {
            return flat.remove(0);
        }

        QueryNode::Operation {
            operator,
            children: flat,
        }
    }

    /// All term literals in the tree.
    pub fn terms(&self) -> BTreeSet<&str> {
        let mut terms = BTreeSet::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut BTreeSet<&'a str>) {
        match self {
            QueryNode::Term(term) => {
                terms.insert(term);
            }
            QueryNode::Operation { children, .. } => {
                for child in children {
                    child.collect_terms(terms);
                }
            }
        }
    }
}

impl fmt::Display for QueryNode {
    /// Prefix notation, e.g. `(AND cat (NOT dog))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::Term(term) => write!(f, "{term}"),
            QueryNode::Operation { operator, children } => {
                write!(f, "({operator}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
        }
    }
}
