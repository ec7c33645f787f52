//! Boolean query language.
//!
//! Queries go through three independent passes:
//!
//! ```text
//! query string ─ lexer/parser ─▶ QueryNode ─ normalize(preprocessor) ─▶ NormalizedQuery ─ evaluate(index) ─▶ ids
//! ```
//!
//! Operator precedence from lowest to highest is `OR`, `AND`, `NOT`; parentheses
//! override it and adjacent terms are joined with an implicit `AND`.
//!
//! # Examples
//!
//! ```
//! use xiphos::query::{BooleanOperator, QueryNode, QueryParser};
//!
//! let ast = QueryParser::new().parse("cat dog OR NOT bird").unwrap();
//! assert_eq!(ast.to_string(), "(OR (AND cat dog) (NOT bird))");
//! ```

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod normalize;
pub mod parser;

pub use ast::{BooleanOperator, QueryNode};
pub use evaluator::evaluate;
pub use lexer::{QueryLexer, QueryToken, Spanned};
pub use normalize::{NormalizedQuery, normalize};
pub use parser::{MAX_NESTING_DEPTH, QueryParser};
