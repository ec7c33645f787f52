//! Recursive-descent parser for boolean queries.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or      := and (OR and)*
//! and     := unary (AND unary)*
//! unary   := NOT unary | primary
//! primary := TERM+ | '(' or ')'
//! ```
//!
//! A run of adjacent terms is an implicit `AND`. Parsing is all or nothing:
//! malformed input is an error, never a partial tree. Nesting through `NOT`
//! and parentheses is capped at [`MAX_NESTING_DEPTH`].

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::error::{Result, XiphosError};
use crate::query::ast::{BooleanOperator, QueryNode};
use crate::query::lexer::{QueryLexer, QueryToken, Spanned};

/// Deepest chain of `NOT` operators and open parentheses a query may hold.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses query strings into [`QueryNode`] trees.
#[derive(Debug, Default, Clone)]
pub struct QueryParser;

impl QueryParser {
    pub fn new() -> Self {
        QueryParser
    }

    /// Parse a boolean query string.
    ///
    /// Supported syntax:
    /// - Terms: `cat`
    /// - Implicit AND: `black cat`
    /// - Operators: `cat AND dog`, `cat OR dog`, `NOT cat`
    /// - Parentheses: `(cat OR dog) AND NOT bird`
    pub fn parse(&self, query_str: &str) -> Result<QueryNode> {
        let lexer = QueryLexer::new(query_str);
        let tokens = lexer.tokenize()?;
        if tokens.is_empty() {
            return Err(XiphosError::query_syntax(0, "empty query"));
        }

        let mut parser = QueryStringParser {
            tokens: tokens.into_iter().peekable(),
            end_position: lexer.end_position(),
            depth: 0,
        };
        let root = parser.parse_or_expression()?;

        match parser.tokens.next() {
            None => Ok(root),
            Some(Spanned { token, position }) => Err(XiphosError::query_syntax(
                position,
                format!("unexpected '{token}'"),
            )),
        }
    }
}

/// Internal parser state over the lexed tokens.
struct QueryStringParser {
    tokens: Peekable<IntoIter<Spanned>>,
    end_position: usize,
    depth: usize,
}

impl QueryStringParser {
    fn parse_or_expression(&mut self) -> Result<QueryNode> {
        let mut children = vec![self.parse_and_expression()?];

        while self.next_if(&QueryToken::Or) {
            children.push(self.parse_and_expression()?);
        }

        Ok(QueryNode::operation(BooleanOperator::Or, children))
    }

    fn parse_and_expression(&mut self) -> Result<QueryNode> {
        let mut children = vec![self.parse_unary()?];

        while self.next_if(&QueryToken::And) {
            children.push(self.parse_unary()?);
        }

        Ok(QueryNode::operation(BooleanOperator::And, children))
    }

    fn parse_unary(&mut self) -> Result<QueryNode> {
        if let Some(Spanned { position, .. }) = self
            .tokens
            .next_if(|spanned| spanned.token == QueryToken::Not)
        {
            self.descend(position)?;
            let operand = self.parse_unary();
            self.depth -= 1;
            return Ok(QueryNode::not(operand?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<QueryNode> {
        let Some(Spanned { token, position }) = self.tokens.next() else {
            return Err(XiphosError::query_syntax(
                self.end_position,
                "unexpected end of query",
            ));
        };

        match token {
            QueryToken::Term(first) => {
                let mut terms = vec![QueryNode::Term(first)];
                while let Some(Spanned {
                    token: QueryToken::Term(term),
                    ..
                }) = self
                    .tokens
                    .next_if(|spanned| matches!(spanned.token, QueryToken::Term(_)))
                {
                    terms.push(QueryNode::Term(term));
                }
                Ok(QueryNode::operation(BooleanOperator::And, terms))
            }
            QueryToken::LeftParen => {
                self.descend(position)?;
                let inner = self.parse_or_expression();
                self.depth -= 1;
                let inner = inner?;
                match self.tokens.next() {
                    Some(Spanned {
                        token: QueryToken::RightParen,
                        ..
                    }) => Ok(inner),
                    Some(Spanned { token, position }) => Err(XiphosError::query_syntax(
                        position,
                        format!("expected ')' but found '{token}'"),
                    )),
                    None => Err(XiphosError::query_syntax(
                        self.end_position,
                        format!("unclosed '(' opened at position {position}"),
                    )),
                }
            }
            other => Err(XiphosError::query_syntax(
                position,
                format!("expected a term or '(' but found '{other}'"),
            )),
        }
    }

    fn descend(&mut self, position: usize) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(XiphosError::query_syntax(position, "query nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    fn next_if(&mut self, expected: &QueryToken) -> bool {
        self.tokens.next_if(|spanned| &spanned.token == expected).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> String {
        QueryParser::new().parse(query).unwrap().to_string()
    }

    fn error_position(query: &str) -> usize {
        match QueryParser::new().parse(query).unwrap_err() {
            XiphosError::QuerySyntax { position, .. } => position,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_simple_term() {
        assert_eq!(QueryParser::new().parse("cat").unwrap(), QueryNode::term("cat"));
    }

    #[test]
    fn test_implicit_and() {
        assert_eq!(parse("black cat"), "(AND black cat)");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse("a OR b AND c"), "(OR a (AND b c))");
        assert_eq!(parse("NOT a AND b"), "(AND (NOT a) b)");
        assert_eq!(parse("a b OR c"), "(OR (AND a b) c)");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(parse("(a OR b) AND c"), "(AND (OR a b) c)");
        assert_eq!(parse("NOT (a OR b)"), "(NOT (OR a b))");
        assert_eq!(parse("((a))"), "a");
    }

    #[test]
    fn test_chains_are_flattened() {
        assert_eq!(parse("a AND b AND c"), "(AND a b c)");
        assert_eq!(parse("a b AND c"), "(AND a b c)");
        assert_eq!(parse("a OR b OR c"), "(OR a b c)");
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(parse("NOT NOT a"), "(NOT (NOT a))");
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(error_position(""), 0);
        assert_eq!(error_position("   "), 0);
        assert_eq!(error_position("cat AND"), 7);
        assert_eq!(error_position("OR cat"), 0);
        assert_eq!(error_position("(cat"), 4);
        assert_eq!(error_position("cat)"), 3);
        assert_eq!(error_position("(a) b"), 4);
        assert_eq!(error_position("a NOT b"), 2);
        assert_eq!(error_position("()"), 1);
        assert_eq!(error_position("a ! b"), 2);
    }

    #[test]
    fn test_nesting_limit() {
        let deepest = format!("{}cat", "NOT ".repeat(MAX_NESTING_DEPTH));
        assert!(QueryParser::new().parse(&deepest).is_ok());

        let too_deep = format!("{}cat", "NOT ".repeat(MAX_NESTING_DEPTH + 1));
        assert_eq!(error_position(&too_deep), 4 * MAX_NESTING_DEPTH);

        let parens = format!(
            "{}cat{}",
            "(".repeat(MAX_NESTING_DEPTH + 1),
            ")".repeat(MAX_NESTING_DEPTH + 1)
        );
        assert_eq!(error_position(&parens), MAX_NESTING_DEPTH);

        let half = MAX_NESTING_DEPTH / 2;
        let mixed = format!("{}cat{}", "NOT (".repeat(half), ")".repeat(half));
        assert!(QueryParser::new().parse(&mixed).is_ok());
    }
}
