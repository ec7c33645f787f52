//! Tokenizer for boolean query strings.

use std::fmt;

use crate::error::{Result, XiphosError};

/// Lexical tokens of the boolean query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Term(String),
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryToken::And => write!(f, "AND"),
            QueryToken::Or => write!(f, "OR"),
            QueryToken::Not => write!(f, "NOT"),
            QueryToken::LeftParen => write!(f, "("),
            QueryToken::RightParen => write!(f, ")"),
            QueryToken::Term(term) => write!(f, "{term}"),
        }
    }
}

/// A token and the character position it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: QueryToken,
    pub position: usize,
}

/// Splits a query string into [`Spanned`] tokens.
///
/// Keywords are the uppercase words `AND`, `OR` and `NOT`, recognized only as
/// whole words. A term is a maximal run of ASCII letters, ASCII digits and
/// non-ASCII characters; any other character is a syntax error.
#[derive(Debug)]
pub struct QueryLexer<'a> {
    input: &'a str,
}

impl<'a> QueryLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        QueryLexer { input }
    }

    pub fn tokenize(&self) -> Result<Vec<Spanned>> {
        let mut tokens = Vec::new();
        let mut chars = self.input.chars().enumerate().peekable();

        while let Some((position, c)) = chars.next() {
            let token = match c {
                c if c.is_whitespace() => continue,
                '(' => QueryToken::LeftParen,
                ')' => QueryToken::RightParen,
                c if is_term_char(c) => {
                    let mut word = String::from(c);
                    while let Some(&(_, next)) = chars.peek() {
                        if !is_term_char(next) || next.is_whitespace() {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }
                    match word.as_str() {
                        "AND" => QueryToken::And,
                        "OR" => QueryToken::Or,
                        "NOT" => QueryToken::Not,
                        _ => QueryToken::Term(word),
                    }
                }
                other => {
                    return Err(XiphosError::query_syntax(
                        position,
                        format!("unexpected character '{other}'"),
                    ));
                }
            };
            tokens.push(Spanned { token, position });
        }

        Ok(tokens)
    }

    /// Length of the input in characters, the position reported for errors at the end.
    pub fn end_position(&self) -> usize {
        self.input.chars().count()
    }
}

fn is_term_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || !c.is_ascii()
}
