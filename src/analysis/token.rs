//! Tokens passed between the tokenizer and the filters.
//!
//! ```
//! use xiphos::analysis::token::Token;
//!
//! let token = Token::spanning("world", 1, 6..11);
//! assert_eq!(token.span, 6..11);
//! assert!(!token.is_stopped());
//! ```

use std::ops::Range;

/// One word of input text.
///
/// Filters keep rejected words in the stream, flagged as stopped, so the
/// preprocessor can report which query words were ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Index in the tokenizer output.
    pub position: usize,
    /// Byte range in the source text.
    pub span: Range<usize>,
    pub stopped: bool,
}

impl Token {
    /// A token with no source span, for feeding filters directly.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::spanning(text, position, 0..0)
    }

    pub fn spanning<S: Into<String>>(text: S, position: usize, span: Range<usize>) -> Self {
        Token {
            text: text.into(),
            position,
            span,
            stopped: false,
        }
    }

    pub fn stop(self) -> Self {
        Token {
            stopped: true,
            ..self
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Same token, new text.
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self
        }
    }
}

/// Boxed iterator threaded through the filter chain.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspanned_token() {
        let token = Token::new("hello", 0);
        assert_eq!(token.span, 0..0);
        assert!(!token.is_stopped());
    }

    #[test]
    fn test_rewrites_keep_position_and_span() {
        let token = Token::spanning("Running", 3, 10..17).stop().with_text("run");

        assert!(token.is_stopped());
        assert_eq!(token.text, "run");
        assert_eq!(token.position, 3);
        assert_eq!(token.span, 10..17);
    }
}
