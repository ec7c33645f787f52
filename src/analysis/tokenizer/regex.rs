//! Pattern-driven tokenizer.

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, XiphosError};

/// Word runs and punctuation runs, each as their own token.
const WORDS_AND_PUNCTUATION: &str = r"\w+|[^\w\s]+";

/// Emits every match of a regex as a token.
///
/// The default pattern keeps punctuation, so `"end."` yields `end` and `.`;
/// the punctuation filter decides later what survives.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    regex: Regex,
}

impl RegexTokenizer {
    pub fn new() -> Result<Self> {
        Self::with_pattern(WORDS_AND_PUNCTUATION)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(|regex| RegexTokenizer { regex })
            .map_err(|e| XiphosError::analysis(format!("bad tokenizer pattern '{pattern}': {e}")))
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .regex
            .find_iter(text)
            .enumerate()
            .map(|(position, found)| Token::spanning(found.as_str(), position, found.range()))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
