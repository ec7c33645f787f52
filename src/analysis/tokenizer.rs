//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step in the analysis pipeline, splitting raw text
//! into tokens that the filters then normalize.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Every match of a pattern, punctuation runs included
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries, drops punctuation
//!
//! # Examples
//!
//! ```
//! use xiphos::analysis::tokenizer::Tokenizer;
//! use xiphos::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;

pub use self::regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
