//! Text analysis for Xiphos.
//!
//! The index core only ever talks to the [`Preprocessor`] trait: raw text in,
//! ordered normalized terms out. This module provides that trait together with
//! the building blocks of the default implementation: tokenizers, token filters
//! and stemmers composed into a [`StandardPreprocessor`] pipeline.
//!
//! ```text
//! Tokenizer → Lowercase → Accent folding → Punctuation strip → Stop words → Stemmer
//! ```

pub mod preprocessor;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use preprocessor::{
    Language, Preprocessor, PreprocessorConfig, StandardPreprocessor, WhitespacePreprocessor,
};
pub use token::{Token, TokenStream};
