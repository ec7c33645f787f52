//! Accent folding filter.
//!
//! Decomposes each token with Unicode NFKD and keeps only the ASCII part, so
//! `"příliš"` becomes `"prilis"`. Characters without an ASCII decomposition
//! disappear; a token left empty is dropped from the stream.

use unicode_normalization::UnicodeNormalization;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Fold a string to ASCII by dropping combining marks and other non-ASCII output of NFKD.
pub fn fold_to_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// A filter that removes accents from tokens.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingFilter;

impl AsciiFoldingFilter {
    /// Create a new accent folding filter.
    pub fn new() -> Self {
        AsciiFoldingFilter
    }
}

impl Filter for AsciiFoldingFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .filter_map(|token| {
                if token.is_stopped() || token.text.is_ascii() {
                    return Some(token);
                }
                let folded = fold_to_ascii(&token.text);
                (!folded.is_empty()).then(|| token.with_text(folded))
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}
