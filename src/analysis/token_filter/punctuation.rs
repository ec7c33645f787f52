//! Punctuation removal filter.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that strips ASCII punctuation characters from tokens.
///
/// Tokens made only of punctuation disappear entirely; they are not reported
/// as stop words.
#[derive(Clone, Debug, Default)]
pub struct PunctuationFilter;

impl PunctuationFilter {
    /// Create a new punctuation filter.
    pub fn new() -> Self {
        PunctuationFilter
    }
}

impl Filter for PunctuationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .filter_map(|token| {
                if token.is_stopped() || !token.text.contains(|c: char| c.is_ascii_punctuation()) {
                    return Some(token);
                }
                let stripped: String = token
                    .text
                    .chars()
                    .filter(|c| !c.is_ascii_punctuation())
                    .collect();
                (!stripped.is_empty()).then(|| token.with_text(stripped))
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_punctuation_filter() {
        let filter = PunctuationFilter::new();
        let tokens = vec![
            Token::new("don't", 0),
            Token::new("...", 1),
            Token::new("world", 2),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "dont");
        assert_eq!(result[1].text, "world");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(PunctuationFilter::new().name(), "punctuation");
    }
}
