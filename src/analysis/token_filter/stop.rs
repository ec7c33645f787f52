//! Stop filter implementation.
//!
//! Marks common words (stop words) as stopped. Stopped tokens stay in the
//! stream until the preprocessor separates them, which is how the boolean
//! model learns which query words were ignored.
//!
//! # Examples
//!
//! ```
//! use xiphos::analysis::Language;
//! use xiphos::analysis::token_filter::Filter;
//! use xiphos::analysis::token_filter::stop::StopFilter;
//! use xiphos::analysis::token::Token;
//!
//! let filter = StopFilter::for_language(Language::English);
//! let tokens = vec![Token::new("the", 0), Token::new("quick", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert!(result[0].is_stopped());
//! assert!(!result[1].is_stopped());
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::analysis::preprocessor::Language;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::ascii_folding::fold_to_ascii;
use crate::error::Result;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

const CZECH_STOP_WORDS: &[&str] = &[
    "a", "aby", "ale", "ani", "ano", "asi", "až", "bez", "bude", "budem", "budeš", "by", "byl",
    "byla", "byli", "bylo", "být", "co", "což", "či", "další", "do", "ho", "i", "já", "jak",
    "jako", "je", "jeho", "jej", "její", "jejich", "jen", "jenž", "ještě", "ji", "jiné", "již",
    "jsem", "jsi", "jsme", "jsou", "jste", "k", "kam", "kde", "kdo", "kdy", "když", "ke", "která",
    "které", "kteří", "který", "kvůli", "ma", "má", "mají", "mezi", "mi", "mít", "mně", "mnou",
    "můj", "může", "my", "na", "nad", "nám", "námi", "nás", "náš", "ne", "nebo", "nějak", "není",
    "než", "nic", "o", "od", "on", "ona", "oni", "ono", "pak", "po", "pod", "podle", "pokud",
    "pouze", "práve", "pro", "proč", "proto", "protože", "před", "přes", "při", "s", "se", "si",
    "sice", "své", "svůj", "ta", "tak", "také", "tam", "te", "tedy", "ten", "tento", "teto",
    "tím", "to", "tohle", "toho", "tohoto", "tom", "tomto", "tu", "tuto", "ty", "tyto", "u",
    "už", "v", "ve", "vám", "vás", "váš", "vy", "z", "za", "ze", "že",
];

/// English stop words, including their accent-folded forms.
pub static ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| build_stop_set(ENGLISH_STOP_WORDS));

/// Czech stop words, including their accent-folded forms.
pub static CZECH_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| build_stop_set(CZECH_STOP_WORDS));

fn build_stop_set(words: &[&str]) -> HashSet<String> {
    words
        .iter()
        .flat_map(|&w| [w.to_string(), fold_to_ascii(w)])
        .filter(|w| !w.is_empty())
        .collect()
}

/// A filter that marks stop words as stopped.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: HashSet<String>,
}

impl StopFilter {
    /// Create a stop filter with the built-in list for the given language.
    pub fn for_language(language: Language) -> Self {
        let stop_words = match language {
            Language::English => ENGLISH_STOP_WORDS_SET.clone(),
            Language::Czech => CZECH_STOP_WORDS_SET.clone(),
        };
        StopFilter { stop_words }
    }

    /// Create a stop filter from an arbitrary word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of stop words known to this filter.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Whether the stop word list is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if !token.is_stopped() && self.is_stop_word(&token.text) {
                    token.stop()
                } else {
                    token
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::for_language(Language::English);
        let tokens = vec![
            Token::new("this", 0),
            Token::new("is", 1),
            Token::new("test", 2),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert!(result[0].is_stopped());
        assert!(result[1].is_stopped());
        assert!(!result[2].is_stopped());
    }

    #[test]
    fn test_czech_stop_words_match_folded_forms() {
        let filter = StopFilter::for_language(Language::Czech);

        assert!(filter.is_stop_word("že"));
        assert!(filter.is_stop_word("ze"));
        assert!(filter.is_stop_word("protoze"));
        assert!(!filter.is_stop_word("pes"));
    }

    #[test]
    fn test_custom_stop_words() {
        let filter = StopFilter::from_words(["foo", "bar"]);
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stop_word("foo"));
        assert!(!filter.is_stop_word("baz"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::from_words(Vec::<String>::new()).name(), "stop");
    }
}
