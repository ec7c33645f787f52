//! The preprocessing capability consumed by the index core.
//!
//! A [`Preprocessor`] turns raw text into the ordered sequence of normalized
//! terms stored on a document or looked up for a query. It must be
//! deterministic: the same configuration and input always yield the same terms.
//!
//! # Examples
//!
//! ```
//! use xiphos::analysis::{Preprocessor, PreprocessorConfig, StandardPreprocessor};
//!
//! let preprocessor = StandardPreprocessor::new(PreprocessorConfig::english_default_stemmer()).unwrap();
//!
//! let (terms, stopwords) = preprocessor.get_tokens_with_stopwords("The cats are running!").unwrap();
//! assert_eq!(terms, vec!["cat", "run"]);
//! assert!(stopwords.contains("the"));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::ascii_folding::AsciiFoldingFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::punctuation::PunctuationFilter;
use crate::analysis::token_filter::stem::{CzechStemmer, PorterStemmer, StemFilter};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, UnicodeWordTokenizer};
use crate::error::{Result, XiphosError};

/// Turns raw text into normalized terms.
pub trait Preprocessor: Send + Sync + fmt::Debug {
    /// Ordered normalized terms of `text`.
    fn get_tokens(&self, text: &str) -> Result<Vec<String>>;

    /// Ordered normalized terms of `text` together with the words that were
    /// dropped as stopwords.
    ///
    /// Implementations without a stopword notion report an empty set.
    fn get_tokens_with_stopwords(&self, text: &str) -> Result<(Vec<String>, BTreeSet<String>)> {
        Ok((self.get_tokens(text)?, BTreeSet::new()))
    }

    /// Get the name of this preprocessor.
    fn name(&self) -> &'static str;
}

/// Languages with built-in stopword lists and stemmers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "cs")]
    Czech,
}

impl Language {
    /// The ISO 639-1 code of the language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Czech => "cs",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = XiphosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Language::English),
            "cs" => Ok(Language::Czech),
            other => Err(XiphosError::validation(format!(
                "unsupported language '{other}' (expected 'en' or 'cs')"
            ))),
        }
    }
}

/// Configuration of a [`StandardPreprocessor`].
///
/// Field names are snake_case; the camelCase spellings used by JSON clients
/// are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Lowercase every token.
    pub lowercase: bool,

    /// Fold accented characters to ASCII before stemming.
    #[serde(alias = "removeAccentsBeforeStemming")]
    pub remove_accents_before_stemming: bool,

    /// Strip punctuation characters and punctuation-only tokens.
    #[serde(alias = "removePunctuation")]
    pub remove_punctuation: bool,

    /// Drop stopwords of the configured language.
    #[serde(alias = "removeStopwords")]
    pub remove_stopwords: bool,

    /// Stem tokens. When false, tokens are kept as they are.
    #[serde(alias = "useStemmer")]
    pub use_stemmer: bool,

    /// Language of the indexed text.
    pub lang: Language,

    /// Fold accented characters to ASCII once more after stemming.
    #[serde(alias = "removeAccentsAfterStemming")]
    pub remove_accents_after_stemming: bool,
}

impl PreprocessorConfig {
    fn preset(lang: Language, use_stemmer: bool) -> Self {
        PreprocessorConfig {
            lowercase: true,
            remove_accents_before_stemming: true,
            remove_punctuation: true,
            remove_stopwords: true,
            use_stemmer,
            lang,
            remove_accents_after_stemming: false,
        }
    }

    pub fn english_default_stemmer() -> Self {
        Self::preset(Language::English, true)
    }

    pub fn english_default_lemmatizer() -> Self {
        Self::preset(Language::English, false)
    }

    pub fn czech_default_stemmer() -> Self {
        Self::preset(Language::Czech, true)
    }

    pub fn czech_default_lemmatizer() -> Self {
        Self::preset(Language::Czech, false)
    }
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self::english_default_stemmer()
    }
}

/// The configurable token pipeline used by indices unless told otherwise.
///
/// ```text
/// Tokenizer → Lowercase → Fold → Punctuation → Stop → Stem → Fold
/// ```
///
/// Every stage is optional except the tokenizer. Stopwords are marked by the
/// stop filter rather than removed, so they can be reported alongside the terms.
pub struct StandardPreprocessor {
    config: PreprocessorConfig,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl StandardPreprocessor {
    /// Build the pipeline described by `config`.
    pub fn new(config: PreprocessorConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> = if config.remove_punctuation {
            Arc::new(UnicodeWordTokenizer::new())
        } else {
            Arc::new(RegexTokenizer::new()?)
        };

        let mut filters: Vec<Arc<dyn Filter>> = Vec::new();
        if config.lowercase {
            filters.push(Arc::new(LowercaseFilter::new()));
        }
        if config.remove_accents_before_stemming {
            filters.push(Arc::new(AsciiFoldingFilter::new()));
        }
        if config.remove_punctuation {
            filters.push(Arc::new(PunctuationFilter::new()));
        }
        if config.remove_stopwords {
            filters.push(Arc::new(StopFilter::for_language(config.lang)));
        }
        if config.use_stemmer {
            let stem_filter = match config.lang {
                Language::English => StemFilter::with_stemmer(Box::new(PorterStemmer::new())),
                Language::Czech => StemFilter::with_stemmer(Box::new(CzechStemmer::new())),
            };
            filters.push(Arc::new(stem_filter));
        }
        if config.remove_accents_after_stemming {
            filters.push(Arc::new(AsciiFoldingFilter::new()));
        }

        Ok(StandardPreprocessor {
            config,
            tokenizer,
            filters,
        })
    }

    /// The configuration this pipeline was built from.
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = self.tokenizer.tokenize(text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens.collect())
    }
}

impl fmt::Debug for StandardPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardPreprocessor")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Preprocessor for StandardPreprocessor {
    fn get_tokens(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.get_tokens_with_stopwords(text)?.0)
    }

    fn get_tokens_with_stopwords(&self, text: &str) -> Result<(Vec<String>, BTreeSet<String>)> {
        let mut terms = Vec::new();
        let mut stopwords = BTreeSet::new();

        for token in self.analyze(text)? {
            if token.is_stopped() {
                stopwords.insert(token.text);
            } else if !token.text.is_empty() {
                terms.push(token.text);
            }
        }

        Ok((terms, stopwords))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Splits on whitespace and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespacePreprocessor;

impl WhitespacePreprocessor {
    pub fn new() -> Self {
        WhitespacePreprocessor
    }
}

impl Preprocessor for WhitespacePreprocessor {
    fn get_tokens(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> StandardPreprocessor {
        StandardPreprocessor::new(PreprocessorConfig::english_default_stemmer()).unwrap()
    }

    #[test]
    fn test_english_pipeline() {
        let terms = english().get_tokens("The quick brown foxes, jumping!").unwrap();
        assert_eq!(terms, vec!["quick", "brown", "fox", "jump"]);
    }

    #[test]
    fn test_stopwords_are_reported() {
        let (terms, stopwords) = english()
            .get_tokens_with_stopwords("the cat and the hat")
            .unwrap();

        assert_eq!(terms, vec!["cat", "hat"]);
        assert_eq!(
            stopwords.into_iter().collect::<Vec<_>>(),
            vec!["and".to_string(), "the".to_string()]
        );
    }

    #[test]
    fn test_pure_stopword_text() {
        let (terms, stopwords) = english().get_tokens_with_stopwords("The").unwrap();
        assert!(terms.is_empty());
        assert!(stopwords.contains("the"));
    }

    #[test]
    fn test_deterministic() {
        let preprocessor = english();
        let text = "Searching indexes is what search engines do.";
        assert_eq!(
            preprocessor.get_tokens(text).unwrap(),
            preprocessor.get_tokens(text).unwrap()
        );
    }

    #[test]
    fn test_czech_pipeline() {
        let preprocessor =
            StandardPreprocessor::new(PreprocessorConfig::czech_default_stemmer()).unwrap();

        let terms = preprocessor.get_tokens("Hrady a zámky").unwrap();
        assert_eq!(terms, vec!["hrad", "zamk"]);
    }

    #[test]
    fn test_lemmatizer_preset_keeps_words() {
        let preprocessor =
            StandardPreprocessor::new(PreprocessorConfig::english_default_lemmatizer()).unwrap();

        assert_eq!(preprocessor.get_tokens("Running cats").unwrap(), vec!["running", "cats"]);
    }

    #[test]
    fn test_keep_punctuation() {
        let config = PreprocessorConfig {
            remove_punctuation: false,
            remove_stopwords: false,
            use_stemmer: false,
            ..PreprocessorConfig::default()
        };
        let preprocessor = StandardPreprocessor::new(config).unwrap();

        assert_eq!(preprocessor.get_tokens("Hi, there").unwrap(), vec!["hi", ",", "there"]);
    }

    #[test]
    fn test_config_camel_case_aliases() {
        let json = r#"{
            "lowercase": true,
            "removeAccentsBeforeStemming": false,
            "removePunctuation": true,
            "removeStopwords": false,
            "useStemmer": true,
            "lang": "cs",
            "removeAccentsAfterStemming": true
        }"#;

        let config: PreprocessorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.lang, Language::Czech);
        assert!(!config.remove_accents_before_stemming);
        assert!(!config.remove_stopwords);
        assert!(config.remove_accents_after_stemming);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!("de".parse::<Language>().is_err());
        assert_eq!("cs".parse::<Language>().unwrap(), Language::Czech);

        let json = r#"{"lang": "de"}"#;
        assert!(serde_json::from_str::<PreprocessorConfig>(json).is_err());
    }

    #[test]
    fn test_whitespace_preprocessor() {
        let preprocessor = WhitespacePreprocessor::new();
        let (terms, stopwords) = preprocessor
            .get_tokens_with_stopwords("The  cat\tsat")
            .unwrap();

        assert_eq!(terms, vec!["The", "cat", "sat"]);
        assert!(stopwords.is_empty());
    }
}
