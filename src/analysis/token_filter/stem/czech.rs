//! Light Czech stemmer.
//!
//! Removes case endings and possessive suffixes, then normalizes a few
//! palatalized consonant groups (`čt → ck`, `št → sk`, `c/č → k`, `z/ž → h`).
//! Lengths are counted in characters, not bytes.

use crate::analysis::token_filter::stem::Stemmer;

/// Light stemmer for Czech.
///
/// # Examples
///
/// ```
/// use xiphos::analysis::token_filter::stem::Stemmer;
/// use xiphos::analysis::token_filter::stem::czech::CzechStemmer;
///
/// let stemmer = CzechStemmer::new();
/// assert_eq!(stemmer.stem("hradech"), stemmer.stem("hrady"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CzechStemmer;

const CASE_SUFFIXES_3: &[&str] = &[
    "ech", "ich", "ích", "ého", "ěmi", "emi", "ému", "ěte", "ete", "ěti", "eti", "ího", "iho",
    "ími", "ímu", "imu", "ách", "ata", "aty", "ých", "ama", "ami", "ové", "ovi", "ými",
];

const CASE_SUFFIXES_2: &[&str] = &[
    "em", "es", "ém", "ím", "ům", "at", "ám", "os", "us", "ým", "mi", "ou",
];

impl CzechStemmer {
    /// Create a new Czech stemmer.
    pub fn new() -> Self {
        CzechStemmer
    }

    fn ends_with(chars: &[char], suffix: &str) -> bool {
        let suffix: Vec<char> = suffix.chars().collect();
        chars.len() >= suffix.len() && chars[chars.len() - suffix.len()..] == suffix[..]
    }

    fn remove_case(chars: &[char]) -> usize {
        let len = chars.len();
        if len > 7 && Self::ends_with(chars, "atech") {
            return len - 5;
        }
        if len > 6 && ["ětem", "etem", "atům"].iter().any(|s| Self::ends_with(chars, s)) {
            return len - 4;
        }
        if len > 5 && CASE_SUFFIXES_3.iter().any(|s| Self::ends_with(chars, s)) {
            return len - 3;
        }
        if len > 4 && CASE_SUFFIXES_2.iter().any(|s| Self::ends_with(chars, s)) {
            return len - 2;
        }
        if len > 3
            && matches!(
                chars[len - 1],
                'a' | 'e' | 'i' | 'o' | 'u' | 'ů' | 'y' | 'á' | 'é' | 'í' | 'ý' | 'ě'
            )
        {
            return len - 1;
        }
        len
    }

    fn remove_possessives(chars: &[char]) -> usize {
        let len = chars.len();
        if len > 5 && ["ov", "in", "ův"].iter().any(|s| Self::ends_with(chars, s)) {
            return len - 2;
        }
        len
    }

    fn normalize(chars: &mut Vec<char>) {
        let len = chars.len();
        if len == 0 {
            return;
        }
        if Self::ends_with(chars, "čt") {
            chars[len - 2] = 'c';
            chars[len - 1] = 'k';
            return;
        }
        if Self::ends_with(chars, "št") {
            chars[len - 2] = 's';
            chars[len - 1] = 'k';
            return;
        }
        match chars[len - 1] {
            'c' | 'č' => {
                chars[len - 1] = 'k';
                return;
            }
            'z' | 'ž' => {
                chars[len - 1] = 'h';
                return;
            }
            _ => {}
        }
        if len > 1 && chars[len - 2] == 'e' {
            chars.remove(len - 2);
        } else if len > 2 && chars[len - 2] == 'ů' {
            chars[len - 2] = 'o';
            chars.pop();
        }
    }
}

impl Stemmer for CzechStemmer {
    fn stem(&self, word: &str) -> String {
        let mut chars: Vec<char> = word.to_lowercase().chars().collect();

        let len = Self::remove_case(&chars);
        chars.truncate(len);
        let len = Self::remove_possessives(&chars);
        chars.truncate(len);
        Self::normalize(&mut chars);

        chars.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "czech_light"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_endings() {
        let stemmer = CzechStemmer::new();

        assert_eq!(stemmer.stem("hrady"), "hrad");
        assert_eq!(stemmer.stem("hradech"), "hrad");
        assert_eq!(stemmer.stem("městech"), "měst");
    }

    #[test]
    fn test_normalization() {
        let stemmer = CzechStemmer::new();

        // "-ec" loses the e and the c turns into k
        assert_eq!(stemmer.stem("otec"), "otk");
        assert_eq!(stemmer.stem("pes"), "ps");
    }

    #[test]
    fn test_short_words_are_kept() {
        let stemmer = CzechStemmer::new();
        assert_eq!(stemmer.stem("les"), "ls");
        assert_eq!(stemmer.stem("a"), "a");
    }
}
