//! English suffix stripping after M. F. Porter, "An algorithm for suffix
//! stripping" (1980).
//!
//! ```
//! use xiphos::analysis::token_filter::stem::Stemmer;
//! use xiphos::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

/// Step 2 rewrites. The first matching suffix decides, even when the stem is
/// too short to take the rewrite.
const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 deletions, tried in order until one applies.
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemmer for lowercase ASCII words.
///
/// Non-ASCII words and words of two letters or fewer come back lowercased and
/// otherwise unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let mut word = word.to_lowercase();
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        strip_inflection(&mut word);
        rewrite_first(&mut word, STEP2);
        rewrite_first(&mut word, STEP3);
        strip_derivation(&mut word);
        tidy_ending(&mut word);
        word
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

fn is_consonant(word: &[u8], i: usize) -> bool {
    match word[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// Number of vowel-to-consonant transitions, Porter's `m`.
fn measure(word: &[u8]) -> usize {
    let mut m = 0;
    let mut after_vowel = false;
    for i in 0..word.len() {
        let consonant = is_consonant(word, i);
        if consonant && after_vowel {
            m += 1;
        }
        after_vowel = !consonant;
    }
    m
}

fn has_vowel(word: &[u8]) -> bool {
    (0..word.len()).any(|i| !is_consonant(word, i))
}

fn ends_double_consonant(word: &[u8]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && is_consonant(word, n - 1)
}

/// Consonant, vowel, consonant, with the last not w, x or y.
fn ends_cvc(word: &[u8]) -> bool {
    let n = word.len();
    n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], b'w' | b'x' | b'y')
}

/// Steps 1a and 1b: plurals, `-eed`, `-ed` and `-ing`.
fn strip_inflection(word: &mut String) {
    if word.ends_with("sses") || word.ends_with("ies") {
        word.truncate(word.len() - 2);
    } else if word.ends_with('s') && !word.ends_with("ss") {
        word.pop();
    }

    if word.ends_with("eed") {
        if measure(&word.as_bytes()[..word.len() - 3]) > 0 {
            word.pop();
        }
        return;
    }

    let Some(suffix) = ["ed", "ing"].into_iter().find(|suffix| word.ends_with(suffix)) else {
        return;
    };
    let stem_len = word.len() - suffix.len();
    if !has_vowel(&word.as_bytes()[..stem_len]) {
        return;
    }
    word.truncate(stem_len);

    if word.ends_with("at") || word.ends_with("bl") || word.ends_with("iz") {
        word.push('e');
    } else if ends_double_consonant(word.as_bytes()) && !word.ends_with(['l', 's', 'z']) {
        word.pop();
    } else if measure(word.as_bytes()) == 1 && ends_cvc(word.as_bytes()) {
        word.push('e');
    }
}

fn rewrite_first(word: &mut String, rules: &[(&str, &str)]) {
    let Some(&(suffix, replacement)) = rules.iter().find(|(suffix, _)| word.ends_with(suffix))
    else {
        return;
    };
    let stem_len = word.len() - suffix.len();
    if measure(&word.as_bytes()[..stem_len]) > 0 {
        word.truncate(stem_len);
        word.push_str(replacement);
    }
}

/// Step 4. `-ion` only goes after `s` or `t`.
fn strip_derivation(word: &mut String) {
    let stem_len = STEP4.iter().find_map(|&suffix| {
        let stem = word.strip_suffix(suffix)?;
        let allowed = suffix != "ion" || stem.ends_with(['s', 't']);
        (allowed && measure(stem.as_bytes()) > 1).then_some(stem.len())
    });
    if let Some(len) = stem_len {
        word.truncate(len);
    }
}

/// Step 5: final `-e` and `-ll`.
fn tidy_ending(word: &mut String) {
    let drop_e = word.strip_suffix('e').is_some_and(|stem| {
        let m = measure(stem.as_bytes());
        m > 1 || (m == 1 && !ends_cvc(stem.as_bytes()))
    });
    if drop_e {
        word.pop();
    }

    if word.ends_with("ll") && measure(word.as_bytes()) > 1 {
        word.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflections() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("cats"), "cat");
        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("hoping"), "hope");
        assert_eq!(stemmer.stem("sing"), "sing");
    }

    #[test]
    fn test_derivations() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("itemization"), "item");
        assert_eq!(stemmer.stem("hopefulness"), "hope");
        assert_eq!(stemmer.stem("adoption"), "adopt");
    }

    #[test]
    fn test_short_and_non_ascii_words() {
        let stemmer = PorterStemmer::new();
        assert_eq!(stemmer.stem("Kočky"), "kočky");
        assert_eq!(stemmer.stem("Go"), "go");
    }

    #[test]
    fn test_measure() {
        assert_eq!(measure(b"tree"), 0);
        assert_eq!(measure(b"trees"), 1);
        assert_eq!(measure(b"trouble"), 1);
        assert_eq!(measure(b"troubles"), 2);
        assert_eq!(measure(b"toy"), 1);
    }
}
