use std::sync::LazyLock;

use regex::Regex;

/// Anything that is neither a word character nor whitespace.
/// `\w` is the Unicode word class (letters, marks, digits, connector punctuation).
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("constant pattern"));

/// Splits raw text into terms
pub trait Tokenizer: Send + Sync {
    /// Turn `text` into a sequence of terms.
    /// Must be deterministic and must never emit empty terms.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default tokenizer
///
/// lower-case -> strip non word chars -> split on whitespace.
/// No stemming, no stop words, no length filter.
///
/// Scripts written without spaces come out as one term per whitespace run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        WordTokenizer
    }
}

impl Tokenizer for WordTokenizer {
    #[inline]
    fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text)
    }
}

/// Tokenize `text` with the default rules
///
/// # Examples
/// ```
/// use docmatch::vectorizer::tokenizer::tokenize;
/// assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
/// assert!(tokenize("?!...").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
