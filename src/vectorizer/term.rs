use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::tokenizer::Tokenizer;

/// TermFrequency struct
/// Sparse term-frequency vector of one text.
/// Counts the number of times each term appears; raw counts, not normalized by length.
///
/// Terms are kept in first-seen order so iteration is deterministic.
/// A term with count 0 is never stored.
///
/// # Examples
/// ```
/// use docmatch::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("cat");
/// term_freq.add_term("dog");
/// term_freq.add_term("cat");
///
/// assert_eq!(term_freq.term_count("cat"), 2);
/// assert_eq!(term_freq.term_count("bird"), 0);
/// assert_eq!(term_freq.total_term_count(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

/// Implementation for building vectors
impl TermFrequency {
    /// Create an empty TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Build from a term sequence
    pub fn from_terms<T>(terms: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut freq = Self::new();
        freq.add_terms(terms);
        freq
    }

    /// Tokenize `text` and count its terms
    pub fn from_text<Tk>(text: &str, tokenizer: &Tk) -> Self
    where
        Tk: Tokenizer + ?Sized,
    {
        Self::from_terms(&tokenizer.tokenize(text))
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Reset all counts
    #[inline]
    pub fn clear(&mut self) {
        self.term_count.clear();
        self.total_term_count = 0;
    }
}

/// Implementation for reading counts
impl TermFrequency {
    /// Occurrence count of `term`, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[inline]
    pub fn total_term_count(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// true for the zero vector (empty or punctuation-only text)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// Iterate `(term, count)` in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }
}

/// Term sequence -> term-frequency vector
#[inline]
pub fn vectorize<T>(terms: &[T]) -> TermFrequency
where
    T: AsRef<str>,
{
    TermFrequency::from_terms(terms)
}
