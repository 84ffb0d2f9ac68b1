pub mod cache;
pub mod compute;
pub mod evaluate;
pub mod term;
pub mod tokenizer;

use std::{hash::Hash, marker::PhantomData, sync::Arc};

use rayon::prelude::*;

use crate::{
    config::SearchConfig,
    vectorizer::{
        cache::VectorCache,
        compute::compare::{Compare, DefaultCompare},
        evaluate::scoring::{HitEntry, Hits},
        term::TermFrequency,
        tokenizer::{Tokenizer, WordTokenizer},
    },
};

/// Something that can be ranked against a query
///
/// The storage side decides which candidates a user may search;
/// the searcher only reads keys and content.
pub trait Candidate {
    type Key: Clone + Eq + Hash + Send + Sync;

    /// Stable identifier
    fn key(&self) -> &Self::Key;

    /// Text content. `None` is scored like an empty string.
    fn content(&self) -> Option<&str>;
}

impl<D> Candidate for &D
where
    D: Candidate + ?Sized,
{
    type Key = D::Key;

    #[inline]
    fn key(&self) -> &D::Key {
        (**self).key()
    }

    #[inline]
    fn content(&self) -> Option<&str> {
        (**self).content()
    }
}

impl<K, S> Candidate for (K, S)
where
    K: Clone + Eq + Hash + Send + Sync,
    S: AsRef<str>,
{
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }

    fn content(&self) -> Option<&str> {
        Some(self.1.as_ref())
    }
}

/// Similarity search over a caller-supplied candidate set
///
/// Stateless apart from the optional vector cache: every call tokenizes and
/// vectorizes the query and each candidate, scores them with `C` and
/// returns all candidates ordered by score, highest first.
///
/// `DocumentSearcher<K, T, C>` has the following generic parameters:
/// - `K`: candidate key type, used by the vector cache (default `String`)
/// - `T`: tokenizer (default `WordTokenizer`)
/// - `C`: vector comparison (default `DefaultCompare`, cosine similarity)
pub struct DocumentSearcher<K = String, T = WordTokenizer, C = DefaultCompare>
where
    K: Eq + Hash,
    T: Tokenizer,
    C: Compare<u32>,
{
    tokenizer: T,
    config: SearchConfig,
    cache: Option<VectorCache<K>>,
    _compare_marker: PhantomData<fn() -> C>,
}

impl<K> DocumentSearcher<K>
where
    K: Eq + Hash,
{
    pub fn new(config: SearchConfig) -> Self {
        Self::with_tokenizer(WordTokenizer, config)
    }
}

impl<K> Default for DocumentSearcher<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<K, T, C> DocumentSearcher<K, T, C>
where
    K: Eq + Hash,
    T: Tokenizer,
    C: Compare<u32>,
{
    pub fn with_tokenizer(tokenizer: T, config: SearchConfig) -> Self {
        let cache = config.cache_vectors.then(VectorCache::new);
        Self {
            tokenizer,
            config,
            cache,
            _compare_marker: PhantomData,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Vector cache, if enabled
    pub fn cache(&self) -> Option<&VectorCache<K>> {
        self.cache.as_ref()
    }

    /// Term-frequency vector of `text`
    #[inline]
    pub fn vectorize(&self, text: &str) -> TermFrequency {
        TermFrequency::from_text(text, &self.tokenizer)
    }

    /// Similarity of two raw texts
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        C::cosine_similarity(&self.vectorize(a), &self.vectorize(b))
    }

    /// Rank `candidates` against `query`
    ///
    /// Every candidate appears exactly once in the result. Equal scores keep
    /// the order in which candidates were supplied. An empty query (or one that
    /// is all punctuation) scores everything 0 and so returns the input order.
    pub fn search<'a, D>(&self, query: &str, candidates: &'a [D]) -> Hits<&'a D>
    where
        D: Candidate<Key = K> + Sync,
        K: Clone + Send + Sync,
    {
        let query_vec = self.vectorize(query);
        let parallel = candidates.len() >= self.config.parallel_threshold;
        log::debug!(
            "search: {} query terms, {} candidates, parallel={}",
            query_vec.term_num(),
            candidates.len(),
            parallel
        );

        let score = |doc: &'a D| HitEntry::new(doc, self.score_candidate(&query_vec, doc));
        // indexed collect keeps input order, so both paths produce the same list
        let list: Vec<HitEntry<&'a D>> = if parallel {
            candidates.par_iter().map(score).collect()
        } else {
            candidates.iter().map(score).collect()
        };

        let mut hits = Hits::new(list);
        hits.sort_by_score_desc();
        hits
    }

    fn score_candidate<D>(&self, query_vec: &TermFrequency, doc: &D) -> f64
    where
        D: Candidate<Key = K>,
        K: Clone,
    {
        let content = doc.content().unwrap_or("");
        match &self.cache {
            Some(cache) => {
                let doc_vec: Arc<TermFrequency> =
                    cache.get_or_insert_with(doc.key(), content, || self.vectorize(content));
                C::cosine_similarity(query_vec, doc_vec.as_ref())
            }
            None => C::cosine_similarity(query_vec, &self.vectorize(content)),
        }
    }
}

/// Rank `candidates` against `query` with the default tokenizer and cosine similarity
///
/// # Examples
/// ```
/// let docs = vec![("d1", "the quick brown fox jumps"), ("d2", "xyz qrs tuv")];
/// let hits = docmatch::search("the quick brown fox", &docs);
/// assert_eq!(hits.list[0].key.0, "d1");
/// assert!(hits.list[0].score > 0.8);
/// assert_eq!(hits.list[1].score, 0.0);
/// ```
pub fn search<'a, D>(query: &str, candidates: &'a [D]) -> Hits<&'a D>
where
    D: Candidate + Sync,
{
    DocumentSearcher::<D::Key>::default().search(query, candidates)
}

/// Cosine similarity of two raw texts with the default tokenizer
pub fn similarity(a: &str, b: &str) -> f64 {
    DocumentSearcher::<String>::default().similarity(a, b)
}
