use std::{hash::Hash, sync::Arc};

use ahash::RandomState;
use dashmap::DashMap;

use crate::vectorizer::term::TermFrequency;

#[derive(Debug)]
struct CachedVector {
    /// text the vector was built from
    content: Arc<str>,
    vector: Arc<TermFrequency>,
}

/// Document vectors kept between searches
///
/// Entries are keyed by document key and keep the content they were built
/// from; a lookup with any other content rebuilds the vector.
/// Thread-safe, so it can be filled from the parallel scoring path.
#[derive(Debug)]
pub struct VectorCache<K>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CachedVector, RandomState>,
}

impl<K> Default for VectorCache<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> VectorCache<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Cached vector of `content` under `key`, built with `build` on a miss
    /// or when the stored vector came from different content.
    pub fn get_or_insert_with<F>(&self, key: &K, content: &str, build: F) -> Arc<TermFrequency>
    where
        K: Clone,
        F: FnOnce() -> TermFrequency,
    {
        if let Some(hit) = self.entries.get(key) {
            if *hit.content == *content {
                return Arc::clone(&hit.vector);
            }
        }
        // guard dropped above; build outside the shard lock
        let vector = Arc::new(build());
        self.entries.insert(
            key.clone(),
            CachedVector {
                content: Arc::from(content),
                vector: Arc::clone(&vector),
            },
        );
        vector
    }

    /// Drop the entry for `key`; true if there was one
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::vectorizer::term::vectorize;

    #[test]
    fn hit_reuses_vector() {
        let cache = VectorCache::new();
        let builds = Cell::new(0);
        let build = || {
            builds.set(builds.get() + 1);
            vectorize(&["a", "b"])
        };
        let first = cache.get_or_insert_with(&"d1", "a b", build);
        let second = cache.get_or_insert_with(&"d1", "a b", || unreachable!("should be cached"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_content_rebuilds() {
        let cache = VectorCache::new();
        cache.get_or_insert_with(&"d1", "a b", || vectorize(&["a", "b"]));
        let rebuilt = cache.get_or_insert_with(&"d1", "c", || vectorize(&["c"]));
        assert_eq!(rebuilt.term_count("c"), 1);
        assert_eq!(rebuilt.term_count("a"), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn same_length_content_swap_rebuilds() {
        let cache = VectorCache::new();
        let first = cache.get_or_insert_with(&"d1", "cat dog", || vectorize(&["cat", "dog"]));
        let builds = Cell::new(0);
        let swapped = cache.get_or_insert_with(&"d1", "pig cow", || {
            builds.set(builds.get() + 1);
            vectorize(&["pig", "cow"])
        });
        assert_eq!(builds.get(), 1);
        assert!(!Arc::ptr_eq(&first, &swapped));
        assert_eq!(swapped.term_count("pig"), 1);
        assert_eq!(swapped.term_count("cat"), 0);

        // back to the original text: rebuilt again, not served from the swapped entry
        let restored = cache.get_or_insert_with(&"d1", "cat dog", || vectorize(&["cat", "dog"]));
        assert_eq!(restored.term_count("cat"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_and_clear() {
        let cache = VectorCache::new();
        cache.get_or_insert_with(&1u32, "x", || vectorize(&["x"]));
        cache.get_or_insert_with(&2u32, "y", || vectorize(&["y"]));
        assert!(cache.invalidate(&1));
        assert!(!cache.invalidate(&1));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
