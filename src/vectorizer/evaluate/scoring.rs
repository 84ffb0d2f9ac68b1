use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// Score band used when presenting a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    /// score > 0.7
    High,
    /// 0.4 < score <= 0.7
    Medium,
    /// score <= 0.4
    Low,
}

impl MatchLevel {
    pub const HIGH_THRESHOLD: f64 = 0.7;
    pub const MEDIUM_THRESHOLD: f64 = 0.4;

    pub fn from_score(score: f64) -> Self {
        if score > Self::HIGH_THRESHOLD {
            MatchLevel::High
        } else if score > Self::MEDIUM_THRESHOLD {
            MatchLevel::Medium
        } else {
            MatchLevel::Low
        }
    }
}

impl Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchLevel::High => "high",
            MatchLevel::Medium => "medium",
            MatchLevel::Low => "low",
        };
        f.write_str(s)
    }
}

/// One ranked result: the candidate (or its key) and its similarity score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitEntry<K> {
    pub key: K,
    /// cosine similarity in [0, 1]
    pub score: f64,
}

impl<K> HitEntry<K> {
    pub fn new(key: K, score: f64) -> Self {
        HitEntry { key, score }
    }

    #[inline]
    pub fn match_level(&self) -> MatchLevel {
        MatchLevel::from_score(self.score)
    }

    /// Score as a percentage with one decimal, e.g. `"87.5%"`
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}

/// Structure to store search results
///
/// Every scored candidate appears exactly once; nothing is filtered out.
/// Truncation (`top`) is left to the caller.
#[derive(Clone, PartialEq, Serialize)]
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    /// Create a new Hits instance, keeping the given order
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score
    /// Stable: hits with equal scores keep their relative input order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry<K>> {
        self.list.iter()
    }

    /// First `n` hits (all of them if fewer)
    pub fn top(&self, n: usize) -> &[HitEntry<K>] {
        &self.list[..n.min(self.list.len())]
    }

    /// Replace every key, keeping order and scores
    pub fn map_keys<U, F>(self, mut f: F) -> Hits<U>
    where
        F: FnMut(K) -> U,
    {
        Hits {
            list: self
                .list
                .into_iter()
                .map(|hit| HitEntry::new(f(hit.key), hit.score))
                .collect(),
        }
    }

    /// `(key, score)` pairs in current order
    pub fn into_pairs(self) -> Vec<(K, f64)> {
        self.list.into_iter().map(|hit| (hit.key, hit.score)).collect()
    }
}

impl<K> IntoIterator for Hits<K> {
    type Item = HitEntry<K>;
    type IntoIter = std::vec::IntoIter<HitEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a Hits<K> {
    type Item = &'a HitEntry<K>;
    type IntoIter = std::slice::Iter<'a, HitEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // each hit on its own line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.key, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.key, hit.score)))
                .finish()
        }
    }
}

impl<K> Display for Hits<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, hit) in self.list.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. {:>6} [{}] {}",
                rank + 1,
                hit.percent(),
                hit.match_level(),
                hit.key
            )?;
        }
        Ok(())
    }
}
