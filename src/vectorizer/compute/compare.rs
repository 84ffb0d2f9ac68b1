use num::Num;

use crate::vectorizer::term::TermFrequency;

/// Sparse term-keyed vector
/// Terms that are not stored have weight zero.
pub trait TermVector<N>
where
    N: Num + Copy,
{
    /// Stored `(term, weight)` pairs, in a deterministic order
    fn entries(&self) -> impl Iterator<Item = (&str, N)>;
    /// Weight of `term`, zero when absent
    fn weight(&self, term: &str) -> N;
}

impl TermVector<u32> for TermFrequency {
    #[inline]
    fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.iter()
    }

    #[inline]
    fn weight(&self, term: &str) -> u32 {
        self.term_count(term)
    }
}

pub trait Compare<N>
where
    N: Num + Copy + Into<f64>,
{
    /// dot product
    /// d(a, b) = Σ(a_i * b_i)
    fn dot<A, B>(vec: &A, other: &B) -> f64
    where
        A: TermVector<N> + ?Sized,
        B: TermVector<N> + ?Sized;

    /// cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// ||a|| = sqrt(Σ(a_i^2))
    fn cosine_similarity<A, B>(vec: &A, other: &B) -> f64
    where
        A: TermVector<N> + ?Sized,
        B: TermVector<N> + ?Sized;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompare;

impl DefaultCompare {
    /// Σ(a_i^2)
    #[inline]
    fn squared_norm<N, V>(vec: &V) -> f64
    where
        N: Num + Copy + Into<f64>,
        V: TermVector<N> + ?Sized,
    {
        vec.entries()
            .map(|(_, w)| {
                let w: f64 = w.into();
                w * w
            })
            .sum()
    }
}

impl<N> Compare<N> for DefaultCompare
where
    N: Num + Copy + Into<f64>,
{
    #[inline]
    fn dot<A, B>(vec: &A, other: &B) -> f64
    where
        A: TermVector<N> + ?Sized,
        B: TermVector<N> + ?Sized,
    {
        // terms missing from `vec` contribute nothing, so only its entries are walked
        vec.entries()
            .map(|(term, a)| {
                let a: f64 = a.into();
                let b: f64 = other.weight(term).into();
                a * b
            })
            .sum()
    }

    #[inline]
    fn cosine_similarity<A, B>(vec: &A, other: &B) -> f64
    where
        A: TermVector<N> + ?Sized,
        B: TermVector<N> + ?Sized,
    {
        let norm_a = Self::squared_norm::<N, A>(vec);
        let norm_b = Self::squared_norm::<N, B>(other);
        // zero vector carries no signal
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        let dot = <Self as Compare<N>>::dot(vec, other);
        // sqrt(|a|^2 * |b|^2) == |a| * |b|, but exact for identical integer vectors
        (dot / (norm_a * norm_b).sqrt()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::term::vectorize;

    fn cos(a: &[&str], b: &[&str]) -> f64 {
        <DefaultCompare as Compare<u32>>::cosine_similarity(&vectorize(a), &vectorize(b))
    }

    #[test]
    fn identical_vectors_score_one() {
        assert_eq!(cos(&["hello", "world"], &["hello", "world"]), 1.0);
        let s = cos(&["a", "a", "b", "c", "c", "c"], &["a", "a", "b", "c", "c", "c"]);
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_vectors_score_exactly_zero() {
        assert_eq!(cos(&["apple", "banana"], &["xyz", "qrs", "tuv"]), 0.0);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cos(&[], &["a"]), 0.0);
        assert_eq!(cos(&["a"], &[]), 0.0);
        assert_eq!(cos(&[], &[]), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = ["the", "quick", "brown", "fox", "fox"];
        let b = ["the", "lazy", "dog", "fox"];
        assert_eq!(cos(&a, &b).to_bits(), cos(&b, &a).to_bits());
    }

    #[test]
    fn scale_invariant() {
        let once = cos(&["cat"], &["cat", "dog"]);
        let twice = cos(&["cat"], &["cat", "dog", "cat", "dog"]);
        assert!((once - twice).abs() < 1e-12);
    }

    #[test]
    fn known_value() {
        // a = (1, 1), b = (2, 1) over [cat, dog]
        let s = cos(&["cat", "dog"], &["cat", "dog", "cat"]);
        assert!((s - 3.0 / 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn dot_counts_only_shared_terms() {
        let a = vectorize(&["x", "x", "y"]);
        let b = vectorize(&["x", "z", "z"]);
        assert_eq!(<DefaultCompare as Compare<u32>>::dot(&a, &b), 2.0);
        assert_eq!(<DefaultCompare as Compare<u32>>::dot(&b, &a), 2.0);
    }

    #[test]
    fn stays_in_unit_range() {
        let texts: [&[&str]; 4] = [
            &["a", "b", "c"],
            &["a", "a", "a", "a", "b"],
            &["c"],
            &["d", "e", "a"],
        ];
        for a in texts {
            for b in texts {
                let s = cos(a, b);
                assert!((0.0..=1.0).contains(&s), "out of range: {s}");
            }
        }
    }
}
