//! Warped n-gram coverage similarity
//!
//! Measures how much of a query's n-gram sequence is covered by a
//! candidate, generalized by a `warp` exponent in `[0, 1]`:
//!
//! - `warp == 1.0`: `overlap / total`
//! - otherwise: `(total^w - (total - overlap)^w) / total^w`
//!
//! Lower warp values penalize every missing n-gram more heavily, so a
//! partial overlap scores below the plain ratio while a full overlap still
//! scores 1.0. The score is asymmetric: it is normalized by the
//! query's n-gram count only, never by the candidate's.

use ahash::AHashSet;

use super::ngram::{generate_ngrams, NGramHash};
use super::Similarity;

/// Score an overlap count against the query's total n-gram count.
///
/// `overlap` is clamped to `total`. A zero `total` scores 0.0.
#[must_use]
pub fn warped_score(overlap: usize, total: usize, warp: f64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let overlap = overlap.min(total);

    let score = if warp == 1.0 {
        overlap as f64 / total as f64
    } else {
        let total_w = (total as f64).powf(warp);
        let diff_w = ((total - overlap) as f64).powf(warp);
        (total_w - diff_w) / total_w
    };

    score.clamp(0.0, 1.0)
}

/// Count how many of `query` hash occurrences appear in `candidate`.
///
/// Each query occurrence counts once when the candidate contains that hash
/// at least once, so repeated query n-grams count repeatedly.
#[must_use]
pub fn coverage_overlap(query: &[NGramHash], candidate: &[NGramHash]) -> usize {
    let present: AHashSet<NGramHash> = candidate.iter().copied().collect();
    query.iter().filter(|hash| present.contains(hash)).count()
}

/// Pairwise form of the index's scoring rule.
///
/// `similarity(query, candidate)` returns the score the index would give
/// `candidate` for `query` if `candidate` were the only stored token
/// (hash collisions aside, which the index shares).
///
/// # Complexity
/// - Time: O(m+n) n-gram generation plus a hash-set probe per query n-gram
/// - Space: O(n) for the candidate's hash set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NgramCoverage {
    pub pad: char,
    pub n: usize,
    pub warp: f64,
}

impl Default for NgramCoverage {
    fn default() -> Self {
        Self {
            pad: crate::indexing::DEFAULT_PAD,
            n: crate::indexing::DEFAULT_N,
            warp: crate::indexing::DEFAULT_WARP,
        }
    }
}

impl NgramCoverage {
    #[must_use]
    pub fn new(pad: char, n: usize, warp: f64) -> Self {
        Self { pad, n, warp }
    }
}

impl Similarity for NgramCoverage {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let (Ok(query), Ok(candidate)) = (
            generate_ngrams(a, self.pad, self.n),
            generate_ngrams(b, self.pad, self.n),
        ) else {
            return 0.0;
        };
        warped_score(coverage_overlap(&query, &candidate), query.len(), self.warp)
    }

    fn name(&self) -> &'static str {
        "ngram_coverage"
    }
}
