//! Pure n-gram algorithms
//!
//! Generation and scoring are stateless functions so the index and the
//! pairwise scorer share one definition of both.

pub mod coverage;
pub mod ngram;

pub use coverage::*;
pub use ngram::*;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}
