//! Index configuration
//!
//! An [`IndexConfig`] is validated once when the index is built and is
//! frozen afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{NgramError, Result};

/// Default pad character placed on both ends of every string
pub const DEFAULT_PAD: char = '$';

/// Default n-gram size (trigrams)
pub const DEFAULT_N: usize = 3;

/// Default warp exponent (plain overlap ratio)
pub const DEFAULT_WARP: f64 = 1.0;

/// Smallest accepted n-gram size
pub const MIN_NGRAM_SIZE: usize = 2;

/// Largest accepted n-gram size
pub const MAX_NGRAM_SIZE: usize = 8;

/// Configuration for an [`NgramIndex`](super::NgramIndex)
///
/// # Example
///
/// ```rust
/// use gramdex::indexing::IndexConfig;
///
/// let config = IndexConfig::default().with_n(4).with_pad('@').with_warp(0.5);
/// assert!(config.validate().is_ok());
/// assert!(IndexConfig::default().with_n(9).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Boundary character added before and after each string
    pub pad: char,
    /// Size of each n-gram, in characters
    pub n: usize,
    /// Similarity exponent in `[0, 1]`
    pub warp: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            pad: DEFAULT_PAD,
            n: DEFAULT_N,
            warp: DEFAULT_WARP,
        }
    }
}

impl IndexConfig {
    #[must_use]
    pub fn with_pad(mut self, pad: char) -> Self {
        self.pad = pad;
        self
    }

    #[must_use]
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    #[must_use]
    pub fn with_warp(mut self, warp: f64) -> Self {
        self.warp = warp;
        self
    }

    /// Check that `n` and `warp` are within range
    pub fn validate(&self) -> Result<()> {
        if !(MIN_NGRAM_SIZE..=MAX_NGRAM_SIZE).contains(&self.n) {
            return Err(NgramError::invalid_config(format!(
                "n must be in range [{}, {}], got {}",
                MIN_NGRAM_SIZE, MAX_NGRAM_SIZE, self.n
            )));
        }
        validate_unit_interval(self.warp, "warp")
    }
}

/// Validate that a warp or threshold value is a finite number in [0.0, 1.0]
pub(crate) fn validate_unit_interval(value: f64, param_name: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(NgramError::invalid_config(format!(
            "{} must be a finite number, got {}",
            param_name, value
        )));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(NgramError::invalid_config(format!(
            "{} must be in range [0.0, 1.0], got {}",
            param_name, value
        )));
    }
    Ok(())
}
