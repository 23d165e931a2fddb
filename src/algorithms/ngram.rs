//! N-gram generation over padded strings
//!
//! A string is wrapped in one pad character on each side, then cut into
//! every window of exactly `n` characters, followed by the trailing
//! suffixes of length `n-1` down to 2. Each piece is hashed to 32 bits.
//!
//! Windows are measured in Unicode scalar values, not bytes, so multi-byte
//! text and multi-byte pad characters produce whole-character n-grams.
//!
//! Repeated n-grams are kept: `"aaaa"` yields the `"aaa"` window twice, and
//! that multiplicity is part of the scoring contract.

use smallvec::SmallVec;
use xxhash_rust::xxh32::xxh32;

use crate::error::{NgramError, Result};

/// 32-bit hash of one n-gram. Distinct n-grams may collide.
pub type NGramHash = u32;

/// Seed for the n-gram hash. Changing it changes every stored posting.
const HASH_SEED: u32 = 0;

/// Hash the UTF-8 bytes of one n-gram
#[inline]
#[must_use]
pub fn hash_gram(bytes: &[u8]) -> NGramHash {
    xxh32(bytes, HASH_SEED)
}

/// Wrap `s` in one `pad` character on each side
fn pad_input(s: &str, pad: char) -> String {
    let mut padded = String::with_capacity(s.len() + 2 * pad.len_utf8());
    padded.push(pad);
    padded.push_str(s);
    padded.push(pad);
    padded
}

/// Slice `padded` into its n-grams, in generation order.
///
/// Full windows come first, left to right, then the trailing suffixes of
/// decreasing length. Suffixes longer than the padded string are skipped.
fn gram_slices(padded: &str, n: usize) -> Vec<&str> {
    debug_assert!(n >= 1, "n-gram size must be positive");

    // Byte offset of every character start, plus the end of the string
    let bounds: SmallVec<[usize; 64]> = padded
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(padded.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let windows = (char_count + 1).saturating_sub(n);
    let mut grams = Vec::with_capacity(windows + n.saturating_sub(2));

    if char_count >= n {
        for start in 0..=(char_count - n) {
            grams.push(&padded[bounds[start]..bounds[start + n]]);
        }
    }

    for len in (2..n).rev() {
        if len <= char_count {
            grams.push(&padded[bounds[char_count - len]..]);
        }
    }

    grams
}

/// Generate the ordered n-gram hash sequence for `s`.
///
/// # Errors
/// Returns [`NgramError::EmptyInput`] when `s` is empty.
pub fn generate_ngrams(s: &str, pad: char, n: usize) -> Result<Vec<NGramHash>> {
    if s.is_empty() {
        return Err(NgramError::EmptyInput);
    }
    let padded = pad_input(s, pad);
    Ok(gram_slices(&padded, n)
        .into_iter()
        .map(|gram| hash_gram(gram.as_bytes()))
        .collect())
}

/// Extract the n-gram substrings for `s`, in the same order as
/// [`generate_ngrams`] hashes them.
///
/// # Errors
/// Returns [`NgramError::EmptyInput`] when `s` is empty.
pub fn extract_ngrams(s: &str, pad: char, n: usize) -> Result<Vec<String>> {
    if s.is_empty() {
        return Err(NgramError::EmptyInput);
    }
    let padded = pad_input(s, pad);
    Ok(gram_slices(&padded, n)
        .into_iter()
        .map(str::to_owned)
        .collect())
}
