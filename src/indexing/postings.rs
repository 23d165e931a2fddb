//! Inverted index from n-gram hash to per-token occurrence counts
//!
//! Posting lists are spread over a fixed set of lock stripes keyed by the
//! n-gram hash. Registering a hash write-locks only its stripe, and an
//! overlap scan read-locks one stripe per query hash, so readers of
//! unrelated hashes never wait on a writer.
//!
//! No lock is held across hashes. A scan running next to an insert of the
//! same token may see some of that token's n-grams and not others.

use ahash::AHashMap;
use parking_lot::RwLock;

use super::TokenId;
use crate::algorithms::NGramHash;

/// Number of lock stripes. Must be a power of two.
const STRIPE_COUNT: usize = 16;

/// Occurrence counts of one n-gram, keyed by token
pub type PostingList = AHashMap<TokenId, u32>;

type Stripe = AHashMap<NGramHash, PostingList>;

/// Lock-striped map from n-gram hash to posting list
pub struct InvertedIndex {
    stripes: Box<[RwLock<Stripe>]>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self {
            stripes: (0..STRIPE_COUNT)
                .map(|_| RwLock::new(Stripe::new()))
                .collect(),
        }
    }

    /// Get the stripe holding `hash`
    #[inline]
    fn stripe_for(&self, hash: NGramHash) -> &RwLock<Stripe> {
        &self.stripes[hash as usize & (STRIPE_COUNT - 1)]
    }

    /// Increment the occurrence count of `token` under `hash`
    pub fn register(&self, hash: NGramHash, token: TokenId) {
        *self
            .stripe_for(hash)
            .write()
            .entry(hash)
            .or_default()
            .entry(token)
            .or_insert(0) += 1;
    }

    /// Count, per token, how many query hash occurrences it appears under.
    ///
    /// A hash repeated in `hashes` is looked up once per occurrence, so a
    /// token's count grows once for each repeat.
    pub fn overlap_counts(&self, hashes: &[NGramHash]) -> AHashMap<TokenId, usize> {
        let mut counts: AHashMap<TokenId, usize> = AHashMap::new();

        for &hash in hashes {
            let stripe = self.stripe_for(hash).read();
            if let Some(postings) = stripe.get(&hash) {
                for &token in postings.keys() {
                    *counts.entry(token).or_insert(0) += 1;
                }
            }
        }

        counts
    }

    /// Occurrence count of `token` under `hash`
    pub fn count(&self, hash: NGramHash, token: TokenId) -> u32 {
        self.stripe_for(hash)
            .read()
            .get(&hash)
            .and_then(|postings| postings.get(&token).copied())
            .unwrap_or(0)
    }

    /// Snapshot of the posting list for `hash`
    pub fn postings(&self, hash: NGramHash) -> Option<PostingList> {
        self.stripe_for(hash).read().get(&hash).cloned()
    }

    /// Number of distinct n-gram hashes with a posting list
    pub fn distinct_ngrams(&self) -> usize {
        self.stripes.iter().map(|stripe| stripe.read().len()).sum()
    }

    /// Check if no hash has been registered
    pub fn is_empty(&self) -> bool {
        self.stripes.iter().all(|stripe| stripe.read().is_empty())
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InvertedIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvertedIndex")
            .field("stripes", &self.stripes.len())
            .field("distinct_ngrams", &self.distinct_ngrams())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_counts_occurrences() {
        let index = InvertedIndex::new();
        index.register(10, 0);
        index.register(10, 0);
        index.register(10, 1);
        assert_eq!(index.count(10, 0), 2);
        assert_eq!(index.count(10, 1), 1);
        assert_eq!(index.count(10, 2), 0);
        assert_eq!(index.count(11, 0), 0);
        assert_eq!(index.distinct_ngrams(), 1);
    }

    #[test]
    fn test_overlap_counts_per_query_occurrence() {
        let index = InvertedIndex::new();
        index.register(1, 0);
        index.register(2, 0);
        index.register(2, 1);

        // Hash 2 appears twice in the query, so both tokens count it twice
        let counts = index.overlap_counts(&[1, 2, 2, 3]);
        assert_eq!(counts.get(&0), Some(&3));
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_stored_multiplicity_does_not_inflate_overlap() {
        let index = InvertedIndex::new();
        for _ in 0..5 {
            index.register(7, 0);
        }
        assert_eq!(index.overlap_counts(&[7]).get(&0), Some(&1));
    }

    #[test]
    fn test_unknown_hashes() {
        let index = InvertedIndex::new();
        assert!(index.is_empty());
        assert!(index.overlap_counts(&[1, 2, 3]).is_empty());
        assert!(index.postings(1).is_none());
    }

    #[test]
    fn test_hashes_spread_over_stripes() {
        let index = InvertedIndex::new();
        for hash in 0..64u32 {
            index.register(hash, hash as usize);
        }
        assert_eq!(index.distinct_ngrams(), 64);
        assert!(index.stripes.iter().all(|stripe| stripe.read().len() == 4));
    }

    #[test]
    fn test_concurrent_register() {
        let index = Arc::new(InvertedIndex::new());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let index = Arc::clone(&index);
                thread::spawn(move || {
                    for hash in 0..200u32 {
                        index.register(hash, t);
                        index.register(hash, 99);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(index.distinct_ngrams(), 200);
        for hash in 0..200u32 {
            assert_eq!(index.count(hash, 99), 4);
            assert_eq!(index.postings(hash).unwrap().len(), 5);
        }
    }
}
