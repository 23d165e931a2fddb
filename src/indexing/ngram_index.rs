//! N-gram index for approximate string matching
//!
//! Stores every added string in a compressed [`StringPool`] and registers
//! its n-gram hashes in an [`InvertedIndex`]. A query is cut into n-grams
//! the same way; every token sharing at least one n-gram becomes a
//! candidate and is scored by how much of the query it covers.
//!
//! # Concurrency
//!
//! All operations take `&self` and the index is `Send + Sync`; share it
//! with `Arc`. Reads and writes can run from any number of threads.
//!
//! `add` is not atomic as a whole. The string is stored first, then each
//! n-gram is registered under its own stripe lock, so a concurrent search
//! may see some of a new token's n-grams and not others. A token id that
//! shows up in a search result always has its string stored.

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::codec::{Codec, Lz4Codec};
use super::config::{validate_unit_interval, IndexConfig};
use super::postings::InvertedIndex;
use super::string_pool::StringPool;
use super::TokenId;
use crate::algorithms::{generate_ngrams, warped_score, NGramHash};
use crate::error::{NgramError, Result};

/// Minimum batch size for parallel query evaluation.
///
/// Smaller batches run sequentially since a single query is cheap relative
/// to thread pool coordination.
const PARALLEL_THRESHOLD: usize = 100;

/// One scored candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: TokenId,
    pub similarity: f64,
}

/// Scored candidate together with its stored text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub id: TokenId,
    pub text: String,
    pub similarity: f64,
}

/// Size counters for an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of stored tokens
    pub tokens: usize,
    /// Number of distinct n-gram hashes
    pub distinct_ngrams: usize,
    /// Compressed bytes held by the string pool
    pub pool_bytes: usize,
}

/// Concurrent n-gram index
///
/// # Example
///
/// ```rust
/// use gramdex::indexing::{IndexConfig, NgramIndex};
///
/// let index = NgramIndex::new(IndexConfig::default()).unwrap();
/// let hello = index.add("hello").unwrap();
/// index.add("world").unwrap();
///
/// let best = index.best_match("hel", 0.0).unwrap();
/// assert_eq!(best.id, hello);
/// assert_eq!(index.get_string(best.id).unwrap(), "hello");
/// ```
pub struct NgramIndex {
    config: IndexConfig,
    pool: StringPool,
    postings: InvertedIndex,
}

impl NgramIndex {
    /// Create an index with LZ4-compressed string storage.
    ///
    /// # Errors
    /// Returns [`NgramError::InvalidConfig`] when `n` or `warp` is out of range.
    pub fn new(config: IndexConfig) -> Result<Self> {
        Self::with_codec(config, Box::new(Lz4Codec))
    }

    /// Create an index that stores strings with the given codec
    pub fn with_codec(config: IndexConfig, codec: Box<dyn Codec>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, codec))
    }

    /// Assemble an index from a config that is already known to be valid
    fn build(config: IndexConfig, codec: Box<dyn Codec>) -> Self {
        debug!(
            "creating n-gram index: n={}, pad={:?}, warp={}, codec={}",
            config.n,
            config.pad,
            config.warp,
            codec.name()
        );
        Self {
            config,
            pool: StringPool::with_codec(codec),
            postings: InvertedIndex::new(),
        }
    }

    /// Frozen configuration of this index
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// N-gram hashes of `text` under this index's pad and gram size
    pub fn ngrams(&self, text: &str) -> Result<Vec<NGramHash>> {
        generate_ngrams(text, self.config.pad, self.config.n)
    }

    /// Add a string, returning its token id.
    ///
    /// Equal strings added twice get two ids. If storing the string fails,
    /// none of its n-grams are registered.
    pub fn add(&self, text: &str) -> Result<TokenId> {
        let hashes = self.ngrams(text)?;
        let id = self.pool.append(text)?;

        for &hash in &hashes {
            self.postings.register(hash, id);
        }

        trace!("added token {} with {} n-grams", id, hashes.len());
        Ok(id)
    }

    /// Add multiple strings in order.
    ///
    /// Stops at the first failure; strings before it stay indexed.
    pub fn add_all<I, S>(&self, iter: I) -> Result<Vec<TokenId>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        iter.into_iter().map(|text| self.add(text.as_ref())).collect()
    }

    /// Get the string stored under `id`
    pub fn get_string(&self, id: TokenId) -> Result<String> {
        self.pool.read_at(id)
    }

    /// Score every token sharing an n-gram with `query`.
    ///
    /// Returns all results with `similarity >= threshold`, in no particular
    /// order.
    ///
    /// # Errors
    /// - [`NgramError::InvalidConfig`] if `threshold` is outside `[0, 1]`
    /// - [`NgramError::EmptyInput`] if `query` is empty
    pub fn search(&self, query: &str, threshold: f64) -> Result<Vec<SearchResult>> {
        validate_unit_interval(threshold, "threshold")?;
        let hashes = self.ngrams(query)?;
        let total = hashes.len();

        let overlaps = self.postings.overlap_counts(&hashes);
        trace!(
            "query with {} n-grams matched {} candidates",
            total,
            overlaps.len()
        );

        Ok(overlaps
            .into_iter()
            .map(|(id, overlap)| SearchResult {
                id,
                similarity: warped_score(overlap, total, self.config.warp),
            })
            .filter(|result| result.similarity >= threshold)
            .collect())
    }

    /// Search and attach stored text, best first.
    ///
    /// Results are sorted by similarity descending, then token id
    /// ascending, and truncated to `limit` when given.
    pub fn search_matches(
        &self,
        query: &str,
        threshold: f64,
        limit: Option<usize>,
    ) -> Result<Vec<SearchMatch>> {
        let mut results = self.search(query, threshold)?;
        results.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        results
            .into_iter()
            .map(|result| {
                Ok(SearchMatch {
                    id: result.id,
                    text: self.pool.read_at(result.id)?,
                    similarity: result.similarity,
                })
            })
            .collect()
    }

    /// Single highest-scoring result; ties go to the lowest token id.
    ///
    /// # Errors
    /// Same as [`search`](Self::search), plus [`NgramError::NoMatchesFound`]
    /// when nothing reaches `threshold`.
    pub fn best_match(&self, query: &str, threshold: f64) -> Result<SearchResult> {
        self.search(query, threshold)?
            .into_iter()
            .max_by(|a, b| {
                a.similarity
                    .total_cmp(&b.similarity)
                    .then_with(|| b.id.cmp(&a.id))
            })
            .ok_or(NgramError::NoMatchesFound)
    }

    /// Run [`search`](Self::search) for every query.
    ///
    /// Output order follows `queries`. Large batches are evaluated in
    /// parallel.
    pub fn batch_search<S>(&self, queries: &[S], threshold: f64) -> Vec<Result<Vec<SearchResult>>>
    where
        S: AsRef<str> + Sync,
    {
        if queries.len() < PARALLEL_THRESHOLD {
            queries
                .iter()
                .map(|query| self.search(query.as_ref(), threshold))
                .collect()
        } else {
            queries
                .par_iter()
                .map(|query| self.search(query.as_ref(), threshold))
                .collect()
        }
    }

    /// Get index size
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Current size counters
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            tokens: self.pool.len(),
            distinct_ngrams: self.postings.distinct_ngrams(),
            pool_bytes: self.pool.byte_len(),
        }
    }
}

impl Default for NgramIndex {
    fn default() -> Self {
        Self::build(IndexConfig::default(), Box::new(Lz4Codec))
    }
}

impl std::fmt::Debug for NgramIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NgramIndex")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .field("postings", &self.postings)
            .finish()
    }
}
