//! Gramdex - concurrent n-gram index for approximate string matching
//!
//! Indexes short strings by the hashes of their padded character n-grams
//! and scores queries by how much of their n-gram sequence a stored string
//! covers. Useful for spell suggestion, deduplication and record linkage.
//!
//! # Features
//! - Unicode-aware n-gram generation with a configurable pad character
//! - Append-only LZ4-compressed string pool
//! - Lock-striped inverted index safe for concurrent reads and writes
//! - Warp-parametrized coverage similarity
//!
//! # Example
//!
//! ```rust
//! use gramdex::{IndexConfig, NgramIndex};
//!
//! let index = NgramIndex::new(IndexConfig::default().with_n(3)).unwrap();
//! index.add("hello").unwrap();
//! index.add("world").unwrap();
//!
//! let results = index.search("hello", 0.0).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].similarity, 1.0);
//! ```

pub mod algorithms;
pub mod error;
pub mod indexing;

pub use algorithms::{
    extract_ngrams, generate_ngrams, hash_gram, warped_score, NGramHash, NgramCoverage,
    Similarity,
};
pub use error::{NgramError, Result};
pub use indexing::{
    Codec, IndexConfig, IndexStats, InvertedIndex, Lz4Codec, NgramIndex, RawCodec, Region,
    SearchMatch, SearchResult, StringPool, TokenId,
};
