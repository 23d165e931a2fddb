//! Indexing structures for n-gram fuzzy search
//!
//! - Config: validated, frozen index parameters
//! - Codec: compression used by the string pool
//! - String pool: append-only compressed token storage
//! - Postings: lock-striped inverted index from n-gram hash to tokens
//! - N-gram index: the facade tying the pieces together

pub mod codec;
pub mod config;
pub mod ngram_index;
pub mod postings;
pub mod string_pool;

pub use codec::*;
pub use config::*;
pub use ngram_index::*;
pub use postings::*;
pub use string_pool::*;

/// Sequential handle of one stored string, assigned from 0 in insertion order
pub type TokenId = usize;
