//! Error types returned by index operations

use thiserror::Error;

use crate::indexing::TokenId;

/// Errors that can occur while building or querying an n-gram index
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NgramError {
    /// Empty string passed where text is required
    #[error("Input string must not be empty")]
    EmptyInput,

    /// Gram size, warp or threshold outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Token id that was never assigned by the pool
    #[error("Token id {id} out of range for pool of length {len}")]
    IndexOutOfRange { id: TokenId, len: usize },

    /// Best-match query with an empty result set
    #[error("No matches found")]
    NoMatchesFound,

    /// The compression codec failed to encode or decode a token
    #[error("{codec} codec failure: {message}")]
    CompressionFailure { codec: &'static str, message: String },
}

impl NgramError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        NgramError::InvalidConfig(message.into())
    }

    pub(crate) fn compression(codec: &'static str, err: std::io::Error) -> Self {
        NgramError::CompressionFailure {
            codec,
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NgramError>;
