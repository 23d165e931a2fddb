//! Append-only pool of compressed token strings
//!
//! Every appended string is compressed and written to the end of one
//! growing byte buffer. A [`Region`] per token records where its bytes
//! live; the token id is the region's position. Written ranges are never
//! truncated or rewritten, so a region handed out once stays valid for the
//! lifetime of the pool.
//!
//! # Locking
//!
//! - `append` holds the write lock across the buffer extension and the
//!   region push, so readers never observe a region without its bytes.
//! - `read_at` holds the read lock only long enough to copy the region's
//!   compressed bytes, then decompresses without the lock.

use parking_lot::RwLock;

use super::codec::{Codec, Lz4Codec};
use super::TokenId;
use crate::error::{NgramError, Result};

/// Byte range `[start, end)` of one token in the pool buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Default)]
struct PoolData {
    buffer: Vec<u8>,
    regions: Vec<Region>,
}

/// Compressed, append-only string store keyed by sequential [`TokenId`]
pub struct StringPool {
    data: RwLock<PoolData>,
    codec: Box<dyn Codec>,
}

impl StringPool {
    /// Create an empty pool using LZ4 compression
    pub fn new() -> Self {
        Self::with_codec(Box::new(Lz4Codec))
    }

    /// Create an empty pool using the given codec
    pub fn with_codec(codec: Box<dyn Codec>) -> Self {
        Self {
            data: RwLock::new(PoolData::default()),
            codec,
        }
    }

    /// Compress and store `text`, returning its new token id.
    ///
    /// Compression happens before the lock is taken; on failure nothing is
    /// written and no id is consumed.
    pub fn append(&self, text: &str) -> Result<TokenId> {
        let encoded = self
            .codec
            .compress(text.as_bytes())
            .map_err(|e| NgramError::compression(self.codec.name(), e))?;

        let mut data = self.data.write();
        let start = data.buffer.len();
        data.buffer.extend_from_slice(&encoded);
        let end = data.buffer.len();

        let id = data.regions.len();
        data.regions.push(Region { start, end });
        Ok(id)
    }

    /// Read back the string stored under `id`
    pub fn read_at(&self, id: TokenId) -> Result<String> {
        let encoded = {
            let data = self.data.read();
            let region = data.regions.get(id).copied().ok_or(NgramError::IndexOutOfRange {
                id,
                len: data.regions.len(),
            })?;
            data.buffer[region.start..region.end].to_vec()
        };

        let decoded = self
            .codec
            .decompress(&encoded)
            .map_err(|e| NgramError::compression(self.codec.name(), e))?;
        String::from_utf8(decoded).map_err(|e| NgramError::CompressionFailure {
            codec: self.codec.name(),
            message: e.to_string(),
        })
    }

    /// Region recorded for `id`, if assigned
    pub fn region(&self, id: TokenId) -> Option<Region> {
        self.data.read().regions.get(id).copied()
    }

    /// Number of stored strings
    pub fn len(&self) -> usize {
        self.data.read().regions.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total compressed bytes held by the pool
    pub fn byte_len(&self) -> usize {
        self.data.read().buffer.len()
    }

    /// Name of the codec in use
    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringPool")
            .field("len", &self.len())
            .field("byte_len", &self.byte_len())
            .field("codec", &self.codec.name())
            .finish()
    }
}
