//! Compression codecs for the string pool
//!
//! The pool treats a codec as an opaque byte transform. Any codec error is
//! reported as [`NgramError::CompressionFailure`](crate::NgramError::CompressionFailure).

use std::io;

/// Lossless byte compressor/decompressor pair
pub trait Codec: Send + Sync {
    /// Compress `bytes` into a self-contained block
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;

    /// Restore the bytes passed to [`compress`](Codec::compress)
    fn decompress(&self, encoded: &[u8]) -> io::Result<Vec<u8>>;

    /// Name of the codec for error messages
    fn name(&self) -> &'static str;
}

/// LZ4 block codec with the uncompressed size prepended to each block
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        lz4::block::compress(bytes, None, true)
    }

    fn decompress(&self, encoded: &[u8]) -> io::Result<Vec<u8>> {
        if encoded.is_empty() {
            return Ok(Vec::new());
        }
        lz4::block::decompress(encoded, None)
    }

    fn name(&self) -> &'static str {
        "lz4"
    }
}

/// Pass-through codec that stores bytes as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl Codec for RawCodec {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }

    fn decompress(&self, encoded: &[u8]) -> io::Result<Vec<u8>> {
        Ok(encoded.to_vec())
    }

    fn name(&self) -> &'static str {
        "raw"
    }
}
