//! Key derivation for both index tables.
//!
//! - [`fast_key`]: the 16-bit bucket hint used by the definition store.
//! - [`PrefixKey`]: the packed, masked 4-byte prefix used by the suggestion index.

use std::cmp::Ordering;

use md5::{Digest, Md5};

/// Number of leading bytes packed into a suggestion key.
pub const PREFIX_KEY_LENGTH: usize = 4;

/// Derives the bucket hint of a word.
///
/// The word is lowercased, encoded as UTF-8 and hashed with MD5 (used only
/// as a stable content hash). The first two digest bytes, big-endian, form
/// the result.
///
/// The value is only a hint: it names the bucket a word was filed under,
/// and may equal the *position* of that bucket in the index table when the
/// table is dense. Callers must check the record stored at that position.
pub fn fast_key(word: &str) -> u16 {
    let digest = Md5::digest(word.to_lowercase().as_bytes());
    u16::from_be_bytes([digest[0], digest[1]])
}

/// A packed prefix of up to four bytes plus the mask of supplied bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixKey {
    pub key: u32,
    pub mask: u32,
}

impl PrefixKey {
    /// Packs the lowercase UTF-8 form of `prefix`, most significant byte first.
    ///
    /// Only the first [`PREFIX_KEY_LENGTH`] bytes are used, which may cut a
    /// multi-byte character in half; that is how the index keys were built.
    pub fn pack(prefix: &str) -> Self {
        let lower = prefix.to_lowercase();
        Self::from_bytes(lower.as_bytes())
    }

    /// Packs raw bytes without case folding.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut key = 0u32;
        let mut mask = 0u32;

        for (i, &byte) in bytes.iter().take(PREFIX_KEY_LENGTH).enumerate() {
            let shift = 8 * (PREFIX_KEY_LENGTH - i - 1);
            key |= u32::from(byte) << shift;
            mask |= 0xFF << shift;
        }

        Self { key, mask }
    }

    /// Number of bytes that were supplied.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize / 8
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Orders a stored index key against this prefix, comparing only the supplied bytes.
    pub fn compare(&self, stored: u32) -> Ordering {
        (stored & self.mask).cmp(&self.key)
    }
}
