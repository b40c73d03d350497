//! Core data structures for the on-disk formats.
//!
//! This module defines the fixed-size records held in the index tables of
//! both file kinds, plus the small value types that queries pass around.

use byteorder::{BigEndian, ByteOrder};

/// One record of a definition store (`.wap`) index table.
///
/// On disk: `u32` chunk offset followed by `u16` bucket key, big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRecord {
    pub key: u16,
    pub offset: u32,
}

/// One record of a suggestion index (`.idx`) index table.
///
/// On disk: `offset`, `count`, `key_a`, `key_b`, each a big-endian `u32`.
/// `key_a` and `key_b` are packed keys of the first and last word of the chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestRecord {
    pub offset: u32,
    pub count: u32,
    pub key_a: u32,
    pub key_b: u32,
}

/// A fixed-size record that can be decoded from an index table.
pub trait TableRecord: Sized + Copy {
    /// A short name used for logging and error messages.
    const DEBUG_NAME: &'static str;

    /// Encoded size of one record in bytes.
    const SIZE: usize;

    /// Decodes one record from exactly `SIZE` bytes.
    fn decode(bytes: &[u8]) -> Self;

    /// Byte offset of the chunk this record addresses.
    fn chunk_offset(&self) -> u64;
}

impl TableRecord for IndexRecord {
    const DEBUG_NAME: &'static str = "definition";
    const SIZE: usize = 6;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            offset: BigEndian::read_u32(&bytes[0..4]),
            key: BigEndian::read_u16(&bytes[4..6]),
        }
    }

    fn chunk_offset(&self) -> u64 {
        u64::from(self.offset)
    }
}

impl TableRecord for SuggestRecord {
    const DEBUG_NAME: &'static str = "suggestion";
    const SIZE: usize = 16;

    fn decode(bytes: &[u8]) -> Self {
        Self {
            offset: BigEndian::read_u32(&bytes[0..4]),
            count: BigEndian::read_u32(&bytes[4..8]),
            key_a: BigEndian::read_u32(&bytes[8..12]),
            key_b: BigEndian::read_u32(&bytes[12..16]),
        }
    }

    fn chunk_offset(&self) -> u64 {
        u64::from(self.offset)
    }
}

/// Byte span of one compressed chunk in the data region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    pub start: u64,
    pub end: u64,
}

impl ChunkSpan {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Inclusive range of suggestion chunks that may hold words with a given prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub lo: usize,
    pub hi: usize,
}
