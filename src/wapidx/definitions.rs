use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, info};

use super::codec::{compression, key};
use super::format::chunk::DefinitionChunk;
use super::format::footer::{self, IndexTable};
use super::iter::EntryIterator;
use super::search::{self, SearchMode};
use super::types::error::{WapIdxError, Result};
use super::types::models::IndexRecord;
use super::utils;

/// Reader for definition store (`.wap`) files.
///
/// The index table is loaded on open and kept in memory; chunks are read
/// and inflated per query and never cached.
///
/// Query methods take `&mut self` because they seek the underlying reader.
/// Callers that need concurrent lookups open one store per thread.
#[derive(Debug)]
pub struct DefinitionStore<R = File> {
    reader: R,
    table: IndexTable<IndexRecord>,
}

impl DefinitionStore<File> {
    /// Opens a definition store file and parses its index table.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened or read
    /// - The footer or index table is malformed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening definition store: {}", path.display());
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> DefinitionStore<R> {
    /// Builds a store over any seekable byte source.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let table = footer::parse::<IndexRecord, _>(&mut reader)?;
        Ok(Self { reader, table })
    }

    /// The in-memory index table, sorted by bucket key.
    pub fn records(&self) -> &[IndexRecord] {
        &self.table.records
    }

    /// Number of buckets (index records) in the store.
    pub fn bucket_count(&self) -> usize {
        self.table.records.len()
    }

    /// Byte offset of the index table, i.e. the end of the data region.
    pub fn index_start(&self) -> u64 {
        self.table.index_start
    }

    /// Finds the position of the word's bucket in the index table.
    ///
    /// Tries the hash as a direct position first and falls back to a binary
    /// search by key when the record there belongs to another bucket.
    pub fn locate_bucket(&self, word: &str) -> Result<usize> {
        let hint = key::fast_key(word);
        let records = &self.table.records;

        if let Some(record) = records.get(usize::from(hint)) {
            if record.key == hint {
                debug!("Bucket {} for {:?} found at its direct position", hint, word);
                return Ok(usize::from(hint));
            }
        }

        debug!("Bucket {} for {:?} not at direct position, searching", hint, word);
        search::search_by_key(records, &hint, |record| record.key, SearchMode::Eq).ok_or_else(|| {
            WapIdxError::KeyNotFound {
                word: word.to_string(),
            }
        })
    }

    /// Looks up the definition of `word` as text.
    ///
    /// The bucket is chosen case-insensitively, but the headword must match
    /// `word` exactly, byte for byte. Invalid UTF-8 in the stored definition
    /// is replaced rather than rejected.
    pub fn lookup(&mut self, word: &str) -> Result<String> {
        let bytes = self.lookup_bytes(word)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Looks up the raw definition bytes of `word`.
    ///
    /// # Errors
    /// - [`WapIdxError::KeyNotFound`] if the word's bucket does not exist
    /// - [`WapIdxError::EntryNotFound`] if the bucket does not hold this exact word
    /// - [`WapIdxError::CorruptBlock`] if the chunk cannot be inflated
    pub fn lookup_bytes(&mut self, word: &str) -> Result<Vec<u8>> {
        let bucket = self.locate_bucket(word)?;
        let chunk = self.read_chunk(bucket)?;

        let entry = chunk.find(word.as_bytes()).ok_or_else(|| WapIdxError::EntryNotFound {
            word: word.to_string(),
        })?;

        Ok(chunk.definition(entry).to_vec())
    }

    /// Reads, inflates and parses the chunk of the bucket at `index`.
    pub(crate) fn read_chunk(&mut self, index: usize) -> Result<DefinitionChunk> {
        let span = self.table.chunk_span(index)?;
        let compressed = utils::read_span(&mut self.reader, span)?;
        DefinitionChunk::parse(compression::inflate(&compressed)?)
    }

    /// Iterates every `(headword, definition)` pair in index table order.
    ///
    /// One chunk is inflated at a time.
    pub fn iter_entries(&mut self) -> EntryIterator<'_, R> {
        EntryIterator::new(self)
    }

    /// Releases the underlying reader.
    pub fn close(self) {
        debug!("Closing definition store ({} buckets)", self.table.records.len());
    }
}
