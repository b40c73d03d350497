use std::cmp::Ordering;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, info, trace};

use super::codec::compression;
use super::codec::key::PrefixKey;
use super::format::chunk;
use super::format::footer::{self, IndexTable};
use super::iter::WordIterator;
use super::search::{self, SearchMode};
use super::types::error::{WapIdxError, Result};
use super::types::models::{ChunkRange, SuggestRecord};
use super::utils;

/// Number of suggestions returned by [`SuggestionIndex::suggest_default`].
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Reader for suggestion index (`.idx`) files.
///
/// Every chunk holds a slice of the globally sorted word list. The index
/// table records the packed first and last word of each chunk, so prefix
/// queries only inflate the chunks that can contain matches.
#[derive(Debug)]
pub struct SuggestionIndex<R = File> {
    reader: R,
    table: IndexTable<SuggestRecord>,
}

impl SuggestionIndex<File> {
    /// Opens a suggestion index file and parses its index table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening suggestion index: {}", path.display());
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> SuggestionIndex<R> {
    /// Builds an index over any seekable byte source.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let table = footer::parse::<SuggestRecord, _>(&mut reader)?;
        Ok(Self { reader, table })
    }

    pub fn records(&self) -> &[SuggestRecord] {
        &self.table.records
    }

    pub fn chunk_count(&self) -> usize {
        self.table.records.len()
    }

    /// Total number of words, summed over the chunk counts.
    pub fn word_count(&self) -> u64 {
        self.table.records.iter().map(|r| u64::from(r.count)).sum()
    }

    /// Finds the inclusive range of chunks that may contain words starting with `prefix`.
    ///
    /// The range is a coarse filter built from masked 4-byte keys: chunks
    /// outside it cannot match, chunks inside it may still hold non-matches.
    /// Returns `None` when the prefix sorts entirely before the first word or
    /// after the last word.
    pub fn prefix_bounds(&self, prefix: &str) -> Option<ChunkRange> {
        let key = PrefixKey::pack(prefix);
        let records = &self.table.records;
        let first_key = |i: usize| key.compare(records[i].key_a);
        let last_key = |i: usize| key.compare(records[i].key_b);

        // Words equal to the prefix may also end the previous chunk, hence the
        // strict modes. They have no answer at the two ends of the word list,
        // where only a tie with the end chunk can still match.
        let lo = search::search(records.len(), SearchMode::Lt, first_key).or_else(|| {
            search::search(records.len(), SearchMode::Ge, first_key)
                .filter(|&i| first_key(i) == Ordering::Equal)
        })?;
        let hi = search::search(records.len(), SearchMode::Gt, last_key).or_else(|| {
            search::search(records.len(), SearchMode::Le, last_key)
                .filter(|&i| last_key(i) == Ordering::Equal)
        })?;

        debug!("Prefix {:?} maps to chunks {}..={}", prefix, lo, hi);
        Some(ChunkRange { lo, hi })
    }

    /// Returns up to `limit` words starting with `prefix`, case-insensitively.
    ///
    /// Words come back in file order, which is the global sort order. An
    /// empty prefix returns the first `limit` words.
    pub fn suggest(&mut self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        match self.prefix_bounds(prefix) {
            Some(range) => self.collect_words(range, &prefix.to_lowercase(), limit),
            None => Ok(Vec::new()),
        }
    }

    /// [`suggest`](Self::suggest) with [`DEFAULT_SUGGESTION_LIMIT`].
    pub fn suggest_default(&mut self, prefix: &str) -> Result<Vec<String>> {
        self.suggest(prefix, DEFAULT_SUGGESTION_LIMIT)
    }

    /// Returns the word at position `ordinal` of the sorted word list.
    pub fn word_at(&mut self, ordinal: u64) -> Result<String> {
        let mut cumulative = 0u64;
        let mut found = None;

        for (index, record) in self.table.records.iter().enumerate() {
            let count = u64::from(record.count);
            if ordinal >= cumulative && ordinal < cumulative + count {
                found = Some(index);
                break;
            }
            cumulative += count;
        }

        let index = found.ok_or(WapIdxError::WordOutOfRange {
            ordinal,
            count: cumulative,
        })?;

        let wanted = (ordinal - cumulative) as usize + 1;
        let mut words = self.collect_words(ChunkRange { lo: index, hi: index }, "", wanted)?;

        if words.len() < wanted {
            return Err(WapIdxError::InvalidFormat(format!(
                "Chunk {} declares {} words but holds only {}",
                index,
                self.table.records[index].count,
                words.len()
            )));
        }

        words.pop().ok_or(WapIdxError::WordOutOfRange { ordinal, count: cumulative })
    }

    pub fn first_word(&mut self) -> Result<String> {
        self.word_at(0)
    }

    pub fn last_word(&mut self) -> Result<String> {
        let count = self.word_count();
        if count == 0 {
            return Err(WapIdxError::WordOutOfRange { ordinal: 0, count });
        }
        self.word_at(count - 1)
    }

    /// Picks a word uniformly at random.
    pub fn random_word(&mut self) -> Result<String> {
        let count = self.word_count();
        if count == 0 {
            return Err(WapIdxError::WordOutOfRange { ordinal: 0, count });
        }
        self.word_at(fastrand::u64(0..count))
    }

    /// Iterates every word of the index in file order, one chunk at a time.
    pub fn iter_words(&mut self) -> WordIterator<'_, R> {
        WordIterator::new(self)
    }

    /// Releases the underlying reader.
    pub fn close(self) {
        debug!("Closing suggestion index ({} chunks)", self.table.records.len());
    }

    /// Reads and inflates chunk `index`, returning its words.
    pub(crate) fn read_chunk_words(&mut self, index: usize) -> Result<Vec<String>> {
        let span = self.table.chunk_span(index)?;
        let compressed = utils::read_span(&mut self.reader, span)?;
        let raw = compression::inflate(&compressed)?;
        Ok(chunk::word_lines(&raw).collect())
    }

    fn collect_words(&mut self, range: ChunkRange, lower_prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut result = Vec::with_capacity(limit.min(1024));
        if limit == 0 {
            return Ok(result);
        }

        for index in range.lo..=range.hi {
            let words = self.read_chunk_words(index)?;
            trace!("Scanning {} words of chunk {}", words.len(), index);

            for word in words {
                if chunk::matches_prefix(&word, lower_prefix) {
                    result.push(word);
                    if result.len() >= limit {
                        return Ok(result);
                    }
                }
            }
        }

        Ok(result)
    }
}
