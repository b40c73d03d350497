//! Iterators for sequential access to both file kinds.
//!
//! 1. [`WordIterator`] - every word of a suggestion index, in sorted order
//! 2. [`EntryIterator`] - every `(headword, definition)` pair of a definition store
//!
//! Both decompress one chunk at a time and stop after the first error.
//!
//! # Example
//! ```no_run
//! # use wapidx_reader::SuggestionIndex;
//! # let mut index = SuggestionIndex::open("uk.idx").unwrap();
//! for word in index.iter_words() {
//!     println!("{}", word.unwrap());
//! }
//! ```

use std::io::{Read, Seek};
use std::vec::IntoIter;

use super::definitions::DefinitionStore;
use super::suggestions::SuggestionIndex;
use super::types::error::Result;

/// Iterator over all words of a [`SuggestionIndex`].
///
/// Created by [`SuggestionIndex::iter_words()`].
pub struct WordIterator<'a, R> {
    index: &'a mut SuggestionIndex<R>,
    chunk_idx: usize,
    current_words: IntoIter<String>,
}

impl<'a, R: Read + Seek> WordIterator<'a, R> {
    pub(super) fn new(index: &'a mut SuggestionIndex<R>) -> Self {
        Self {
            index,
            chunk_idx: 0,
            current_words: Vec::new().into_iter(),
        }
    }
}

impl<'a, R: Read + Seek> Iterator for WordIterator<'a, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.current_words.next() {
                return Some(Ok(word));
            }

            if self.chunk_idx >= self.index.chunk_count() {
                return None;
            }

            let chunk_idx = self.chunk_idx;
            self.chunk_idx += 1;
            match self.index.read_chunk_words(chunk_idx) {
                Ok(words) => self.current_words = words.into_iter(),
                Err(e) => {
                    self.chunk_idx = self.index.chunk_count();
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Iterator over all entries of a [`DefinitionStore`].
///
/// Buckets are visited in index table order and entries in sub-index order,
/// so the sequence is grouped by hash bucket rather than alphabetical.
///
/// Created by [`DefinitionStore::iter_entries()`].
pub struct EntryIterator<'a, R> {
    store: &'a mut DefinitionStore<R>,
    bucket_idx: usize,
    current_entries: IntoIter<(String, String)>,
}

impl<'a, R: Read + Seek> EntryIterator<'a, R> {
    pub(super) fn new(store: &'a mut DefinitionStore<R>) -> Self {
        Self {
            store,
            bucket_idx: 0,
            current_entries: Vec::new().into_iter(),
        }
    }
}

impl<'a, R: Read + Seek> Iterator for EntryIterator<'a, R> {
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current_entries.next() {
                return Some(Ok(entry));
            }

            if self.bucket_idx >= self.store.bucket_count() {
                return None;
            }

            let bucket_idx = self.bucket_idx;
            self.bucket_idx += 1;
            match self.store.read_chunk(bucket_idx) {
                Ok(chunk) => {
                    self.current_entries = chunk
                        .entries()
                        .map(|(word, definition)| {
                            (
                                String::from_utf8_lossy(word).into_owned(),
                                String::from_utf8_lossy(definition).into_owned(),
                            )
                        })
                        .collect::<Vec<_>>()
                        .into_iter();
                }
                Err(e) => {
                    self.bucket_idx = self.store.bucket_count();
                    return Some(Err(e));
                }
            }
        }
    }
}
