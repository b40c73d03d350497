//! # Decompressed Chunk Layouts
//!
//! A definition chunk holds the entries of one hash bucket:
//!
//! ```text
//! word_1 '\n' definition_1 word_2 '\n' definition_2 ...
//! [u32 offset of word_1] [u32 offset of word_2] ...   ← sub-index
//! [u32 offset of the sub-index]
//! ```
//!
//! A suggestion chunk is a plain newline-delimited word list, already in
//! global sort order.

use byteorder::{BigEndian, ByteOrder};

use crate::wapidx::search::{self, SearchMode};
use crate::wapidx::types::error::{WapIdxError, Result};
use crate::wapidx::utils;

/// A decompressed definition chunk with its parsed sub-index.
#[derive(Debug)]
pub struct DefinitionChunk {
    bytes: Vec<u8>,
    entries: Vec<usize>,
    /// Start of the sub-index; the text region is `bytes[..text_end]`.
    text_end: usize,
}

impl DefinitionChunk {
    /// Parses the trailer and sub-index of a decompressed chunk.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(WapIdxError::InvalidFormat(format!(
                "Definition chunk too short: {} bytes",
                bytes.len()
            )));
        }

        let trailer = bytes.len() - 4;
        let text_end = BigEndian::read_u32(&bytes[trailer..]) as usize;

        if text_end > trailer || (trailer - text_end) % 4 != 0 {
            return Err(WapIdxError::InvalidFormat(format!(
                "Sub-index offset {} does not fit a chunk of {} bytes",
                text_end,
                bytes.len()
            )));
        }

        let entries = bytes[text_end..trailer]
            .chunks_exact(4)
            .map(|raw| BigEndian::read_u32(raw) as usize)
            .collect::<Vec<_>>();

        if let Some(&bad) = entries.iter().find(|&&offset| offset > text_end) {
            return Err(WapIdxError::InvalidFormat(format!(
                "Sub-index entry {} points past the text region ({} bytes)",
                bad, text_end
            )));
        }

        Ok(Self { bytes, entries, text_end })
    }

    /// Number of words in the chunk.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn text(&self) -> &[u8] {
        &self.bytes[..self.text_end]
    }

    /// Raw bytes of the headword at sub-index position `index`.
    pub fn word(&self, index: usize) -> &[u8] {
        let text = self.text();
        let start = self.entries[index];
        &text[start..utils::find_line_end(text, start)]
    }

    /// Raw bytes of the definition at sub-index position `index`.
    ///
    /// The definition starts after the headword's newline and ends where the
    /// next entry starts, or at the sub-index for the last entry.
    pub fn definition(&self, index: usize) -> &[u8] {
        let text = self.text();
        let start = self.entries[index];
        let end = self.entries.get(index + 1).copied().unwrap_or(self.text_end);
        let definition_start = (utils::find_line_end(text, start) + 1).min(end);
        &text[definition_start..end]
    }

    /// Finds the entry whose headword equals `word` byte for byte.
    ///
    /// Comparison is raw byte order and case-sensitive.
    pub fn find(&self, word: &[u8]) -> Option<usize> {
        search::search(self.len(), SearchMode::Eq, |i| self.word(i).cmp(word))
    }

    /// Iterates `(headword, definition)` byte slices in sub-index order.
    pub fn entries(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        (0..self.len()).map(move |i| (self.word(i), self.definition(i)))
    }
}

/// Splits a decompressed suggestion chunk into its non-empty, trimmed words.
pub fn word_lines(bytes: &[u8]) -> impl Iterator<Item = String> + '_ {
    bytes
        .split(|&b| b == b'\n')
        .map(|line| String::from_utf8_lossy(line).trim().to_string())
        .filter(|word| !word.is_empty())
}

/// Case-insensitive prefix test used to filter suggestion candidates.
///
/// `lower_prefix` must already be lowercase; the empty prefix matches all words.
pub fn matches_prefix(word: &str, lower_prefix: &str) -> bool {
    lower_prefix.is_empty() || word.to_lowercase().starts_with(lower_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_chunk(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut text = Vec::new();
        let mut offsets = Vec::new();
        for (word, definition) in entries {
            offsets.push(text.len() as u32);
            text.extend_from_slice(word.as_bytes());
            text.push(b'\n');
            text.extend_from_slice(definition.as_bytes());
        }
        let sub_index = text.len() as u32;
        for offset in offsets {
            text.extend_from_slice(&offset.to_be_bytes());
        }
        text.extend_from_slice(&sub_index.to_be_bytes());
        text
    }

    #[test]
    fn finds_words_case_sensitively() {
        let chunk = DefinitionChunk::parse(build_chunk(&[
            ("Apple", "the company\n"),
            ("apple", "a fruit\n"),
            ("apricot", "another fruit\n"),
        ]))
        .unwrap();
        assert_eq!(chunk.len(), 3);
        assert_eq!(chunk.find(b"apple"), Some(1));
        assert_eq!(chunk.definition(1), b"a fruit\n");
        assert_eq!(chunk.find(b"Apple"), Some(0));
        assert_eq!(chunk.find(b"APPLE"), None);
        assert_eq!(chunk.definition(2), b"another fruit\n");
    }

    #[test]
    fn empty_definition_is_empty_slice() {
        let chunk = DefinitionChunk::parse(build_chunk(&[("a", ""), ("b", "x")])).unwrap();
        assert_eq!(chunk.definition(0), b"");
        assert_eq!(chunk.definition(1), b"x");
    }

    #[test]
    fn empty_chunk_finds_nothing() {
        let chunk = DefinitionChunk::parse(0u32.to_be_bytes().to_vec()).unwrap();
        assert!(chunk.is_empty());
        assert_eq!(chunk.find(b"anything"), None);
    }

    #[test]
    fn rejects_bad_trailer() {
        assert!(DefinitionChunk::parse(vec![1, 2]).is_err());
        assert!(DefinitionChunk::parse(vec![b'x', 0, 0, 0, 9]).is_err());
        // Sub-index of 3 bytes cannot hold whole u32 entries.
        assert!(DefinitionChunk::parse(vec![b'x', 0, 0, 0, 0, 0, 0, 1]).is_err());
    }

    #[test]
    fn rejects_entry_past_text() {
        let mut bytes = b"ab\n".to_vec();
        bytes.extend_from_slice(&7u32.to_be_bytes());
        bytes.extend_from_slice(&3u32.to_be_bytes());
        assert!(DefinitionChunk::parse(bytes).is_err());
    }

    #[test]
    fn word_lines_skip_blank_and_trim() {
        let words: Vec<String> = word_lines(b"alpha\n\n beta \r\ngamma").collect();
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn prefix_matching_folds_case() {
        assert!(matches_prefix("Коровайна", "коров"));
        assert!(matches_prefix("anything", ""));
        assert!(!matches_prefix("корова", "кот"));
    }
}
