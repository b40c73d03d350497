//! Footer and index table parsing, shared by both file kinds.
//!
//! ```text
//! ┌──────────────────┐ 0
//! │  Data region     │  compressed chunks, back to back
//! ├──────────────────┤ index_start
//! │  Index table     │  fixed-size records
//! ├──────────────────┤ file_len - 4
//! │  u32 index_start │  big-endian
//! └──────────────────┘ file_len
//! ```

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, info};

use crate::wapidx::types::error::{WapIdxError, Result};
use crate::wapidx::types::models::{ChunkSpan, TableRecord};

/// Size of the trailing index offset.
pub const FOOTER_SIZE: u64 = 4;

/// The parsed index table of a file, held in memory for the reader's lifetime.
#[derive(Debug, Clone)]
pub struct IndexTable<T: TableRecord> {
    pub records: Vec<T>,
    /// Byte offset where the index table starts; also the end of the last chunk.
    pub index_start: u64,
}

impl<T: TableRecord> IndexTable<T> {
    /// Byte span of the chunk addressed by record `index`.
    ///
    /// The chunk runs up to the next record's offset, or up to the index
    /// table for the last record.
    pub fn chunk_span(&self, index: usize) -> Result<ChunkSpan> {
        let record = self.records.get(index).ok_or_else(|| {
            WapIdxError::InvalidFormat(format!(
                "{} record {} out of range ({} records)",
                T::DEBUG_NAME,
                index,
                self.records.len()
            ))
        })?;

        let start = record.chunk_offset();
        let end = self
            .records
            .get(index + 1)
            .map_or(self.index_start, |next| next.chunk_offset());

        if start > end || end > self.index_start {
            return Err(WapIdxError::InvalidFormat(format!(
                "{} chunk {} has invalid span [{}..{}) (index table at {})",
                T::DEBUG_NAME,
                index,
                start,
                end,
                self.index_start
            )));
        }

        debug!("{} chunk {} spans [{}..{})", T::DEBUG_NAME, index, start, end);
        Ok(ChunkSpan { start, end })
    }
}

/// Reads the footer and the whole index table.
///
/// Records are taken in file order; the format guarantees they are sorted
/// and they are not re-sorted here.
pub fn parse<T: TableRecord, R: Read + Seek>(reader: &mut R) -> Result<IndexTable<T>> {
    let file_len = reader.seek(SeekFrom::End(0))?;
    if file_len < FOOTER_SIZE {
        return Err(WapIdxError::InvalidFormat(format!(
            "File too short for footer: {} bytes",
            file_len
        )));
    }

    let table_end = file_len - FOOTER_SIZE;
    reader.seek(SeekFrom::Start(table_end))?;
    let index_start = u64::from(reader.read_u32::<BigEndian>()?);

    if index_start > table_end {
        return Err(WapIdxError::InvalidFormat(format!(
            "Index table offset {} lies beyond the footer at {}",
            index_start, table_end
        )));
    }

    let table_len = table_end - index_start;
    if table_len % T::SIZE as u64 != 0 {
        return Err(WapIdxError::InvalidFormat(format!(
            "{} index table of {} bytes is not a multiple of the {}-byte record size",
            T::DEBUG_NAME,
            table_len,
            T::SIZE
        )));
    }

    reader.seek(SeekFrom::Start(index_start))?;
    let mut table_bytes = vec![0u8; table_len as usize];
    reader.read_exact(&mut table_bytes)?;

    let records: Vec<T> = table_bytes.chunks_exact(T::SIZE).map(T::decode).collect();

    info!(
        "Parsed {} index table: {} records at offset {}",
        T::DEBUG_NAME,
        records.len(),
        index_start
    );

    Ok(IndexTable { records, index_start })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wapidx::types::models::{IndexRecord, SuggestRecord};
    use std::io::Cursor;

    fn file_with_table(data: &[u8], table: &[u8]) -> Cursor<Vec<u8>> {
        let mut bytes = data.to_vec();
        let index_start = bytes.len() as u32;
        bytes.extend_from_slice(table);
        bytes.extend_from_slice(&index_start.to_be_bytes());
        Cursor::new(bytes)
    }

    #[test]
    fn parses_definition_records() {
        let table = [0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 0, 2];
        let mut file = file_with_table(b"abcdef", &table);
        let parsed = parse::<IndexRecord, _>(&mut file).unwrap();
        assert_eq!(parsed.index_start, 6);
        assert_eq!(
            parsed.records,
            vec![IndexRecord { key: 1, offset: 0 }, IndexRecord { key: 2, offset: 3 }]
        );
        assert_eq!(parsed.chunk_span(0).unwrap(), ChunkSpan { start: 0, end: 3 });
        assert_eq!(parsed.chunk_span(1).unwrap(), ChunkSpan { start: 3, end: 6 });
        assert!(parsed.chunk_span(2).is_err());
    }

    #[test]
    fn parses_suggestion_records() {
        let mut table = Vec::new();
        for v in [0u32, 7, 0x6161_0000, 0x6262_0000] {
            table.extend_from_slice(&v.to_be_bytes());
        }
        let mut file = file_with_table(b"zz", &table);
        let parsed = parse::<SuggestRecord, _>(&mut file).unwrap();
        assert_eq!(
            parsed.records,
            vec![SuggestRecord { offset: 0, count: 7, key_a: 0x6161_0000, key_b: 0x6262_0000 }]
        );
    }

    #[test]
    fn empty_table_is_valid() {
        let mut file = file_with_table(b"", &[]);
        let parsed = parse::<SuggestRecord, _>(&mut file).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn rejects_short_file() {
        let mut file = Cursor::new(vec![0u8, 1]);
        assert!(matches!(
            parse::<IndexRecord, _>(&mut file),
            Err(WapIdxError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_offset_past_footer() {
        let mut file = Cursor::new(vec![0, 0, 0, 0, 0, 0, 0, 9]);
        assert!(matches!(
            parse::<IndexRecord, _>(&mut file),
            Err(WapIdxError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_partial_record() {
        let mut file = file_with_table(b"", &[0, 0, 0, 0, 0]);
        assert!(matches!(
            parse::<IndexRecord, _>(&mut file),
            Err(WapIdxError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_decreasing_offsets_when_spanning() {
        let table = [0, 0, 0, 4, 0, 1, 0, 0, 0, 2, 0, 2];
        let mut file = file_with_table(b"abcdef", &table);
        let parsed = parse::<IndexRecord, _>(&mut file).unwrap();
        assert!(parsed.chunk_span(0).is_err());
    }
}
