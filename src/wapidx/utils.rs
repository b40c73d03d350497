//! Low-level byte reading utilities

use std::io::{Read, Seek, SeekFrom};

use super::types::error::Result;
use super::types::models::ChunkSpan;

/// Read the raw bytes of a chunk span from the data region.
pub fn read_span<R: Read + Seek>(reader: &mut R, span: ChunkSpan) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(span.start))?;
    let mut bytes = vec![0u8; span.len() as usize];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Position of the first `\n` at or after `start`, or `bytes.len()` if none.
pub fn find_line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| start + pos)
}
