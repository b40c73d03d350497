//! Decompression of chunk payloads.
//!
//! Every chunk in both file kinds is stored as a headerless (raw) deflate
//! stream: no zlib or gzip wrapper, no stored length.

use flate2::{Decompress, FlushDecompress, Status};
use log::trace;

use crate::wapidx::types::error::{WapIdxError, Result};

/// Growth step of the output buffer while inflating.
const INFLATE_BUFFER_SIZE: usize = 64 * 1024;

/// Inflates a raw deflate block to its original bytes.
///
/// The decompressor is drained until it reports the end of the stream. If
/// the input runs out first (truncated block) or the stream is malformed,
/// the block is reported as [`WapIdxError::CorruptBlock`].
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(false);
    let mut output = Vec::with_capacity(compressed.len().saturating_mul(4).max(INFLATE_BUFFER_SIZE));

    loop {
        if output.capacity() - output.len() < INFLATE_BUFFER_SIZE / 4 {
            output.reserve(INFLATE_BUFFER_SIZE);
        }

        let consumed = inflater.total_in();
        let produced = inflater.total_out();
        let input = &compressed[consumed as usize..];

        let status = inflater
            .decompress_vec(input, &mut output, FlushDecompress::None)
            .map_err(|e| WapIdxError::CorruptBlock(format!("deflate stream rejected: {}", e)))?;

        if status == Status::StreamEnd {
            break;
        }

        if inflater.total_in() == consumed && inflater.total_out() == produced {
            return Err(WapIdxError::CorruptBlock(format!(
                "deflate stream ended before completion after {} of {} input bytes",
                consumed,
                compressed.len()
            )));
        }
    }

    trace!("Inflated chunk: {} bytes -> {} bytes", compressed.len(), output.len());
    Ok(output)
}
