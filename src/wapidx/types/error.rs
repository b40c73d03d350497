//! Custom error types for the wapidx-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum WapIdxError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A chunk could not be inflated to completion, indicating a truncated or corrupted file.
    #[error("Corrupt block: {0}")]
    CorruptBlock(String),

    /// The hash bucket for the word does not exist in the index table.
    #[error("No index bucket for word {word:?}")]
    KeyNotFound { word: String },

    /// The bucket exists, but the exact word was not found inside its chunk.
    #[error("Word not found: {word:?}")]
    EntryNotFound { word: String },

    /// The file is structurally invalid (footer, index table, or chunk layout).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A word ordinal beyond the number of words in the suggestion index.
    #[error("Word ordinal {ordinal} out of range (index holds {count} words)")]
    WordOutOfRange { ordinal: u64, count: u64 },
}

impl WapIdxError {
    /// True for the two legitimate "absent" outcomes of a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::EntryNotFound { .. })
    }

    /// True when the file itself should be considered damaged or unreadable.
    ///
    /// Callers that manage downloaded dictionaries use this to decide whether
    /// a file pair must be discarded and fetched again.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::CorruptBlock(_) | Self::InvalidFormat(_)
        )
    }
}

/// A convenience `Result` type alias using the crate's `WapIdxError` type.
pub type Result<T> = std::result::Result<T, WapIdxError>;
