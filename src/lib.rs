//! # wapidx-reader
//!
//! A reader for compressed, indexed dictionary files:
//! `.wap` definition stores (word → definition) and `.idx` suggestion
//! indexes (prefix → sorted words). Both are read-only, big-endian,
//! chunked formats with raw deflate compression.
pub mod wapidx;

// Re-export the main types for convenience
pub use wapidx::{
    DefinitionStore,
    Dictionary,
    SanityReport,
    SuggestionIndex,
    WapIdxError,
    Result,
    DEFAULT_SUGGESTION_LIMIT,
    codec::key::{fast_key, PrefixKey},
    iter::{EntryIterator, WordIterator},
    search::SearchMode,
    types::models::{ChunkRange, IndexRecord, SuggestRecord},
};
