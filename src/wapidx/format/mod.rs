//! File format parsing layer for definition stores and suggestion indexes.
//!
//! This module sits between raw byte I/O and the high-level readers
//! ([`DefinitionStore`](crate::wapidx::definitions::DefinitionStore) and
//! [`SuggestionIndex`](crate::wapidx::suggestions::SuggestionIndex)).
//!
//! - [`footer`]: Parses the trailing index offset and the index table
//! - [`chunk`]: Interprets decompressed chunk payloads

pub mod chunk;
pub mod footer;
