//! Core reader module for `.wap` definition stores and `.idx` suggestion indexes.

pub mod codec;
pub mod definitions;
pub mod dictionary;
pub mod format;
pub mod iter;
pub mod search;
pub mod suggestions;
pub mod types;
mod utils;

pub use definitions::DefinitionStore;
pub use dictionary::{Dictionary, SanityReport};
pub use suggestions::{SuggestionIndex, DEFAULT_SUGGESTION_LIMIT};
pub use types::error::{WapIdxError, Result};
