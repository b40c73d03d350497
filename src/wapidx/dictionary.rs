use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::definitions::DefinitionStore;
use super::suggestions::SuggestionIndex;
use super::types::error::Result;

/// File extension of definition stores.
pub const DEFINITION_EXTENSION: &str = "wap";
/// File extension of suggestion indexes.
pub const SUGGESTION_EXTENSION: &str = "idx";

/// A definition store and its suggestion index, opened as a pair.
#[derive(Debug)]
pub struct Dictionary<R = File> {
    pub definitions: DefinitionStore<R>,
    pub suggestions: SuggestionIndex<R>,
}

/// What [`Dictionary::verify`] read back from a freshly opened pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityReport {
    pub word_count: u64,
    pub first_word: String,
    pub last_word: String,
    /// How many of the first and last word resolved to a definition.
    pub definitions_found: usize,
}

impl Dictionary<File> {
    /// Opens `<prefix>.wap` and `<prefix>.idx`.
    ///
    /// `prefix` is a path without extension, such as `dicts/uk`.
    pub fn open(prefix: impl AsRef<Path>) -> Result<Self> {
        let prefix = prefix.as_ref();
        let definitions = DefinitionStore::open(with_extension(prefix, DEFINITION_EXTENSION))?;
        let suggestions = SuggestionIndex::open(with_extension(prefix, SUGGESTION_EXTENSION))?;
        info!("Opened dictionary pair {}", prefix.display());
        Ok(Self { definitions, suggestions })
    }
}

impl<R: Read + Seek> Dictionary<R> {
    pub fn new(definitions: DefinitionStore<R>, suggestions: SuggestionIndex<R>) -> Self {
        Self { definitions, suggestions }
    }

    pub fn lookup(&mut self, word: &str) -> Result<String> {
        self.definitions.lookup(word)
    }

    pub fn suggest(&mut self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        self.suggestions.suggest(prefix, limit)
    }

    /// Post-load sanity check: reads the first and last word and looks both up.
    ///
    /// A word missing from the definition store is tolerated. Any corruption
    /// or I/O error is returned so the caller can discard the pair.
    pub fn verify(&mut self) -> Result<SanityReport> {
        let first_word = self.suggestions.first_word()?;
        let last_word = self.suggestions.last_word()?;

        let mut definitions_found = 0;
        for word in [&first_word, &last_word] {
            match self.definitions.lookup(word) {
                Ok(_) => definitions_found += 1,
                Err(e) if e.is_not_found() => warn!("Sanity check: {}", e),
                Err(e) => return Err(e),
            }
        }

        Ok(SanityReport {
            word_count: self.suggestions.word_count(),
            first_word,
            last_word,
            definitions_found,
        })
    }

    pub fn close(self) {
        self.definitions.close();
        self.suggestions.close();
    }
}

fn with_extension(prefix: &Path, extension: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
