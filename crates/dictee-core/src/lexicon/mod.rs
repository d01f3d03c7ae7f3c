//! Drug lexicon: canonical entries with their spoken/written aliases.
//!
//! The lexicon is read-only once built. Entry order is significant: it is the
//! scan order of the exact alias pass and the final tie-break of the ranker.

mod builtin;

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lexicon construction errors.
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lexicon has no entries")]
    Empty,

    #[error("Entry with empty canonical key")]
    EmptyKey,

    #[error("Entry {0} has no aliases")]
    NoAliases(String),

    #[error("Duplicate canonical key: {0}")]
    DuplicateKey(String),
}

pub type LexiconResult<T> = Result<T, LexiconError>;

/// A single drug in the lexicon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrugEntry {
    /// Display name (e.g., "Piperacilline + Tazobactam")
    pub key: String,
    /// Generic name; may equal the key
    pub dci: String,
    /// Surface forms: brand names, abbreviations, common misspellings
    pub aliases: Vec<String>,
}

impl DrugEntry {
    pub fn new(key: &str, dci: &str, aliases: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            dci: dci.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Lowercased aliases, in declaration order.
    pub fn aliases_lower(&self) -> impl Iterator<Item = String> + '_ {
        self.aliases.iter().map(|a| a.to_lowercase())
    }
}

static BUILTIN: LazyLock<Lexicon> = LazyLock::new(|| Lexicon {
    entries: builtin::entries(),
});

/// Immutable, ordered drug table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<DrugEntry>,
}

impl Lexicon {
    /// The curated lexicon shipped with the engine, built once per process.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Build a custom lexicon, validating every entry.
    pub fn from_entries(entries: Vec<DrugEntry>) -> LexiconResult<Self> {
        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            let key = entry.key.trim();
            if key.is_empty() {
                return Err(LexiconError::EmptyKey);
            }
            if entry.aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(LexiconError::NoAliases(entry.key.clone()));
            }
            if !seen.insert(key.to_lowercase()) {
                return Err(LexiconError::DuplicateKey(entry.key.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Parse a JSON array of `{ "key", "dci", "aliases" }` objects.
    pub fn from_json(json: &str) -> LexiconResult<Self> {
        let entries: Vec<DrugEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Serialize the entries back to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    pub fn entries(&self) -> &[DrugEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrugEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by canonical key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&DrugEntry> {
        let key = key.to_lowercase();
        self.entries.iter().find(|e| e.key.to_lowercase() == key)
    }

    /// Every alias in the lexicon, lowercased, in entry order.
    pub fn all_aliases(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().flat_map(|e| e.aliases_lower())
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a DrugEntry;
    type IntoIter = std::slice::Iter<'a, DrugEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
