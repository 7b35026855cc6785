//! Transliteration table loading.
//!
//! Tables come from a JSON file with three sections:
//! - `keywords` — Latin tokens that signal phonetic Armenian,
//! - `words`    — whole-word substitutions, `[from, to]` pairs,
//! - `letters`  — letter/digraph substitutions, `[from, to]` pairs.
//!
//! Word and letter sections are pair lists rather than JSON objects so that
//! duplicate keys survive parsing: the builder applies last-definition-wins
//! and records every overwritten key for the validation hook.
//!
//! A failed load degrades to empty tables (classification still works via
//! script ranges; normalization becomes a no-op) — never a crash.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;

/// Default table set compiled into the binary.
const DEFAULT_TABLES_JSON: &str = include_str!("../../data/translit_map.json");

/// Raw JSON shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawTables {
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    words: Vec<(String, String)>,
    #[serde(default)]
    letters: Vec<(String, String)>,
}

/// Immutable transliteration tables, constructed once at startup and injected
/// into the classifier and normalizer by reference.
#[derive(Debug, Clone)]
pub struct TranslitTables {
    keywords: Vec<String>,
    words: HashMap<String, String>,
    letters: HashMap<String, String>,
    /// Length in chars of the longest letter key (the greedy scanner tries
    /// this length first — longest-match ordering by construction).
    max_letter_key: usize,
    /// Keys that appeared more than once in the source data (last one won).
    duplicate_keys: Vec<String>,
}

impl TranslitTables {
    /// Empty tables — the degraded-mode fallback.
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            words: HashMap::new(),
            letters: HashMap::new(),
            max_letter_key: 0,
            duplicate_keys: Vec::new(),
        }
    }

    /// Parse tables from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let raw: RawTables = serde_json::from_str(json)
            .map_err(|e| AppError::Tables(format!("malformed table json: {e}")))?;

        let mut duplicate_keys = Vec::new();

        let mut words = HashMap::with_capacity(raw.words.len());
        for (from, to) in raw.words {
            let key = from.to_lowercase();
            if words.insert(key.clone(), to).is_some() {
                duplicate_keys.push(key);
            }
        }

        let mut letters = HashMap::with_capacity(raw.letters.len());
        let mut max_letter_key = 0;
        for (from, to) in raw.letters {
            let key = from.to_lowercase();
            max_letter_key = max_letter_key.max(key.chars().count());
            if letters.insert(key.clone(), to).is_some() {
                duplicate_keys.push(key);
            }
        }

        let keywords = raw.keywords.iter().map(|k| k.to_lowercase()).collect();

        Ok(Self { keywords, words, letters, max_letter_key, duplicate_keys })
    }

    /// Load tables from `path` when given, else from the embedded default set.
    ///
    /// Any failure degrades to the next fallback and finally to empty tables,
    /// with a warning — startup never fails on bad table data.
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(p) = path {
            match fs::read_to_string(p).map_err(AppError::from).and_then(|s| Self::from_json(&s)) {
                Ok(tables) => return tables.warn_duplicates(),
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "cannot load translit tables, using embedded defaults");
                }
            }
        }
        match Self::from_json(DEFAULT_TABLES_JSON) {
            Ok(tables) => tables.warn_duplicates(),
            Err(e) => {
                warn!(error = %e, "embedded translit tables unreadable, language pipeline degraded to empty tables");
                Self::empty()
            }
        }
    }

    /// The validation hook: log every key the data defined more than once.
    fn warn_duplicates(self) -> Self {
        for key in &self.duplicate_keys {
            warn!(%key, "duplicate translit table key, last definition wins");
        }
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whole-word lookup. `key` must already be lower-cased.
    pub fn word(&self, key: &str) -> Option<&str> {
        self.words.get(key).map(String::as_str)
    }

    /// Letter/digraph lookup. `key` must already be lower-cased.
    pub fn letter(&self, key: &str) -> Option<&str> {
        self.letters.get(key).map(String::as_str)
    }

    /// Longest letter key length, in chars.
    pub fn max_letter_key_len(&self) -> usize {
        self.max_letter_key
    }

    /// Keys defined more than once in the source data (last one won).
    pub fn duplicate_keys(&self) -> &[String] {
        &self.duplicate_keys
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.words.is_empty() && self.letters.is_empty()
    }
}
