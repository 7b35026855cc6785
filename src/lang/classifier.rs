//! Language classification.
//!
//! Total over all string inputs — every text maps to exactly one label, in a
//! fixed precedence order that is part of the contract:
//!
//! 1. any Armenian-block code point → [`Language::Armenian`]
//! 2. else any Cyrillic code point  → [`Language::Russian`]
//! 3. else any translit keyword is a substring of the lower-cased text →
//!    [`Language::ArmenianTranslit`]
//! 4. else → [`Language::English`] (including the empty string)
//!
//! Native script always wins: an Armenian sentence with incidental Latin
//! substrings still classifies as Armenian. Keyword matching is substring
//! containment, not word-boundary, so the keyword list must avoid tokens
//! that occur inside common English words (see DESIGN.md).

use super::script::{ARMENIAN, CYRILLIC};
use super::tables::TranslitTables;
use super::Language;

/// Classify `text` into exactly one language label.
pub fn classify(tables: &TranslitTables, text: &str) -> Language {
    if ARMENIAN.matches(text) {
        return Language::Armenian;
    }
    if CYRILLIC.matches(text) {
        return Language::Russian;
    }
    let lower = text.to_lowercase();
    if tables.keywords().iter().any(|k| lower.contains(k.as_str())) {
        return Language::ArmenianTranslit;
    }
    Language::English
}
