//! Transliteration normalization — translit text to native Armenian script.
//!
//! Two passes over whitespace-split tokens:
//!
//! - **Pass 1, whole word**: strip leading/trailing punctuation, lower-case
//!   the core, look it up in the word dictionary. On hit, substitute and
//!   reattach the punctuation in place.
//! - **Pass 2, letter fallback**: greedy longest-digraph-first scan, matching
//!   case-insensitively. All-or-nothing per token: if any character of the
//!   core is not reachable through the letter table, the token passes through
//!   verbatim. This keeps digits, URLs and foreign junk untouched.
//!
//! Never fails. If no substitution occurred anywhere, the input is returned
//! byte-identical with `changed = false`; callers use that flag to decide
//! whether to echo the converted text back to the user.

use super::tables::TranslitTables;

/// Outcome of a normalization call. Produced fresh per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationResult {
    pub text: String,
    pub changed: bool,
}

/// Rewrite `text` into native Armenian script, best effort.
pub fn normalize(tables: &TranslitTables, text: &str) -> NormalizationResult {
    let mut out: Vec<String> = Vec::new();
    let mut changed = false;

    for token in text.split_whitespace() {
        match convert_token(tables, token) {
            Some(converted) => {
                changed = true;
                out.push(converted);
            }
            None => out.push(token.to_string()),
        }
    }

    if !changed {
        // Byte-identical passthrough, including whitespace.
        return NormalizationResult { text: text.to_string(), changed: false };
    }
    NormalizationResult { text: out.join(" "), changed: true }
}

/// Convert one token, or `None` when it should pass through verbatim.
fn convert_token(tables: &TranslitTables, token: &str) -> Option<String> {
    // Split off leading/trailing punctuation; all-punctuation tokens pass through.
    let start = token.char_indices().find(|(_, c)| c.is_alphanumeric())?.0;
    let (last, last_c) = token.char_indices().rev().find(|(_, c)| c.is_alphanumeric())?;
    let end = last + last_c.len_utf8();

    let prefix = &token[..start];
    let core = &token[start..end];
    let suffix = &token[end..];

    let lower = core.to_lowercase();
    if let Some(word) = tables.word(&lower) {
        return Some(format!("{prefix}{word}{suffix}"));
    }

    convert_letters(tables, core).map(|arm| format!("{prefix}{arm}{suffix}"))
}

/// Greedy longest-first letter scan. `None` unless the whole core is mappable.
fn convert_letters(tables: &TranslitTables, core: &str) -> Option<String> {
    let max_key = tables.max_letter_key_len();
    if max_key == 0 {
        return None;
    }

    let chars: Vec<char> = core.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let longest = max_key.min(chars.len() - i);
        let mut advanced = 0;
        for len in (1..=longest).rev() {
            let key: String = chars[i..i + len].iter().collect::<String>().to_lowercase();
            if let Some(arm) = tables.letter(&key) {
                out.push_str(arm);
                advanced = len;
                break;
            }
        }
        if advanced == 0 {
            return None;
        }
        i += advanced;
    }
    Some(out)
}
