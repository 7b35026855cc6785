//! Language-specific system prompts and fallback replies.
//!
//! Prompts live under `config/prompts/system_{hy,ru,en}.txt`; a missing or
//! unreadable file degrades to the embedded copy with a warning. Selection is
//! by resolved language — translit never reaches here unfolded.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::lang::Language;

const DEFAULT_HY: &str = include_str!("../../config/prompts/system_hy.txt");
const DEFAULT_RU: &str = include_str!("../../config/prompts/system_ru.txt");
const DEFAULT_EN: &str = include_str!("../../config/prompts/system_en.txt");

/// Reply sent when the provider fails — the user never sees a raw error.
pub fn fallback_reply(language: Language) -> &'static str {
    match language.resolved() {
        Language::Armenian => "Ներողություն, չկարողացա պատասխանել։ Կարող եք կրկին փորձել։",
        Language::Russian => "Извините, не смог ответить. Попробуйте еще раз.",
        _ => "Sorry, couldn't respond. Please try again.",
    }
}

/// One system prompt per supported reply language, loaded once at startup.
#[derive(Debug, Clone)]
pub struct PromptSet {
    hy: String,
    ru: String,
    en: String,
}

impl PromptSet {
    /// Load prompts from `dir`, falling back per file to the embedded copies.
    pub fn load(dir: &Path) -> Self {
        Self {
            hy: load_or_default(dir, "system_hy.txt", DEFAULT_HY),
            ru: load_or_default(dir, "system_ru.txt", DEFAULT_RU),
            en: load_or_default(dir, "system_en.txt", DEFAULT_EN),
        }
    }

    /// Embedded prompts only — used by tests and degraded startup.
    pub fn embedded() -> Self {
        Self {
            hy: DEFAULT_HY.to_string(),
            ru: DEFAULT_RU.to_string(),
            en: DEFAULT_EN.to_string(),
        }
    }

    /// System prompt for a resolved language.
    pub fn get(&self, language: Language) -> &str {
        match language.resolved() {
            Language::Armenian => &self.hy,
            Language::Russian => &self.ru,
            _ => &self.en,
        }
    }
}

fn load_or_default(dir: &Path, file: &str, default: &str) -> String {
    let path = dir.join(file);
    match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read prompt file, using embedded copy");
            default.to_string()
        }
    }
}
