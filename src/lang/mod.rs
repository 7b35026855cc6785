//! Language pipeline — classification and transliteration normalization.
//!
//! Every inbound message goes through [`LanguagePipeline::resolve`]: classify
//! first; when the text is Latin-script phonetic Armenian ("translit"),
//! normalize it into native script and fold the language into Armenian. The
//! result is the canonical message text handed to the LLM collaborator.
//!
//! Both operations are pure synchronous functions over the immutable
//! [`TranslitTables`] — safe to call from any task without coordination.

pub mod classifier;
pub mod normalizer;
pub mod script;
pub mod tables;

pub use self::normalizer::NormalizationResult;
pub use self::tables::TranslitTables;

/// Language label assigned to an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Armenian,
    Russian,
    English,
    /// Latin-script phonetic Armenian.
    ArmenianTranslit,
}

impl Language {
    /// Short language code, as used in prompt file names and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Armenian => "hy",
            Language::Russian => "ru",
            Language::English => "en",
            Language::ArmenianTranslit => "hy-translit",
        }
    }

    /// The label used downstream for prompt selection — translit folds into
    /// Armenian, everything else is itself.
    pub fn resolved(self) -> Language {
        match self {
            Language::ArmenianTranslit => Language::Armenian,
            other => other,
        }
    }
}

/// Canonical form of an inbound message after language resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    /// Canonical text — normalized Armenian when conversion happened,
    /// otherwise the original text.
    pub text: String,
    /// Detected label, before folding.
    pub detected: Language,
    /// `true` when normalization rewrote the text (callers echo it back).
    pub converted: bool,
}

impl ResolvedMessage {
    /// Language for downstream prompt selection.
    pub fn language(&self) -> Language {
        self.detected.resolved()
    }
}

/// Classifier + normalizer over one immutable table set.
#[derive(Debug, Clone)]
pub struct LanguagePipeline {
    tables: TranslitTables,
}

impl LanguagePipeline {
    pub fn new(tables: TranslitTables) -> Self {
        Self { tables }
    }

    pub fn classify(&self, text: &str) -> Language {
        classifier::classify(&self.tables, text)
    }

    pub fn normalize(&self, text: &str) -> NormalizationResult {
        normalizer::normalize(&self.tables, text)
    }

    /// Classify, normalize translit, and produce the canonical message.
    pub fn resolve(&self, text: &str) -> ResolvedMessage {
        let detected = self.classify(text);
        if detected == Language::ArmenianTranslit {
            let n = self.normalize(text);
            if n.changed {
                return ResolvedMessage { text: n.text, detected, converted: true };
            }
        }
        ResolvedMessage { text: text.to_string(), detected, converted: false }
    }
}
