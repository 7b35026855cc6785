//! Aragil bot — multi-lingual Armenian assistant.
//!
//! The crate's kernel is the [`lang`] pipeline: language classification plus
//! transliteration normalization, which decides what language a user is
//! actually writing in and rewrites Latin-script phonetic Armenian into
//! native script before anything downstream sees it. Around it sit the
//! boundary collaborators: the LLM provider layer, the response cache, the
//! rolling conversation history, and the comms channels feeding the
//! supervisor loop.

pub mod comms;
pub mod config;
pub mod error;
pub mod lang;
pub mod llm;
pub mod logger;
pub mod subsystems;
pub mod supervisor;

pub use crate::lang::{Language, LanguagePipeline, NormalizationResult, TranslitTables};
