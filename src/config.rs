//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `ARAGIL_LOG_LEVEL` as an env override. Secrets (`LLM_API_KEY`,
//! `TELEGRAM_BOT_TOKEN`) come only from the environment, never from TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// Language pipeline configuration.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Optional external table file; the embedded defaults are used when
    /// absent or unreadable.
    pub tables_path: Option<PathBuf>,
    /// Echo the converted text (`📝 …`) back to the user when normalization
    /// rewrote the message.
    pub announce_conversion: bool,
}

/// OpenAI / OpenAI-compatible provider configuration (`[llm.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM subsystem configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (e.g. `"dummy"`, `"openai"`).
    pub provider: String,
    pub openai: OpenAiConfig,
}

/// Response cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

/// Conversation history configuration.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Exchanges sent to the provider per request (rolling window cap).
    pub max_messages: usize,
}

/// Comms channel configuration.
#[derive(Debug, Clone)]
pub struct CommsConfig {
    pub pty_enabled: bool,
    pub telegram_enabled: bool,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    pub language: LanguageConfig,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
    pub comms: CommsConfig,
    /// API key from `LLM_API_KEY` env var — `None` for keyless local models.
    pub llm_api_key: Option<String>,
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawConfig {
    bot: RawBot,
    #[serde(default)]
    language: RawLanguage,
    #[serde(default)]
    llm: RawLlm,
    #[serde(default)]
    cache: RawCache,
    #[serde(default)]
    history: RawHistory,
    #[serde(default)]
    comms: RawComms,
}

#[derive(Deserialize)]
struct RawBot {
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize)]
struct RawLanguage {
    #[serde(default)]
    tables_path: Option<String>,
    #[serde(default = "default_true")]
    announce_conversion: bool,
}

impl Default for RawLanguage {
    fn default() -> Self {
        Self { tables_path: None, announce_conversion: true }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    /// `default = "..."` in `[llm]` — which provider handles completions.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    openai: RawOpenAi,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAi::default() }
    }
}

#[derive(Deserialize)]
struct RawOpenAi {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAi {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawCache {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_cache_ttl")]
    ttl_seconds: u64,
}

impl Default for RawCache {
    fn default() -> Self {
        Self { enabled: true, ttl_seconds: default_cache_ttl() }
    }
}

#[derive(Deserialize)]
struct RawHistory {
    #[serde(default = "default_history_max")]
    max_messages: usize,
}

impl Default for RawHistory {
    fn default() -> Self {
        Self { max_messages: default_history_max() }
    }
}

#[derive(Deserialize, Default)]
struct RawComms {
    #[serde(default)]
    pty: RawPty,
    #[serde(default)]
    telegram: RawTelegram,
}

#[derive(Deserialize)]
struct RawPty {
    /// Defaults to `true`: the console channel auto-enables.
    #[serde(default = "default_true")]
    enabled: bool,
}

impl Default for RawPty {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Deserialize)]
struct RawTelegram {
    /// Defaults to `false`: Telegram must be explicitly enabled.
    #[serde(default)]
    enabled: bool,
}

impl Default for RawTelegram {
    fn default() -> Self {
        Self { enabled: false }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_llm_provider() -> String { "dummy".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_openai_temperature() -> f32 { 0.7 }
fn default_openai_timeout_seconds() -> u64 { 60 }
fn default_cache_ttl() -> u64 { 3600 }
fn default_history_max() -> usize { 5 }
fn default_true() -> bool { true }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let log_level_override = env::var("ARAGIL_LOG_LEVEL").ok();
    load_from(Path::new("config/default.toml"), log_level_override.as_deref())
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, log_level_override: Option<&str>) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let log_level = log_level_override.unwrap_or(&parsed.bot.log_level).to_string();

    Ok(Config {
        bot_name: parsed.bot.name,
        log_level,
        language: LanguageConfig {
            tables_path: parsed.language.tables_path.as_deref().map(expand_home),
            announce_conversion: parsed.language.announce_conversion,
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                temperature: parsed.llm.openai.temperature,
                timeout_seconds: parsed.llm.openai.timeout_seconds,
            },
        },
        cache: CacheConfig {
            enabled: parsed.cache.enabled,
            ttl_seconds: parsed.cache.ttl_seconds,
        },
        history: HistoryConfig {
            max_messages: parsed.history.max_messages,
        },
        comms: CommsConfig {
            pty_enabled: parsed.comms.pty.enabled,
            telegram_enabled: parsed.comms.telegram.enabled,
        },
        llm_api_key: env::var("LLM_API_KEY").ok(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            bot_name: "test".into(),
            log_level: "info".into(),
            language: LanguageConfig { tables_path: None, announce_conversion: true },
            llm: LlmConfig {
                provider: "dummy".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            cache: CacheConfig { enabled: true, ttl_seconds: 3600 },
            history: HistoryConfig { max_messages: 5 },
            comms: CommsConfig { pty_enabled: true, telegram_enabled: false },
            llm_api_key: None,
        }
    }
}
