//! Chat pipeline — the per-message orchestration.
//!
//! Every inbound message runs: language resolve (classify + translit
//! normalization) → response-cache lookup on the canonical text → provider
//! completion with the language-specific system prompt and the rolling
//! history window → cache store + history append. Provider failures surface
//! as a per-language fallback reply, never as an error to the user.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::lang::{Language, LanguagePipeline};
use crate::llm::{CompletionRequest, LlmProvider};
use super::cache::ResponseCache;
use super::history::ConversationHistory;
use super::prompts::{fallback_reply, PromptSet};

/// Exchanges retained per user; the context window is the configured
/// `history.max_messages` slice of this.
const HISTORY_CAP: usize = 50;

/// Run the expired-cache sweep every this many messages per user.
const CACHE_SWEEP_EVERY: u64 = 10;

/// Outcome of one handled message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Normalized Armenian text to echo back (`📝 …`) when transliteration
    /// rewrote the message and announcing is enabled.
    pub converted: Option<String>,
    /// The reply text for the user.
    pub text: String,
    /// Resolved language of the exchange.
    pub language: Language,
    /// Whether the reply came from the response cache.
    pub cached: bool,
}

/// Everything needed to answer one user message. Shared behind `Arc` by all
/// comms channels; all interior state is its own lock.
pub struct ChatPipeline {
    lang: LanguagePipeline,
    provider: LlmProvider,
    prompts: PromptSet,
    cache: ResponseCache,
    history: ConversationHistory,
    cache_enabled: bool,
    max_context: usize,
    announce_conversion: bool,
}

impl ChatPipeline {
    pub fn new(config: &Config, lang: LanguagePipeline, provider: LlmProvider, prompts: PromptSet) -> Self {
        Self {
            lang,
            provider,
            prompts,
            cache: ResponseCache::new(config.cache.ttl_seconds),
            history: ConversationHistory::new(HISTORY_CAP),
            cache_enabled: config.cache.enabled,
            max_context: config.history.max_messages,
            announce_conversion: config.language.announce_conversion,
        }
    }

    /// Handle one inbound message from `user_id`.
    pub async fn handle(&self, user_id: &str, text: &str) -> ChatReply {
        let resolved = self.lang.resolve(text);
        let language = resolved.language();
        debug!(
            %user_id,
            detected = resolved.detected.code(),
            converted = resolved.converted,
            "message language resolved"
        );

        let converted = if resolved.converted && self.announce_conversion {
            Some(resolved.text.clone())
        } else {
            None
        };

        // Cache is keyed by the canonical (normalized) text.
        if self.cache_enabled {
            if let Some(cached) = self.cache.get(&resolved.text) {
                info!(%user_id, "reply served from cache");
                self.record(user_id, text, &cached);
                return ChatReply { converted, text: cached, language, cached: true };
            }
        }

        let system = self.prompts.get(language);
        let window = self.history.window(user_id, self.max_context);
        let request = CompletionRequest {
            system,
            history: &window,
            content: &resolved.text,
        };

        let (reply, failed) = match self.provider.complete(request).await {
            Ok(answer) => (answer, false),
            Err(e) => {
                warn!(%user_id, error = %e, "provider failed, sending fallback reply");
                (fallback_reply(language).to_string(), true)
            }
        };

        if self.cache_enabled && !failed {
            self.cache.set(&resolved.text, reply.clone());
        }
        self.record(user_id, text, &reply);

        ChatReply { converted, text: reply, language, cached: false }
    }

    /// Append to history (the original, un-normalized text) and run the
    /// periodic cache sweep.
    fn record(&self, user_id: &str, user_text: &str, reply: &str) {
        let total = self.history.append(user_id, user_text.to_string(), reply.to_string());
        if total % CACHE_SWEEP_EVERY == 0 {
            let cleared = self.cache.clear_expired();
            if cleared > 0 {
                debug!(cleared, "expired cache entries swept");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::TranslitTables;
    use crate::llm::providers::dummy::DummyProvider;

    fn pipeline() -> ChatPipeline {
        let config = Config::test_default();
        ChatPipeline::new(
            &config,
            LanguagePipeline::new(TranslitTables::load(None)),
            LlmProvider::Dummy(DummyProvider),
            PromptSet::embedded(),
        )
    }

    #[tokio::test]
    async fn translit_message_is_normalized_and_announced() {
        let p = pipeline();
        let reply = p.handle("u1", "barev vonc es").await;
        assert_eq!(reply.language, Language::Armenian);
        let converted = reply.converted.expect("conversion should be announced");
        assert!(converted.contains("բարև"));
        // The provider saw the normalized text, not the translit original.
        assert!(reply.text.starts_with("[echo] "));
        assert!(reply.text.contains("բարև"));
    }

    #[tokio::test]
    async fn english_message_passes_through() {
        let p = pipeline();
        let reply = p.handle("u1", "hello how are you").await;
        assert_eq!(reply.language, Language::English);
        assert_eq!(reply.converted, None);
        assert_eq!(reply.text, "[echo] hello how are you");
        assert!(!reply.cached);
    }

    #[tokio::test]
    async fn repeat_message_hits_cache() {
        let p = pipeline();
        let first = p.handle("u1", "hello").await;
        assert!(!first.cached);
        let second = p.handle("u2", "hello").await;
        assert!(second.cached);
        assert_eq!(second.text, first.text);
    }

    #[tokio::test]
    async fn translit_and_normalized_form_share_a_cache_entry() {
        let p = pipeline();
        let first = p.handle("u1", "barev").await;
        assert!(!first.cached);
        // Native-script resend of the same word resolves to the same key.
        let second = p.handle("u1", "բարև").await;
        assert!(second.cached);
    }

    #[tokio::test]
    async fn cache_disabled_always_invokes_provider() {
        let mut config = Config::test_default();
        config.cache.enabled = false;
        let p = ChatPipeline::new(
            &config,
            LanguagePipeline::new(TranslitTables::load(None)),
            LlmProvider::Dummy(DummyProvider),
            PromptSet::embedded(),
        );
        assert!(!p.handle("u1", "hello").await.cached);
        assert!(!p.handle("u1", "hello").await.cached);
    }

    #[tokio::test]
    async fn announce_disabled_suppresses_echo() {
        let mut config = Config::test_default();
        config.language.announce_conversion = false;
        let p = ChatPipeline::new(
            &config,
            LanguagePipeline::new(TranslitTables::load(None)),
            LlmProvider::Dummy(DummyProvider),
            PromptSet::embedded(),
        );
        let reply = p.handle("u1", "barev vonc es").await;
        assert_eq!(reply.converted, None);
    }

    #[tokio::test]
    async fn history_window_feeds_subsequent_requests() {
        let p = pipeline();
        p.handle("u1", "first").await;
        p.handle("u1", "second").await;
        let window = p.history.window("u1", 5);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].0, "first");
    }

    #[tokio::test]
    async fn provider_failure_yields_language_fallback() {
        let mut config = Config::test_default();
        config.llm.provider = "openai".into();
        // Unroutable endpoint — the request fails at transport level.
        config.llm.openai.api_base_url = "http://127.0.0.1:0/v1/chat/completions".into();
        let provider = crate::llm::providers::build(&config.llm, None).unwrap();
        let p = ChatPipeline::new(
            &config,
            LanguagePipeline::new(TranslitTables::load(None)),
            provider,
            PromptSet::embedded(),
        );
        let reply = p.handle("u1", "привет").await;
        assert_eq!(reply.text, fallback_reply(Language::Russian));
        assert!(!reply.cached);
        // Failures are not cached.
        assert!(p.cache.is_empty());
    }
}
