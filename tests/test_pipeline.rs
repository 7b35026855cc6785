//! End-to-end tests over the shipped language tables and the dummy provider.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use aragil_bot::lang::{Language, LanguagePipeline, TranslitTables};
use aragil_bot::llm::providers::dummy::DummyProvider;
use aragil_bot::llm::LlmProvider;
use aragil_bot::subsystems::chat::ChatPipeline;
use aragil_bot::subsystems::prompts::PromptSet;
use aragil_bot::supervisor::{self, bus::{CommsMessage, SupervisorBus}};

fn lang() -> LanguagePipeline {
    LanguagePipeline::new(TranslitTables::load(None))
}

// ── Classification over the shipped tables ───────────────────────────────────

#[test]
fn classify_native_armenian() {
    assert_eq!(lang().classify("Ինչպես ես"), Language::Armenian);
}

#[test]
fn classify_russian() {
    assert_eq!(lang().classify("привет как дела"), Language::Russian);
}

#[test]
fn classify_translit() {
    assert_eq!(lang().classify("barev vonc es"), Language::ArmenianTranslit);
}

#[test]
fn classify_english() {
    assert_eq!(lang().classify("hello how are you"), Language::English);
}

#[test]
fn classify_empty_is_english() {
    assert_eq!(lang().classify(""), Language::English);
}

#[test]
fn classify_mixed_scripts_prefers_armenian() {
    assert_eq!(lang().classify("hello Ինչ привет"), Language::Armenian);
}

// ── Normalization over the shipped tables ────────────────────────────────────

#[test]
fn normalize_substitutes_words_and_keeps_punctuation() {
    let r = lang().normalize("barev, vonc es?");
    assert!(r.changed);
    assert!(r.text.contains("բարև,"));
    assert!(r.text.contains("ո՞նց"));
    assert!(r.text.ends_with('?'));
}

#[test]
fn normalize_no_hits_is_byte_identical() {
    let r = lang().normalize("qwxyz123");
    assert_eq!(r.text, "qwxyz123");
    assert!(!r.changed);
}

#[test]
fn normalize_letter_fallback_uses_digraphs() {
    // Not in the word table; fully mappable through the letter table.
    let r = lang().normalize("khosh");
    assert!(r.changed);
    assert_eq!(r.text, "խոշ");
}

#[test]
fn normalize_is_idempotent() {
    let p = lang();
    let once = p.normalize("barev vonc es, shat lav");
    let twice = p.normalize(&once.text);
    assert_eq!(once.text, twice.text);
    assert!(!twice.changed);
}

#[test]
fn unchanged_flag_implies_identical_text() {
    let p = lang();
    for input in ["hello", "", "   ", "qwxyz123", "Ինչպես ես"] {
        let r = p.normalize(input);
        if !r.changed {
            assert_eq!(r.text, input);
        }
    }
}

// ── Full pipeline round-trip ─────────────────────────────────────────────────

fn chat() -> Arc<ChatPipeline> {
    let cfg = aragil_bot::config::load_from(std::path::Path::new("config/default.toml"), None)
        .expect("default config must parse");
    Arc::new(ChatPipeline::new(
        &cfg,
        lang(),
        LlmProvider::Dummy(DummyProvider),
        PromptSet::embedded(),
    ))
}

#[tokio::test]
async fn translit_round_trip_through_supervisor() {
    let SupervisorBus { comms_rx, comms_tx } = SupervisorBus::new(8);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(supervisor::run(chat(), comms_rx, shutdown.clone()));

    let (reply_tx, reply_rx) = oneshot::channel();
    comms_tx
        .send(CommsMessage {
            user_id: "tester".into(),
            content: "barev vonc es".into(),
            reply_tx,
        })
        .await
        .unwrap();

    let reply = reply_rx.await.unwrap();
    assert_eq!(reply.language, Language::Armenian);
    let converted = reply.converted.expect("conversion announced");
    assert!(converted.contains("բարև"));
    assert!(reply.text.starts_with("[echo] "));

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn cache_round_trip_across_users() {
    let pipeline = chat();
    let first = pipeline.handle("a", "hello there").await;
    assert!(!first.cached);
    let second = pipeline.handle("b", "Hello there").await;
    assert!(second.cached, "cache key is case-insensitive");
    assert_eq!(first.text, second.text);
}
