//! Aragil Bot — entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Load language tables (degrading to embedded defaults)
//!   5. Build the LLM provider and chat pipeline
//!   6. Spawn comms channels and run the supervisor loop

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use aragil_bot::config;
use aragil_bot::error::AppError;
use aragil_bot::lang::{LanguagePipeline, TranslitTables};
use aragil_bot::llm::providers;
use aragil_bot::logger;
use aragil_bot::subsystems::chat::ChatPipeline;
use aragil_bot::subsystems::prompts::PromptSet;
use aragil_bot::supervisor::{self, bus::SupervisorBus};

/// Bus depth — inbound messages waiting for the supervisor loop.
const BUS_BUFFER: usize = 64;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;
    logger::init(&config.log_level)?;

    info!(
        bot_name = %config.bot_name,
        log_level = %config.log_level,
        provider = %config.llm.provider,
        "config loaded"
    );

    let tables = TranslitTables::load(config.language.tables_path.as_deref());
    if tables.is_empty() {
        warn!("language tables empty — translit detection and normalization disabled");
    }
    let lang = LanguagePipeline::new(tables);

    let provider = providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Provider(e.to_string()))?;
    let prompts = PromptSet::load(Path::new("config/prompts"));

    let pipeline = Arc::new(ChatPipeline::new(&config, lang, provider, prompts));

    let SupervisorBus { comms_rx, comms_tx } = SupervisorBus::new(BUS_BUFFER);
    let shutdown = CancellationToken::new();

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("ctrl-c received, shutting down");
            shutdown.cancel();
        });
    }

    #[cfg(feature = "channel-pty")]
    if config.comms.pty_enabled {
        let tx = comms_tx.clone();
        let sd = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = aragil_bot::comms::pty::run(tx, sd).await {
                warn!(error = %e, "pty channel failed");
            }
        });
    }

    #[cfg(feature = "channel-telegram")]
    if config.comms.telegram_enabled {
        let tx = comms_tx.clone();
        let sd = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = aragil_bot::comms::telegram::run(tx, sd).await {
                warn!(error = %e, "telegram channel failed");
            }
        });
    }

    // The supervisor owns the receiving end; drop our sender so the loop can
    // exit once every channel is gone.
    drop(comms_tx);

    supervisor::run(pipeline, comms_rx, shutdown).await;
    Ok(())
}
