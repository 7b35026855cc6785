//! Telegram comms channel — receives messages via the Telegram API, sends
//! them to the supervisor, and replies back to the user.
//!
//! The converted-text echo (`📝 …`) goes out as its own message before the
//! reply, mirroring the console channel.

use std::env;

use teloxide::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::supervisor::bus::CommsMessage;
use super::send_message;

/// Telegram has a 4096 character limit per message. Chunk at 4000 to be safe.
const MAX_MESSAGE_LENGTH: usize = 4000;

pub async fn run(
    comms_tx: mpsc::Sender<CommsMessage>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let token = match env::var("TELEGRAM_BOT_TOKEN") {
        Ok(t) => t,
        Err(_) => {
            warn!("TELEGRAM_BOT_TOKEN not set, telegram channel exiting");
            return Ok(());
        }
    };

    info!("telegram channel starting");
    let bot = Bot::new(token);

    let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let comms_tx = comms_tx.clone();
        async move {
            if let Some(text) = msg.text() {
                let user_id = format!("tg:{}", msg.chat.id);
                debug!(%user_id, "telegram received message");

                match send_message(&comms_tx, &user_id, text.to_string()).await {
                    Ok(reply) => {
                        if let Some(converted) = &reply.converted {
                            if let Err(e) = bot.send_message(msg.chat.id, format!("📝 {converted}")).await {
                                warn!("failed to send conversion echo: {e}");
                            }
                        }
                        let mut text = reply.text;
                        if text.is_empty() {
                            text = "(empty response)".to_string();
                        }
                        let chars: Vec<char> = text.chars().collect();
                        for chunk in chars.chunks(MAX_MESSAGE_LENGTH) {
                            let chunk_str: String = chunk.iter().collect();
                            if let Err(e) = bot.send_message(msg.chat.id, chunk_str).await {
                                warn!("failed to send telegram reply: {e}");
                            }
                        }
                    }
                    Err(e) => {
                        warn!("send_message error: {e}");
                        let _ = bot.send_message(msg.chat.id, "Internal error processing message.").await;
                    }
                }
            }
            respond(())
        }
    });

    let mut dispatcher = Dispatcher::builder(bot, handler).build();

    tokio::select! {
        _ = dispatcher.dispatch() => {}
        _ = shutdown.cancelled() => {
            info!("telegram channel shutting down");
        }
    }
    Ok(())
}
