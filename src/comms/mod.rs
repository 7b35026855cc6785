//! Comms channels — user-facing transports feeding the supervisor bus.

#[cfg(feature = "channel-pty")]
pub mod pty;
#[cfg(feature = "channel-telegram")]
pub mod telegram;

use tokio::sync::{mpsc, oneshot};

use crate::error::AppError;
use crate::subsystems::chat::ChatReply;
use crate::supervisor::bus::CommsMessage;

/// Submit one message to the supervisor and wait for the reply.
pub async fn send_message(
    comms_tx: &mpsc::Sender<CommsMessage>,
    user_id: &str,
    content: String,
) -> Result<ChatReply, AppError> {
    let (reply_tx, reply_rx) = oneshot::channel();
    comms_tx
        .send(CommsMessage { user_id: user_id.to_string(), content, reply_tx })
        .await
        .map_err(|_| AppError::Comms("supervisor bus closed".into()))?;
    reply_rx
        .await
        .map_err(|_| AppError::Comms("supervisor dropped the reply".into()))
}
