//! Message bus between the comms channels and the supervisor loop.

use tokio::sync::{mpsc, oneshot};

use crate::subsystems::chat::ChatReply;

/// One inbound user message plus the slot its reply travels back through.
pub struct CommsMessage {
    /// Stable per-user identifier (console session, Telegram chat id, …).
    pub user_id: String,
    /// Raw message text as the channel received it.
    pub content: String,
    /// The originating channel awaits the [`ChatReply`] here.
    pub reply_tx: oneshot::Sender<ChatReply>,
}

/// Channel ends created together at startup.
pub struct SupervisorBus {
    /// Receiving end, handed to the supervisor loop.
    pub comms_rx: mpsc::Receiver<CommsMessage>,
    /// Sender cloned into each comms channel.
    pub comms_tx: mpsc::Sender<CommsMessage>,
}

impl SupervisorBus {
    pub fn new(buffer: usize) -> Self {
        let (comms_tx, comms_rx) = mpsc::channel(buffer);
        Self { comms_rx, comms_tx }
    }
}
