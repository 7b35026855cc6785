//! Supervisor — drains the comms bus and answers through the chat pipeline.
//!
//! Each message is resolved in a spawned task; the supervisor loop is never
//! blocked on provider I/O. Channels that drop their reply receiver are
//! tolerated (the user went away).

pub mod bus;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::subsystems::chat::ChatPipeline;
use self::bus::CommsMessage;

/// Run the supervisor loop until `shutdown` fires or all senders are gone.
pub async fn run(
    pipeline: Arc<ChatPipeline>,
    mut comms_rx: mpsc::Receiver<CommsMessage>,
    shutdown: CancellationToken,
) {
    info!("supervisor loop started");
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("supervisor shutting down");
                break;
            }
            msg = comms_rx.recv() => {
                let Some(CommsMessage { user_id, content, reply_tx }) = msg else {
                    debug!("all comms senders dropped, supervisor exiting");
                    break;
                };
                let pipeline = pipeline.clone();
                tokio::spawn(async move {
                    let reply = pipeline.handle(&user_id, &content).await;
                    let _ = reply_tx.send(reply);
                });
            }
        }
    }
}
