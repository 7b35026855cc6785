//! PTY (console) comms channel — reads lines from stdin, sends to supervisor,
//! prints the reply to stdout.
//!
//! Runs until the `shutdown` token is cancelled (Ctrl-C) or stdin is closed.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::AppError;
use crate::supervisor::bus::CommsMessage;
use super::send_message;

const CHANNEL_ID: &str = "console";

pub async fn run(
    comms_tx: mpsc::Sender<CommsMessage>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    info!(channel_id = CHANNEL_ID, "pty channel started — type a message and press Enter. Ctrl-C to quit.");
    println!("─────────────────────────────────");
    println!(" Aragil console  (Ctrl-C to quit)");
    println!("─────────────────────────────────");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!(channel_id = CHANNEL_ID, "pty channel shutting down");
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!(channel_id = CHANNEL_ID, "stdin closed, pty channel exiting");
                    return Ok(());
                };
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                match send_message(&comms_tx, CHANNEL_ID, text.to_string()).await {
                    Ok(reply) => {
                        if let Some(converted) = &reply.converted {
                            println!("📝 {converted}");
                        }
                        println!("{}", reply.text);
                    }
                    Err(e) => {
                        warn!(error = %e, "send_message failed");
                        return Ok(());
                    }
                }
            }
        }
    }
}
