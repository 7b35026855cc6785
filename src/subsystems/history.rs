//! Per-user rolling conversation history.
//!
//! Each user gets a capped FIFO of (user, bot) exchanges; the chat pipeline
//! sends the last N of them to the provider as context. In-memory only — the
//! persistence transport is a collaborator concern, not designed here.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// One user/bot exchange.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: String,
    pub bot: String,
    pub timestamp: DateTime<Utc>,
}

struct UserLog {
    exchanges: VecDeque<Exchange>,
    /// Total messages ever seen from this user (not capped).
    total: u64,
}

/// Rolling history keyed by user id, safe to share behind `Arc`.
pub struct ConversationHistory {
    logs: Mutex<HashMap<String, UserLog>>,
    cap: usize,
}

impl ConversationHistory {
    /// `cap` bounds the exchanges retained per user (FIFO eviction).
    pub fn new(cap: usize) -> Self {
        Self { logs: Mutex::new(HashMap::new()), cap }
    }

    /// Record an exchange, returning the user's total message count so far.
    pub fn append(&self, user_id: &str, user: String, bot: String) -> u64 {
        let mut logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        let log = logs.entry(user_id.to_string()).or_insert_with(|| UserLog {
            exchanges: VecDeque::new(),
            total: 0,
        });
        log.exchanges.push_back(Exchange { user, bot, timestamp: Utc::now() });
        while log.exchanges.len() > self.cap {
            log.exchanges.pop_front();
        }
        log.total += 1;
        log.total
    }

    /// The last `n` exchanges for `user_id`, oldest first, as (user, bot)
    /// pairs ready for a [`crate::llm::CompletionRequest`].
    pub fn window(&self, user_id: &str, n: usize) -> Vec<(String, String)> {
        let logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        match logs.get(user_id) {
            Some(log) => log
                .exchanges
                .iter()
                .rev()
                .take(n)
                .rev()
                .map(|e| (e.user.clone(), e.bot.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Total messages ever recorded for `user_id`.
    pub fn message_count(&self, user_id: &str) -> u64 {
        let logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        logs.get(user_id).map(|l| l.total).unwrap_or(0)
    }
}
