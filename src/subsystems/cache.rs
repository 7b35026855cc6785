//! Response cache — in-memory TTL cache over normalized message text.
//!
//! Keys are SHA-256 digests of the lower-cased, trimmed canonical text, so a
//! translit message and its re-sent normalized form hit the same entry.
//! Expired entries are dropped lazily on `get` and in bulk by
//! [`ResponseCache::clear_expired`], which the chat pipeline runs
//! periodically.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory TTL cache, safe to share behind `Arc`.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_seconds as i64),
        }
    }

    fn key(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.trim().to_lowercase().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Look up a cached reply for `text`. Expired entries are removed.
    pub fn get(&self, text: &str) -> Option<String> {
        let key = Self::key(text);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(&key) {
            Some(entry) if entry.expires_at > Utc::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a reply for `text` under the configured TTL.
    pub fn set(&self, text: &str, value: String) {
        let key = Self::key(text);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, CacheEntry { value, expires_at: Utc::now() + self.ttl });
    }

    /// Drop all expired entries, returning how many were removed.
    pub fn clear_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trip() {
        let cache = ResponseCache::new(3600);
        cache.set("barev", "բարև քեզ".into());
        assert_eq!(cache.get("barev"), Some("բարև քեզ".into()));
    }

    #[test]
    fn key_normalises_case_and_whitespace() {
        let cache = ResponseCache::new(3600);
        cache.set("Barev dzez", "reply".into());
        assert_eq!(cache.get("  barev dzez  "), Some("reply".into()));
    }

    #[test]
    fn miss_returns_none() {
        let cache = ResponseCache::new(3600);
        assert_eq!(cache.get("nothing"), None);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let cache = ResponseCache::new(0);
        cache.set("q", "a".into());
        assert_eq!(cache.get("q"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_expired_sweeps_only_stale_entries() {
        let cache = ResponseCache::new(0);
        cache.set("old", "a".into());
        let fresh = ResponseCache::new(3600);
        fresh.set("new", "b".into());
        assert_eq!(cache.clear_expired(), 1);
        assert_eq!(fresh.clear_expired(), 0);
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn distinct_texts_do_not_collide() {
        let cache = ResponseCache::new(3600);
        cache.set("a", "1".into());
        cache.set("b", "2".into());
        assert_eq!(cache.get("a"), Some("1".into()));
        assert_eq!(cache.get("b"), Some("2".into()));
    }
}
