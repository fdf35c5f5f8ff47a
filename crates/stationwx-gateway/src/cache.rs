//! Short-TTL in-memory cache for upstream responses.
//!
//! Entries are idempotent snapshots of read-only upstream state, so the
//! cache is deliberately simple: no per-key locking, last writer wins, and
//! stale entries are never swept. An entry past its TTL is ignored at read
//! time and overwritten by the next successful fetch.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default freshness window, sized against the upstream rate limit
/// (20 requests/minute).
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

/// Millisecond clock, injectable so tests can control expiry.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at_ms: i64,
    payload: Value,
}

/// Response cache keyed by a query's canonical string form.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { entries: Mutex::new(HashMap::new()), clock, ttl }
    }

    /// Return the cached payload if the entry is still fresh.
    pub fn get_fresh(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        let age_ms = self.clock.now_ms() - entry.fetched_at_ms;
        if age_ms < self.ttl.as_millis() as i64 {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Store a payload under `key`, overwriting any prior entry.
    pub fn store(&self, key: &str, payload: Value) {
        let entry = CacheEntry { fetched_at_ms: self.clock.now_ms(), payload };
        self.entries.lock().insert(key.to_string(), entry);
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock the tests advance by hand.
    #[derive(Default)]
    struct ManualClock(AtomicI64);

    impl ManualClock {
        fn advance_ms(&self, ms: i64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::new(DEFAULT_TTL, clock.clone());

        cache.store("/stations|", json!([{"id": "a"}]));
        clock.advance_ms(59_999);
        assert_eq!(cache.get_fresh("/stations|"), Some(json!([{"id": "a"}])));
    }

    #[test]
    fn test_stale_entry_is_ignored() {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::new(DEFAULT_TTL, clock.clone());

        cache.store("/stations|", json!([]));
        clock.advance_ms(60_000);
        assert_eq!(cache.get_fresh("/stations|"), None);
    }

    #[test]
    fn test_store_overwrites_and_refreshes() {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::new(DEFAULT_TTL, clock.clone());

        cache.store("k", json!(1));
        clock.advance_ms(70_000);
        cache.store("k", json!(2));
        assert_eq!(cache.get_fresh("k"), Some(json!(2)));
    }

    #[test]
    fn test_unknown_key_misses() {
        let cache = ResponseCache::default();
        assert_eq!(cache.get_fresh("nope"), None);
    }
}
