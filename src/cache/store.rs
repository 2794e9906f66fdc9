//! Cache Store Module
//!
//! Key-value storage with per-entry TTL, a capacity bound and LRU eviction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock};

// == Cache Store ==
/// In-memory store where each entry carries its own TTL.
///
/// Expiry is checked on read, so correctness never depends on the
/// background sweep. When `max_entries` is reached, expired entries are
/// purged first and then the least recently used live entry is evicted.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a store bounded to `max_entries`, reading the system clock.
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    /// Creates a store bounded to `max_entries` using the given clock.
    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            clock,
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_secs` seconds from now.
    ///
    /// Any existing entry for the key is replaced outright, including its
    /// insertion time and TTL. Keys of any length are accepted; memory is
    /// bounded by `max_entries` alone.
    pub fn set(&mut self, key: String, value: V, ttl_secs: u64) {
        let now = self.clock.now_ms();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.make_room(now);
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(value, now, ttl_secs));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` if it is present and not expired.
    ///
    /// Expired entries are left in place for the sweep; a miss only bumps
    /// the miss counter.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Remaining lifetime of a live entry in milliseconds.
    #[cfg(test)]
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.ttl_remaining_ms(now))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.purge_expired(now)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn make_room(&mut self, now: u64) {
        if self.purge_expired(now) > 0 && self.entries.len() < self.max_entries {
            return;
        }

        while self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }
    }

    fn purge_expired(&mut self, now: u64) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired.len());
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;
    use std::time::Duration;

    const T0: u64 = 1_700_000_000_000;

    fn store_with_clock(max_entries: usize) -> (CacheStore<serde_json::Value>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(T0));
        (CacheStore::with_clock(max_entries, clock.clone()), clock)
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with_clock(100);
        let value = json!({"bitcoin": {"usd": 64000.5}});

        store.set("prices:bitcoin:usd".to_string(), value.clone(), 300);

        assert_eq!(store.get("prices:bitcoin:usd"), Some(value));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with_clock(100);
        assert!(store.get("nonexistent").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let (mut store, clock) = store_with_clock(100);

        store.set("k".to_string(), json!(1), 10);
        clock.advance(Duration::from_secs(8));
        store.set("k".to_string(), json!(2), 10);
        clock.advance(Duration::from_secs(8));

        assert_eq!(store.get("k"), Some(json!(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration_boundary() {
        let (mut store, clock) = store_with_clock(100);
        store.set("k".to_string(), json!("v"), 300);

        clock.advance(Duration::from_millis(299_999));
        assert!(store.get("k").is_some());

        clock.advance(Duration::from_millis(1));
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_miss_on_expired_entry_leaves_store_untouched() {
        let (mut store, clock) = store_with_clock(100);
        store.set("k".to_string(), json!("v"), 1);
        clock.advance(Duration::from_secs(2));

        assert!(store.get("k").is_none());
        assert_eq!(store.len(), 1);
        assert!(store.ttl_remaining_ms("k").is_none());
    }

    #[test]
    fn test_store_independent_ttls() {
        let (mut store, clock) = store_with_clock(100);
        store.set("short".to_string(), json!(1), 300);
        store.set("long".to_string(), json!(2), 3600);

        clock.advance(Duration::from_secs(301));

        assert!(store.get("short").is_none());
        assert_eq!(store.get("long"), Some(json!(2)));
    }

    #[test]
    fn test_store_lru_eviction() {
        let (mut store, _) = store_with_clock(3);

        store.set("key1".to_string(), json!(1), 300);
        store.set("key2".to_string(), json!(2), 300);
        store.set("key3".to_string(), json!(3), 300);
        store.set("key4".to_string(), json!(4), 300);

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let (mut store, _) = store_with_clock(3);

        store.set("key1".to_string(), json!(1), 300);
        store.set("key2".to_string(), json!(2), 300);
        store.set("key3".to_string(), json!(3), 300);

        store.get("key1").unwrap();
        store.set("key4".to_string(), json!(4), 300);

        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
    }

    #[test]
    fn test_capacity_prefers_expired_over_live_entries() {
        let (mut store, clock) = store_with_clock(2);

        store.set("stale".to_string(), json!(1), 1);
        store.set("live".to_string(), json!(2), 3600);
        clock.advance(Duration::from_secs(5));
        store.set("fresh".to_string(), json!(3), 3600);

        let stats = store.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expirations, 1);
        assert!(store.get("live").is_some());
        assert!(store.get("fresh").is_some());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1".to_string(), json!(1), 1);
        store.set("key2".to_string(), json!(2), 10);
        clock.advance(Duration::from_secs(2));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_accepts_long_keys() {
        let (mut store, _) = store_with_clock(100);
        let ids: Vec<String> = (0..200).map(|i| format!("coin-number-{i}")).collect();
        let key = format!("prices:{}:usd", ids.join(","));
        assert!(key.len() > 2048);

        store.set(key.clone(), json!({"coin-number-0": {"usd": 1.0}}), 300);

        assert_eq!(store.get(&key), Some(json!({"coin-number-0": {"usd": 1.0}})));
        assert_eq!(store.len(), 1);
    }
}
