//! Cache Entry Module
//!
//! A stored upstream payload together with its insertion time and TTL.

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Entries are never mutated after construction; writing the same key again
/// replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Time-to-live in seconds
    pub ttl_secs: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now_ms`.
    pub fn new(value: V, now_ms: u64, ttl_secs: u64) -> Self {
        Self {
            value,
            inserted_at: now_ms,
            ttl_secs,
        }
    }

    /// Timestamp (Unix milliseconds) from which the entry is no longer visible.
    pub fn expires_at(&self) -> u64 {
        self.inserted_at
            .saturating_add(self.ttl_secs.saturating_mul(1000))
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is visible only while `now < inserted_at + ttl`, so it is
    /// expired from the exact instant the TTL has fully elapsed.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, zero once expired.
    #[cfg(test)]
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at().saturating_sub(now_ms)
    }
}
