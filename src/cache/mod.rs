//! Cache Module
//!
//! In-memory response cache with per-entry TTL and LRU eviction.

mod clock;
mod entry;
pub mod keys;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Process-wide response cache shared by every request flow.
pub type SharedCache = Arc<RwLock<CacheStore<Value>>>;
