//! TTL Sweep Task
//!
//! Background task that periodically drops expired cache entries. Reads
//! already ignore expired entries, so this only bounds memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that sweeps expired entries every
/// `cleanup_interval_secs` seconds.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(state.cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "TTL sweep: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, ManualClock};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn shared_cache(clock: Arc<ManualClock>) -> SharedCache {
        Arc::new(RwLock::new(CacheStore::with_clock(100, clock)))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let cache = shared_cache(clock.clone());

        cache
            .write()
            .await
            .set("coinlist".to_string(), json!([]), 1);
        clock.advance(Duration::from_secs(2));

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.read().await.is_empty(), "expired entry should be swept");
        assert_eq!(cache.read().await.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let cache = shared_cache(clock);

        cache
            .write()
            .await
            .set("coinlist".to_string(), json!(["btc"]), 3600);

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.write().await.get("coinlist"), Some(json!(["btc"])));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = shared_cache(Arc::new(ManualClock::new(0)));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
