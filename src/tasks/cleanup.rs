//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries so they
//! stop occupying capacity before a lookup or eviction finds them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The write lock is held only for the duration of one sweep. Abort the
/// returned handle to stop the task.
///
/// # Example
/// ```ignore
/// let handle = spawn_cleanup_task(state.cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn shared_cache() -> SharedCache {
        Arc::new(RwLock::new(CacheStore::new(100, 300)))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = shared_cache();
        cache.write().await.set("expire_soon".to_string(), json!("value"), Some(1));

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(200));

        // Wait for entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(1600)).await;

        // Removed without any lookup touching it
        assert_eq!(cache.read().await.len(), 0);
        assert_eq!(cache.read().await.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = shared_cache();
        cache.write().await.set("long_lived".to_string(), json!("value"), Some(3600));

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(cache.write().await.get("long_lived"), Some(json!("value")));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(shared_cache(), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
