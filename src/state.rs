//! Application State
//!
//! Composition root for the process-wide cache and monitor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cache::{CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::memo::Memoizer;
use crate::monitor::{MonitorStats, OperationMonitor, SharedMonitor};
use crate::tasks::spawn_cleanup_task;

/// Shared cache and monitor, constructed once and passed to whoever needs them.
///
/// Cloning is cheap; every clone refers to the same underlying state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// Thread-safe operation monitor
    pub monitor: SharedMonitor,
}

impl AppState {
    /// Creates a new AppState from already constructed parts.
    pub fn new(cache: CacheStore, monitor: OperationMonitor) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            monitor: Arc::new(RwLock::new(monitor)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CacheStore::new(config.max_entries, config.default_ttl),
            OperationMonitor::new(config.max_metrics, config.slowest_limit),
        )
    }

    /// Returns a memoizer bound to this state's cache and monitor.
    pub fn memoizer(&self) -> Memoizer {
        Memoizer::new(self.cache.clone(), self.monitor.clone())
    }

    /// Starts the TTL sweep if `config.cleanup_interval` is non-zero.
    pub fn spawn_cleanup(&self, config: &Config) -> Option<JoinHandle<()>> {
        (config.cleanup_interval > 0).then(|| {
            spawn_cleanup_task(
                self.cache.clone(),
                Duration::from_secs(config.cleanup_interval),
            )
        })
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    pub async fn monitor_stats(&self) -> MonitorStats {
        self.monitor.read().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::CallArgs;

    #[tokio::test]
    async fn test_from_config() {
        let config = Config {
            max_entries: 2,
            ..Config::default()
        };
        let state = AppState::from_config(&config);

        let stats = state.cache_stats().await;
        assert_eq!(stats.capacity, 2);
        assert_eq!(stats.size, 0);
        assert_eq!(state.monitor_stats().await, MonitorStats::default());
    }

    #[tokio::test]
    async fn test_memoizers_share_state() {
        let state = AppState::from_config(&Config::default());
        let args = CallArgs::new().arg(7);

        state
            .memoizer()
            .memoize("f", &args, 60, || async { Ok::<_, anyhow::Error>(49) })
            .await
            .unwrap();
        let cached: u32 = state
            .clone()
            .memoizer()
            .memoize("f", &args, 60, || async { Ok::<_, anyhow::Error>(0) })
            .await
            .unwrap();

        assert_eq!(cached, 49);
        assert_eq!(state.monitor_stats().await.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_cleanup_disabled_with_zero_interval() {
        let state = AppState::from_config(&Config::default());
        let config = Config {
            cleanup_interval: 0,
            ..Config::default()
        };

        assert!(state.spawn_cleanup(&config).is_none());

        let handle = state.spawn_cleanup(&Config::default()).unwrap();
        handle.abort();
    }
}
