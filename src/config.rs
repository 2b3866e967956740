//! Configuration Module
//!
//! Handles loading cache and monitor settings from environment variables.

use std::env;

/// Memoization and telemetry configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// Maximum number of metrics retained by the monitor
    pub max_metrics: usize,
    /// Number of slowest operations reported in monitor stats
    pub slowest_limit: usize,
    /// Background cleanup task interval in seconds (0 disables the task)
    pub cleanup_interval: u64,
    /// TTL in seconds for schedule lookups
    pub schedule_ttl: u64,
    /// TTL in seconds for session data lookups
    pub session_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMO_MAX_ENTRIES` - Maximum cache entries (default: 500)
    /// - `MEMO_DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `MONITOR_MAX_METRICS` - Retained metrics (default: 1000)
    /// - `MONITOR_SLOWEST_LIMIT` - Slowest operations in stats (default: 3)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MEMO_MAX_ENTRIES", defaults.max_entries),
            default_ttl: env_or("MEMO_DEFAULT_TTL", defaults.default_ttl),
            max_metrics: env_or("MONITOR_MAX_METRICS", defaults.max_metrics),
            slowest_limit: env_or("MONITOR_SLOWEST_LIMIT", defaults.slowest_limit),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            ..defaults
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 500,
            default_ttl: 3600,
            max_metrics: 1000,
            slowest_limit: 3,
            cleanup_interval: 60,
            schedule_ttl: 3600,
            session_ttl: 7200,
        }
    }
}
