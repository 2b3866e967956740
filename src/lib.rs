//! Memo Telemetry - In-process memoization with operation telemetry
//!
//! Serves repeated computations from a bounded cache with TTL expiration and
//! LRU eviction, and records per-operation duration, outcome and cache usage.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod memo;
pub mod monitor;
pub mod state;
pub mod tasks;

pub use cache::{CacheStats, CacheStore, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use memo::{ArgValue, CacheKey, CallArgs, Memoizer};
pub use monitor::{
    track, CacheOutcome, MonitorStats, OperationMetric, OperationMonitor, SharedMonitor,
};
pub use state::AppState;
pub use tasks::spawn_cleanup_task;
