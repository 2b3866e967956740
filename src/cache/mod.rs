//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruTracker;
pub use stats::{hit_rate_percent, CacheStats};
pub use store::CacheStore;

/// Process-wide cache handle. `get` reorders LRU state, so lookups take the write lock.
pub type SharedCache = Arc<RwLock<CacheStore>>;
