//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance metrics.
///
/// Serializes to the `{size, capacity, hits, misses, hitRatePercent}` shape
/// consumed by reporting code, plus eviction and expiration counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// hits / (hits + misses) as a percentage, 0 when there were no lookups
    pub hit_rate_percent: f64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of entries removed because their TTL elapsed
    pub expirations: u64,
}

/// Cumulative counters owned by the store; survive `clear()`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheCounters {
    pub fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        CacheStats {
            size,
            capacity,
            hits: self.hits,
            misses: self.misses,
            hit_rate_percent: hit_rate_percent(self.hits, self.misses),
            evictions: self.evictions,
            expirations: self.expirations,
        }
    }
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns the hit rate as a fraction in `[0, 1]`.
    pub fn hit_rate(&self) -> f64 {
        self.hit_rate_percent / 100.0
    }
}

/// Computes hits / (hits + misses) * 100, or 0.0 if no lookups happened.
pub fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}
