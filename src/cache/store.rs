//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key/value store with LRU eviction and per-entry TTL.
///
/// Holds at most `max_entries` entries after every mutating call. Payloads are
/// opaque JSON values; the store never inspects them.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Cumulative counters, not reset by `clear`
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// A capacity of zero is valid and turns the store into a pass-through:
    /// every insert is evicted again before `set` returns.
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            counters: CacheCounters::default(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry and resetting its TTL.
    ///
    /// If the insert pushes the store past capacity, exactly one entry, the
    /// least recently used, is evicted.
    pub fn set(&mut self, key: String, value: Value, ttl: Option<u64>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        debug!(key = %key, ttl, "cache set");

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, ttl));

        if self.entries.len() > self.max_entries {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.counters.evictions += 1;
                debug!(key = %evicted_key, "evicted LRU entry");
            }
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired. Expired entries are
    /// removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let Some(entry) = self.entries.get_mut(key) else {
            self.counters.misses += 1;
            return None;
        };

        if entry.is_expired() {
            self.entries.remove(key);
            self.lru.remove(key);
            self.counters.expirations += 1;
            self.counters.misses += 1;
            debug!(key = %key, "cache entry expired");
            return None;
        }

        let value = entry.access();
        self.counters.hits += 1;
        self.lru.touch(key);
        Some(value)
    }

    // == Remove ==
    /// Removes an entry by key, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes all entries. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len(), self.max_entries)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.counters.expirations += expired_keys.len() as u64;
        expired_keys.len()
    }

    /// Returns true if the key is stored, expired or not. Does not touch LRU order.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Length ==
    /// Returns the current number of entries, including not-yet-discovered expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
