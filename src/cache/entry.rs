//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time-to-live in seconds, measured from `created_at`
    pub ttl_seconds: u64,
    /// Last successful read (Unix milliseconds), initialised to `created_at`
    pub last_accessed_at: u64,
    /// Number of successful reads
    pub access_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` after now.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        Self::with_created_at(value, ttl_seconds, current_timestamp_ms())
    }

    /// Creates an entry with an explicit creation timestamp.
    pub fn with_created_at(value: Value, ttl_seconds: u64, now_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            ttl_seconds,
            last_accessed_at: now_ms,
            access_count: 0,
        }
    }

    /// Expiration timestamp (Unix milliseconds).
    pub fn expires_at(&self) -> u64 {
        self.created_at
            .saturating_add(self.ttl_seconds.saturating_mul(1000))
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `created_at + ttl`, so a TTL of zero is
    /// expired immediately. Expiry is absolute; reads do not extend it.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks expiry against a caller-supplied clock reading.
    ///
    /// The comparison is inclusive rather than a strict `>`: with
    /// millisecond timestamps a strict check would keep a zero-TTL entry
    /// readable for the rest of the millisecond it was written in.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at()
    }

    // == Access ==
    /// Records a successful read and returns the payload.
    pub fn access(&mut self) -> Value {
        self.access_count += 1;
        self.last_accessed_at = current_timestamp_ms();
        self.value.clone()
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at().saturating_sub(current_timestamp_ms())
    }

    /// Returns remaining TTL in whole seconds.
    pub fn ttl_remaining(&self) -> u64 {
        self.ttl_remaining_ms() / 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
