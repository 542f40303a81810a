//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::Arc;

use chrono::Utc;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// The value is held behind an `Arc` so reads hand back the very allocation
/// passed at insertion.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// Key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: Arc<V>,
    /// TTL in milliseconds, fixed at insertion
    pub ttl_ms: u64,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: Timestamp,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry inserted at `now`.
    pub fn new(key: String, value: Arc<V>, ttl_ms: u64, now: Timestamp) -> Self {
        Self {
            key,
            value,
            ttl_ms,
            inserted_at: now,
        }
    }

    // == Expires At ==
    /// Absolute expiration time in Unix milliseconds.
    pub fn expires_at(&self) -> Timestamp {
        self.inserted_at.saturating_add(self.ttl_ms)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// reads and sweeps agree on the exact millisecond an entry dies.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> Timestamp {
    // Clamp pre-epoch clocks to zero
    Utc::now().timestamp_millis().max(0) as Timestamp
}
