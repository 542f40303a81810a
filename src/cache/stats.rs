//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, inserts, removals and sweep evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of inserts, overwrites included
    pub inserts: u64,
    /// Number of explicit removals that deleted an entry
    pub removals: u64,
    /// Number of entries evicted by sweeps
    pub expirations: u64,
    /// Current number of entries in the cache, expired-but-unswept included
    pub total_entries: usize,
    /// Current number of non-empty TTL buckets
    pub bucket_count: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insert ==
    /// Increments the insert counter.
    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    // == Record Removal ==
    /// Increments the removal counter.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    // == Record Expirations ==
    /// Adds `count` sweep evictions to the expiration counter.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Update Sizes ==
    /// Updates the entry and bucket gauges.
    pub fn set_sizes(&mut self, total_entries: usize, bucket_count: usize) {
        self.total_entries = total_entries;
        self.bucket_count = bucket_count;
    }
}
