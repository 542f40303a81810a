//! Cache Store Module
//!
//! Main cache engine combining the item store with the TTL bucket index and
//! the sweep that evicts expired entries.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::cache::{
    current_timestamp_ms, CacheEntry, CacheOptions, CacheStats, ItemStore, Timestamp,
    TtlBucketIndex, TtlSeconds,
};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Single-owner cache storage with TTL bucketing.
///
/// Every method keeps the item store and bucket index in step: an entry is
/// never present in one without its counterpart in the other.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Name carried by log events
    name: String,
    /// Key-value storage
    items: ItemStore<V>,
    /// Keys grouped by TTL, oldest first
    buckets: TtlBucketIndex,
    /// Activity statistics
    stats: CacheStats,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store after validating `options`.
    pub fn new(options: CacheOptions) -> Result<Self> {
        options.validate()?;
        debug!(cache = %options.name, "cache created");

        Ok(Self {
            name: options.name,
            items: ItemStore::new(),
            buckets: TtlBucketIndex::new(),
            stats: CacheStats::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Insert ==
    /// Stores `value` under `key` for `ttl` seconds from now.
    ///
    /// Re-inserting a key replaces its value and TTL and moves it to the tail
    /// of its (possibly different) TTL bucket.
    pub fn insert<T>(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Arc<V>>,
        ttl: T,
    ) -> Result<()>
    where
        T: TryInto<TtlSeconds>,
        CacheError: From<T::Error>,
    {
        self.insert_at(key, value, ttl, current_timestamp_ms())
    }

    /// Stores `value` under `key` as if inserted at `now`.
    ///
    /// Validation happens before any mutation, so a rejected TTL leaves the
    /// store exactly as it was.
    pub fn insert_at<T>(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Arc<V>>,
        ttl: T,
        now: Timestamp,
    ) -> Result<()>
    where
        T: TryInto<TtlSeconds>,
        CacheError: From<T::Error>,
    {
        let ttl: TtlSeconds = ttl.try_into()?;
        self.insert_ttl(key.into(), value.into(), ttl, now)
    }

    /// Stores an already-validated entry. Shared by the generic insert paths
    /// so none of them re-enters a `TryInto` bound with a different error type.
    pub(crate) fn insert_ttl(
        &mut self,
        key: String,
        value: Arc<V>,
        ttl: TtlSeconds,
        now: Timestamp,
    ) -> Result<()> {
        let ttl_ms = ttl.as_millis();

        let entry = CacheEntry::new(key.clone(), value, ttl_ms, now);
        let expires_at = entry.expires_at();

        if let Some(previous) = self.items.put(entry) {
            trace!(
                cache = %self.name,
                key = %key,
                previous_ttl_ms = previous.ttl_ms,
                "overwriting entry"
            );
        }

        if !self.buckets.add_or_move(&key, ttl_ms, expires_at) {
            warn!(
                cache = %self.name,
                key = %key,
                ttl_ms,
                expires_at,
                "insert time precedes bucket tail, placed in expiry order"
            );
        }

        self.stats.record_insert();
        trace!(cache = %self.name, key = %key, ttl_ms, expires_at, "inserted entry");
        Ok(())
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// The returned `Arc` points at the same allocation that was inserted.
    pub fn get(&mut self, key: &str) -> Result<Arc<V>> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Retrieves the value stored under `key` as seen at `now`.
    ///
    /// Entries past their expiry read as `NotFound` whether or not a sweep
    /// has evicted them yet.
    pub fn get_at(&mut self, key: &str, now: Timestamp) -> Result<Arc<V>> {
        match self.items.get_live(key, now) {
            Some(entry) => {
                let value = Arc::clone(&entry.value);
                self.stats.record_hit();
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                trace!(cache = %self.name, key = %key, "cache miss");
                Err(CacheError::NotFound)
            }
        }
    }

    // == Remove ==
    /// Removes `key`, returning `true` when a live entry was deleted.
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        self.remove_at(key, current_timestamp_ms())
    }

    /// Removes `key` as seen at `now`.
    ///
    /// Absent and expired-but-unswept keys both yield `NotFound` and leave the
    /// store untouched; the sweep owns expired entries.
    pub fn remove_at(&mut self, key: &str, now: Timestamp) -> Result<bool> {
        if self.items.get_live(key, now).is_none() {
            return Err(CacheError::NotFound);
        }

        if let Some(entry) = self.items.delete(key) {
            self.buckets.remove(key, entry.ttl_ms);
        }
        self.stats.record_removal();
        trace!(cache = %self.name, key = %key, "removed entry");
        Ok(true)
    }

    // == Sweep ==
    /// Evicts every entry expired at `now`, returning how many were evicted.
    pub fn sweep(&mut self, now: Timestamp) -> usize {
        self.buckets
            .ttls()
            .into_iter()
            .map(|ttl_ms| self.sweep_bucket(ttl_ms, now))
            .sum()
    }

    /// Evicts expired entries from a single TTL bucket.
    ///
    /// Work is proportional to the number of evicted entries: the scan ends
    /// at the first head that is still live.
    pub fn sweep_bucket(&mut self, ttl_ms: u64, now: Timestamp) -> usize {
        let expired = self.buckets.pop_expired(ttl_ms, now);

        for key in &expired {
            let removed = self.items.delete(key);
            debug_assert!(
                removed.is_some_and(|e| e.ttl_ms == ttl_ms && e.is_expired_at(now)),
                "bucket slot for '{}' out of step with item store",
                key
            );
        }

        if !expired.is_empty() {
            self.stats.record_expirations(expired.len());
            debug!(
                cache = %self.name,
                ttl_ms,
                evicted = expired.len(),
                remaining = self.buckets.bucket_len(ttl_ms),
                "swept bucket"
            );
        }
        expired.len()
    }

    // == Inspection ==
    /// TTLs, in milliseconds, that currently have a non-empty bucket.
    pub fn bucket_ttls(&self) -> Vec<u64> {
        self.buckets.ttls()
    }

    /// Keys in the `ttl_ms` bucket, oldest first.
    pub fn bucket_keys(&self, ttl_ms: u64) -> Vec<String> {
        self.buckets.keys(ttl_ms).map(str::to_string).collect()
    }

    /// Every stored key, expired-but-unswept included.
    pub fn keys(&self) -> Vec<String> {
        self.items.keys().map(str::to_string).collect()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_sizes(self.items.len(), self.buckets.bucket_count());
        stats
    }

    /// Returns the number of stored entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
