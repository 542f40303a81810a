//! Shared Cache Module
//!
//! Thread-safe handle over a `CacheStore`. One mutex guards the item store
//! and bucket index together so every operation applies to both atomically.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{
    current_timestamp_ms, CacheOptions, CacheStats, CacheStore, Timestamp, TtlSeconds,
};
use crate::error::{CacheError, Result};

// == Cache ==
/// Cloneable, thread-safe cache handle.
///
/// Clones share the same underlying store. The host owns the first handle and
/// passes clones to its collaborators.
pub struct Cache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache, failing with `InvalidArgument` on unusable
    /// options.
    pub fn new(options: CacheOptions) -> Result<Self> {
        Ok(Self::from_store(CacheStore::new(options)?))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Name the cache logs under.
    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }

    // == Operations ==
    /// See [`CacheStore::insert`].
    pub fn insert<T>(
        &self,
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

    /// See [`CacheStore::insert_at`].
    pub fn insert_at<T>(
        &self,
        key: impl Into<String>,
        value: impl Into<Arc<V>>,
        ttl: T,
        now: Timestamp,
    ) -> Result<()>
    where
        T: TryInto<TtlSeconds>,
        CacheError: From<T::Error>,
    {
        // Validate and allocate outside the lock
        let ttl: TtlSeconds = ttl.try_into()?;
        let key: String = key.into();
        let value: Arc<V> = value.into();
        self.inner.lock().insert_ttl(key, value, ttl, now)
    }

    // == Get ==
    /// See [`CacheStore::get`].
    pub fn get(&self, key: &str) -> Result<Arc<V>> {
        self.get_at(key, current_timestamp_ms())
    }

    /// See [`CacheStore::get_at`].
    pub fn get_at(&self, key: &str, now: Timestamp) -> Result<Arc<V>> {
        self.inner.lock().get_at(key, now)
    }

    // == Remove ==
    /// See [`CacheStore::remove`].
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.remove_at(key, current_timestamp_ms())
    }

    /// See [`CacheStore::remove_at`].
    pub fn remove_at(&self, key: &str, now: Timestamp) -> Result<bool> {
        self.inner.lock().remove_at(key, now)
    }

    // == Sweep ==
    /// Evicts every entry expired at `now`.
    ///
    /// The lock is taken once per bucket and released in between, bounding
    /// how long readers wait behind a large sweep.
    pub fn sweep(&self, now: Timestamp) -> usize {
        let ttls = self.inner.lock().bucket_ttls();
        ttls.into_iter()
            .map(|ttl_ms| self.inner.lock().sweep_bucket(ttl_ms, now))
            .sum()
    }

    // == Inspection ==
    /// TTLs, in milliseconds, that currently have a non-empty bucket.
    pub fn bucket_ttls(&self) -> Vec<u64> {
        self.inner.lock().bucket_ttls()
    }

    /// Keys in the `ttl_ms` bucket, oldest first.
    pub fn bucket_keys(&self, ttl_ms: u64) -> Vec<String> {
        self.inner.lock().bucket_keys(ttl_ms)
    }

    /// Every stored key, expired-but-unswept included.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
