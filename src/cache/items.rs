//! Item Store Module
//!
//! Authoritative key to entry mapping.

use std::collections::HashMap;

use crate::cache::{CacheEntry, Timestamp};

// == Item Store ==
/// Key to entry storage with lazy expiration on read.
#[derive(Debug)]
pub struct ItemStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V> Default for ItemStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ItemStore<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Put ==
    /// Inserts or overwrites the entry for `entry.key`.
    ///
    /// Returns the replaced entry so the caller can clean up its bucket slot.
    pub fn put(&mut self, entry: CacheEntry<V>) -> Option<CacheEntry<V>> {
        self.entries.insert(entry.key.clone(), entry)
    }

    // == Get Live ==
    /// Returns the entry only while `now < expires_at`.
    ///
    /// Expired entries read as absent even though they stay in storage until
    /// the next sweep.
    pub fn get_live(&self, key: &str, now: Timestamp) -> Option<&CacheEntry<V>> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
    }

    // == Get ==
    /// Returns the entry regardless of expiration.
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Delete ==
    /// Removes the key unconditionally, returning the entry if one was present.
    pub fn delete(&mut self, key: &str) -> Option<CacheEntry<V>> {
        self.entries.remove(key)
    }

    // == Keys ==
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(key: &str, value: u32, ttl_ms: u64, now: Timestamp) -> CacheEntry<u32> {
        CacheEntry::new(key.to_string(), Arc::new(value), ttl_ms, now)
    }

    #[test]
    fn test_put_and_get_live() {
        let mut items = ItemStore::new();
        assert!(items.put(entry("a", 1, 1_000, 0)).is_none());

        let found = items.get_live("a", 500).unwrap();
        assert_eq!(*found.value, 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_put_returns_replaced_entry() {
        let mut items = ItemStore::new();
        items.put(entry("a", 1, 1_000, 0));

        let old = items.put(entry("a", 2, 5_000, 100)).unwrap();
        assert_eq!(*old.value, 1);
        assert_eq!(old.ttl_ms, 1_000);
        assert_eq!(*items.get("a").unwrap().value, 2);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_get_live_hides_expired_entry() {
        let mut items = ItemStore::new();
        items.put(entry("a", 1, 1_000, 0));

        assert!(items.get_live("a", 1_000).is_none());
        // Still physically present until swept
        assert!(items.get("a").is_some());
    }

    #[test]
    fn test_delete() {
        let mut items = ItemStore::new();
        items.put(entry("a", 1, 1_000, 0));

        assert!(items.delete("a").is_some());
        assert!(items.delete("a").is_none());
        assert!(items.is_empty());
    }
}
