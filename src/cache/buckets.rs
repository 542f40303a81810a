//! TTL Bucket Index Module
//!
//! Groups keys by their exact TTL so expiration sweeps only touch entries
//! that are actually due.

use std::collections::{HashMap, VecDeque};

use crate::cache::Timestamp;

// == Bucket Slot ==
#[derive(Debug, Clone, PartialEq, Eq)]
struct BucketSlot {
    key: String,
    expires_at: Timestamp,
}

// == TTL Bucket Index ==
/// Maps a TTL in milliseconds to the keys sharing it.
///
/// Each bucket is a VecDeque where:
/// - Front = Oldest insertion, earliest expiry
/// - Back = Newest insertion, latest expiry
///
/// Slots within a bucket are always in non-decreasing `expires_at` order, and
/// a key occupies at most one slot across the whole index.
#[derive(Debug, Default)]
pub struct TtlBucketIndex {
    /// Slots per TTL, oldest first
    buckets: HashMap<u64, VecDeque<BucketSlot>>,
    /// Which bucket each key currently lives in
    locations: HashMap<String, u64>,
}

impl TtlBucketIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Add Or Move ==
    /// Places `key` at the tail of the `ttl_ms` bucket, first dropping any
    /// slot it held in this or another bucket.
    ///
    /// Returns `false` when the slot could not go at the tail because its
    /// expiry precedes the current tail's (an injected or backwards-stepping
    /// clock); the slot is then placed at its ordered position instead.
    pub fn add_or_move(&mut self, key: &str, ttl_ms: u64, expires_at: Timestamp) -> bool {
        if let Some(previous_ttl) = self.locations.get(key).copied() {
            self.remove(key, previous_ttl);
        }

        let bucket = self.buckets.entry(ttl_ms).or_default();
        let slot = BucketSlot {
            key: key.to_string(),
            expires_at,
        };

        let in_order = bucket
            .back()
            .map_or(true, |tail| tail.expires_at <= expires_at);
        if in_order {
            bucket.push_back(slot);
        } else {
            let at = bucket.partition_point(|s| s.expires_at <= expires_at);
            bucket.insert(at, slot);
        }

        self.locations.insert(key.to_string(), ttl_ms);
        in_order
    }

    // == Remove ==
    /// Removes `key` from the `ttl_ms` bucket if it is there.
    ///
    /// Buckets left empty are pruned.
    pub fn remove(&mut self, key: &str, ttl_ms: u64) -> bool {
        if self.locations.get(key) != Some(&ttl_ms) {
            return false;
        }
        self.locations.remove(key);

        let Some(bucket) = self.buckets.get_mut(&ttl_ms) else {
            return false;
        };
        let removed = match bucket.iter().position(|s| s.key == key) {
            Some(at) => bucket.remove(at).is_some(),
            None => false,
        };
        if bucket.is_empty() {
            self.buckets.remove(&ttl_ms);
        }
        removed
    }

    // == Pop Expired ==
    /// Pops slots from the head of the `ttl_ms` bucket while they expire at or
    /// before `now`, returning their keys oldest first.
    ///
    /// Stops at the first live head: everything behind it expires later.
    pub fn pop_expired(&mut self, ttl_ms: u64, now: Timestamp) -> Vec<String> {
        let mut expired = Vec::new();
        let Some(bucket) = self.buckets.get_mut(&ttl_ms) else {
            return expired;
        };

        while bucket.front().is_some_and(|head| head.expires_at <= now) {
            if let Some(slot) = bucket.pop_front() {
                self.locations.remove(&slot.key);
                expired.push(slot.key);
            }
        }

        if bucket.is_empty() {
            self.buckets.remove(&ttl_ms);
        }
        expired
    }

    // == Inspection ==
    /// TTLs that currently have a non-empty bucket.
    pub fn ttls(&self) -> Vec<u64> {
        self.buckets.keys().copied().collect()
    }

    /// Keys of the `ttl_ms` bucket, oldest first. Absent buckets read as empty.
    pub fn keys(&self, ttl_ms: u64) -> impl Iterator<Item = &str> {
        self.buckets
            .get(&ttl_ms)
            .into_iter()
            .flatten()
            .map(|s| s.key.as_str())
    }

    /// Number of keys in the `ttl_ms` bucket.
    pub fn bucket_len(&self, ttl_ms: u64) -> usize {
        self.buckets.get(&ttl_ms).map_or(0, VecDeque::len)
    }

    /// TTL bucket currently holding `key`.
    #[cfg(test)]
    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.locations.get(key).copied()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.locations.contains_key(key)
    }

    /// Total number of slots across all buckets.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(index: &TtlBucketIndex, ttl_ms: u64) -> Vec<&str> {
        index.keys(ttl_ms).collect()
    }

    #[test]
    fn test_index_new() {
        let index = TtlBucketIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.bucket_count(), 0);
        assert_eq!(index.bucket_len(10_000), 0);
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut index = TtlBucketIndex::new();

        assert!(index.add_or_move("a", 10_000, 10_000));
        assert!(index.add_or_move("b", 10_000, 12_000));
        assert!(index.add_or_move("c", 10_000, 15_000));

        assert_eq!(keys(&index, 10_000), vec!["a", "b", "c"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_add_same_key_keeps_single_slot_at_tail() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("a", 10_000, 10_000);
        index.add_or_move("dummy", 10_000, 10_001);
        index.add_or_move("b", 10_000, 10_002);
        index.add_or_move("dummy", 10_000, 10_003);

        assert_eq!(keys(&index, 10_000), vec!["a", "b", "dummy"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_add_with_new_ttl_moves_between_buckets() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("a", 10_000, 10_000);
        index.add_or_move("a", 5_000, 6_000);

        assert_eq!(index.bucket_len(10_000), 0);
        assert_eq!(keys(&index, 5_000), vec!["a"]);
        assert_eq!(index.ttl_of("a"), Some(5_000));
        // Empty source bucket is pruned
        assert_eq!(index.bucket_count(), 1);
    }

    #[test]
    fn test_out_of_order_expiry_is_placed_in_order() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("late", 10_000, 15_000);
        let in_order = index.add_or_move("early", 10_000, 10_000);

        assert!(!in_order);
        assert_eq!(keys(&index, 10_000), vec!["early", "late"]);
    }

    #[test]
    fn test_remove() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("a", 10_000, 10_000);
        index.add_or_move("b", 10_000, 11_000);

        assert!(index.remove("a", 10_000));
        assert_eq!(keys(&index, 10_000), vec!["b"]);
        assert!(!index.contains("a"));
    }

    #[test]
    fn test_remove_from_wrong_bucket_is_noop() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("a", 10_000, 10_000);

        assert!(!index.remove("a", 5_000));
        assert!(!index.remove("missing", 10_000));
        assert_eq!(keys(&index, 10_000), vec!["a"]);
    }

    #[test]
    fn test_pop_expired_stops_at_first_live_head() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("a", 10_000, 10_000);
        index.add_or_move("b", 10_000, 12_000);
        index.add_or_move("c", 10_000, 15_000);

        let expired = index.pop_expired(10_000, 13_000);

        assert_eq!(expired, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(keys(&index, 10_000), vec!["c"]);
        assert_eq!(index.ttl_of("a"), None);
    }

    #[test]
    fn test_pop_expired_boundary_is_inclusive() {
        let mut index = TtlBucketIndex::new();

        index.add_or_move("a", 1_000, 2_000);

        assert!(index.pop_expired(1_000, 1_999).is_empty());
        assert_eq!(index.pop_expired(1_000, 2_000), vec!["a".to_string()]);
        assert_eq!(index.bucket_count(), 0);
    }

    #[test]
    fn test_pop_expired_missing_bucket() {
        let mut index = TtlBucketIndex::new();
        assert!(index.pop_expired(1_000, u64::MAX).is_empty());
    }
}
