//! Cache Module
//!
//! Provides in-memory caching with TTL expiration. Entries sharing a TTL are
//! grouped into insertion-ordered buckets so sweeps only visit entries that
//! are actually due.

mod buckets;
mod entry;
mod items;
mod options;
mod shared;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use buckets::TtlBucketIndex;
pub use entry::{current_timestamp_ms, CacheEntry, Timestamp};
pub use items::ItemStore;
pub use options::CacheOptions;
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl::TtlSeconds;
