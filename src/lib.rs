//! Metric Cache - an in-process TTL cache for metrics agents
//!
//! Memoizes short-lived computed values for a caller-chosen number of seconds.
//! Entries are grouped into per-TTL buckets ordered by insertion, so sweeps
//! evict expired entries without scanning the whole cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheOptions, CacheStats, CacheStore, Timestamp, TtlSeconds};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
