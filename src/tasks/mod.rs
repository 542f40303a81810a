//! Background Tasks Module
//!
//! Contains background tasks a host can run alongside the cache.
//!
//! # Tasks
//! - TTL Sweep: evicts expired cache entries at a configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
