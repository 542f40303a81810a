//! TTL Sweep Task
//!
//! Background task that periodically evicts expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, Cache};

/// Spawns a background task that sweeps `cache` every `sweep_interval_secs`
/// seconds using the wall clock.
///
/// The cache itself never schedules sweeps; this task is one way for a host
/// to drive them.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Cache::<f64>::new(CacheOptions::new("sensors"))?;
/// let sweep_handle = spawn_sweep_task(cache.clone(), 1);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: Cache<V>, sweep_interval_secs: u64) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs.max(1));

    tokio::spawn(async move {
        let name = cache.name();
        info!(
            cache = %name,
            "Starting TTL sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let evicted = cache.sweep(current_timestamp_ms());

            if evicted > 0 {
                info!(cache = %name, "TTL sweep: evicted {} expired entries", evicted);
            } else {
                debug!(cache = %name, "TTL sweep: no expired entries found");
            }
        }
    })
}
