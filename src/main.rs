//! Metric Cache - an in-process TTL cache for metrics agents
//!
//! Minimal host agent: memoizes a load-average reading in the cache and keeps
//! a background sweep running until shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metric_cache::{spawn_sweep_task, Cache, CacheError, Config, TtlSeconds};

const LOADAVG_KEY: &str = "loadavg";

/// A single memoized sensor reading.
#[derive(Debug, Serialize)]
struct LoadReading {
    one: f64,
    five: f64,
    fifteen: f64,
    collected_at: String,
}

/// Main entry point for the host agent.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache
/// 4. Start background TTL sweep task
/// 5. Collect readings on an interval, served from the cache while fresh
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metric_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting metric cache agent");

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_name={}, reading_ttl={}, sweep_interval={}s, collect_interval={}s",
        config.cache_name, config.reading_ttl, config.sweep_interval, config.collect_interval
    );

    let cache: Cache<LoadReading> =
        Cache::new(config.cache_options()).context("failed to create cache")?;
    info!("Cache initialized");

    let sweep_handle = spawn_sweep_task(cache.clone(), config.sweep_interval);
    info!("Background sweep task started");

    let collect_interval = Duration::from_secs(config.collect_interval.max(1));
    let mut ticker = tokio::time::interval(collect_interval);

    tokio::select! {
        _ = async {
            loop {
                ticker.tick().await;
                match reading(&cache, config.reading_ttl).await {
                    Ok(value) => info!(
                        reading = %serde_json::to_string(&*value).unwrap_or_default(),
                        stats = %serde_json::to_string(&cache.stats()).unwrap_or_default(),
                        "collected load average"
                    ),
                    Err(err) => warn!("Failed to collect load average: {:#}", err),
                }
            }
        } => {}
        _ = shutdown_signal() => {}
    }

    sweep_handle.abort();
    warn!("Sweep task aborted");
    info!("Agent shutdown complete");
    Ok(())
}

/// Returns the cached reading, reading the sensor again once it has expired.
async fn reading(
    cache: &Cache<LoadReading>,
    ttl: TtlSeconds,
) -> anyhow::Result<Arc<LoadReading>> {
    match cache.get(LOADAVG_KEY) {
        Ok(value) => return Ok(value),
        Err(CacheError::NotFound) => {}
        Err(err) => return Err(err.into()),
    }

    let value = Arc::new(read_loadavg().await?);
    cache.insert(LOADAVG_KEY, Arc::clone(&value), ttl)?;
    Ok(value)
}

/// Reads the load average sensor.
async fn read_loadavg() -> anyhow::Result<LoadReading> {
    let raw = tokio::fs::read_to_string("/proc/loadavg")
        .await
        .context("reading /proc/loadavg")?;

    let mut fields = raw.split_whitespace().map(str::parse::<f64>);
    let mut next = |name: &str| -> anyhow::Result<f64> {
        fields
            .next()
            .with_context(|| format!("missing {} field", name))?
            .with_context(|| format!("malformed {} field", name))
    };

    Ok(LoadReading {
        one: next("1m")?,
        five: next("5m")?,
        fifteen: next("15m")?,
        collected_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
