//! Configuration Module
//!
//! Handles loading the host agent's configuration from environment variables.

use std::env;

use crate::cache::{CacheOptions, TtlSeconds};
use crate::error::Result;

const DEFAULT_CACHE_NAME: &str = "metric_cache";
const DEFAULT_READING_TTL: TtlSeconds = TtlSeconds::from_const(10);
const DEFAULT_SWEEP_INTERVAL: u64 = 1;
const DEFAULT_COLLECT_INTERVAL: u64 = 5;

/// Host agent configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name the cache logs under
    pub cache_name: String,
    /// How long a sensor reading stays memoized
    pub reading_ttl: TtlSeconds,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Metric collection interval in seconds
    pub collect_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAME` - Cache name used in logs (default: metric_cache)
    /// - `READING_TTL` - Reading TTL in whole seconds (default: 10)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `COLLECT_INTERVAL` - Collection frequency in seconds (default: 5)
    ///
    /// A malformed `READING_TTL` is an `InvalidArgument` rather than a silent
    /// fallback.
    pub fn from_env() -> Result<Self> {
        let reading_ttl = match env::var("READING_TTL") {
            Ok(raw) => raw.parse()?,
            Err(_) => DEFAULT_READING_TTL,
        };

        Ok(Self {
            cache_name: env::var("CACHE_NAME")
                .unwrap_or_else(|_| DEFAULT_CACHE_NAME.to_string()),
            reading_ttl,
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
            collect_interval: env::var("COLLECT_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COLLECT_INTERVAL),
        })
    }

    /// Options for the cache this configuration describes.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::new(self.cache_name.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            reading_ttl: DEFAULT_READING_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            collect_interval: DEFAULT_COLLECT_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    // Env vars are process-wide; keep every env-touching assertion in one test
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_NAME");
        env::remove_var("READING_TTL");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("COLLECT_INTERVAL");

        let config = Config::from_env().unwrap();
        assert_eq!(config.cache_name, "metric_cache");
        assert_eq!(config.reading_ttl.as_secs(), 10);
        assert_eq!(config.sweep_interval, 1);
        assert_eq!(config.collect_interval, 5);

        env::set_var("READING_TTL", "30");
        env::set_var("SWEEP_INTERVAL", "not-a-number");
        let config = Config::from_env().unwrap();
        assert_eq!(config.reading_ttl.as_secs(), 30);
        assert_eq!(config.sweep_interval, 1);

        env::set_var("READING_TTL", "1.1");
        assert!(matches!(
            Config::from_env(),
            Err(CacheError::InvalidArgument(_))
        ));

        env::remove_var("READING_TTL");
        env::remove_var("SWEEP_INTERVAL");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_name, "metric_cache");
        assert_eq!(config.reading_ttl.as_secs(), 10);
        assert_eq!(config.sweep_interval, 1);
        assert_eq!(config.collect_interval, 5);
        assert!(config.cache_options().validate().is_ok());
    }
}
