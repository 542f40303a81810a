//! Cache Options Module
//!
//! Construction-time options, validated before a cache is built.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Cache Options ==
/// Options a cache is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheOptions {
    /// Identity carried by every diagnostic event this cache logs
    pub name: String,
}

impl CacheOptions {
    // == Constructor ==
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    // == Validate ==
    /// Fails with `InvalidArgument` when the options cannot back a cache.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CacheError::invalid("cache name must be defined"));
        }
        if self.name.chars().any(char::is_control) {
            return Err(CacheError::invalid(
                "cache name must not contain control characters",
            ));
        }
        Ok(())
    }
}
