//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::convert::Infallible;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Malformed input or construction options. State is left untouched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key absent or logically expired
    #[error("Not found")]
    NotFound,
}

impl CacheError {
    // == Error Code ==
    /// Returns the stable error code callers can match on.
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::InvalidArgument(_) => "EINVAL",
            CacheError::NotFound => "ENOTFOUND",
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CacheError::InvalidArgument(reason.into())
    }
}

impl From<Infallible> for CacheError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
