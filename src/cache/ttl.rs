//! TTL Module
//!
//! Validated time-to-live durations. A TTL is a whole, strictly positive
//! number of seconds whose millisecond form fits in a `u64`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CacheError, Result};

// == TTL Seconds ==
/// A validated TTL in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TtlSeconds(u64);

impl TtlSeconds {
    // == Constructor ==
    /// Validates a raw second count.
    pub fn new(seconds: u64) -> Result<Self> {
        if seconds == 0 {
            return Err(CacheError::invalid("TTL must be positive"));
        }
        if seconds.checked_mul(1000).is_none() {
            return Err(CacheError::invalid(format!(
                "TTL of {} seconds is out of range",
                seconds
            )));
        }
        Ok(Self(seconds))
    }

    /// Builds a TTL in const context; an out-of-range literal fails to compile.
    pub(crate) const fn from_const(seconds: u64) -> Self {
        assert!(seconds > 0 && seconds <= u64::MAX / 1000);
        Self(seconds)
    }

    /// Returns the TTL in seconds.
    pub fn as_secs(self) -> u64 {
        self.0
    }

    /// Returns the TTL in milliseconds, the unit buckets are keyed by.
    pub fn as_millis(self) -> u64 {
        // Range checked in `new`
        self.0 * 1000
    }
}

impl fmt::Display for TtlSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// == Conversions ==
impl TryFrom<u64> for TtlSeconds {
    type Error = CacheError;

    fn try_from(seconds: u64) -> Result<Self> {
        Self::new(seconds)
    }
}

impl TryFrom<u32> for TtlSeconds {
    type Error = CacheError;

    fn try_from(seconds: u32) -> Result<Self> {
        Self::new(u64::from(seconds))
    }
}

impl TryFrom<i64> for TtlSeconds {
    type Error = CacheError;

    fn try_from(seconds: i64) -> Result<Self> {
        if seconds <= 0 {
            return Err(CacheError::invalid("TTL must be positive"));
        }
        Self::new(seconds as u64)
    }
}

impl TryFrom<i32> for TtlSeconds {
    type Error = CacheError;

    fn try_from(seconds: i32) -> Result<Self> {
        Self::try_from(i64::from(seconds))
    }
}

impl TryFrom<f64> for TtlSeconds {
    type Error = CacheError;

    fn try_from(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() {
            return Err(CacheError::invalid("TTL must be a number"));
        }
        if seconds.fract() != 0.0 {
            return Err(CacheError::invalid("TTL must be an integer"));
        }
        if seconds <= 0.0 {
            return Err(CacheError::invalid("TTL must be positive"));
        }
        if seconds > u64::MAX as f64 {
            return Err(CacheError::invalid("TTL is out of range"));
        }
        Self::new(seconds as u64)
    }
}

impl FromStr for TtlSeconds {
    type Err = CacheError;

    /// Parses a TTL from configuration text. Only integer literals are
    /// accepted; `"1.5"` and `"-1"` are rejected like their numeric forms.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(seconds) => Self::try_from(seconds),
            Err(_) => match trimmed.parse::<f64>() {
                Ok(seconds) => Self::try_from(seconds),
                Err(_) => Err(CacheError::invalid(format!(
                    "TTL must be a number, got '{}'",
                    s
                ))),
            },
        }
    }
}
