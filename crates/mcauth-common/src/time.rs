// ============================================
// File: crates/mcauth-common/src/time.rs
// ============================================
//! # Time Utilities
//!
//! ## Creation Reason
//! Client keys carry an expiry issued by the signing authority in epoch
//! milliseconds, and the canonical signed form embeds that exact number.
//! `Timestamp` keeps the millisecond value untouched so it can be compared
//! and re-rendered without rounding.
//!
//! ## Main Functionality
//! - `Timestamp`: Unix timestamp in milliseconds, totally ordered
//! - Conversions from/to `SystemTime` and raw `i64`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Pre-epoch instants are legal and render as negative numbers
//! - Do NOT convert to seconds anywhere on the verification path
//!
//! ## Last Modified
//! v0.1.0 - Initial time utilities

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// ============================================
// Timestamp
// ============================================

/// Unix timestamp in milliseconds.
///
/// # Example
/// ```
/// use mcauth_common::time::Timestamp;
///
/// let expiry = Timestamp::from_millis(1_700_000_000_000);
/// let before = expiry.saturating_sub_millis(1);
///
/// assert!(before.is_before(expiry));
/// assert!(!expiry.is_before(expiry));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from Unix milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Creates a timestamp for the current time.
    ///
    /// A system clock set before the Unix epoch yields negative values.
    #[must_use]
    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    /// Returns the Unix timestamp in milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns `true` if `self` is strictly earlier than `other`.
    #[must_use]
    pub const fn is_before(&self, other: Self) -> bool {
        self.0 < other.0
    }

    /// Returns a timestamp `millis` earlier, saturating at `i64::MIN`.
    #[must_use]
    pub const fn saturating_sub_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_sub(millis))
    }

    /// Returns a timestamp `millis` later, saturating at `i64::MAX`.
    #[must_use]
    pub const fn saturating_add_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let millis = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => duration_millis(after),
            Err(before) => -duration_millis(before.duration()),
        };
        Self(millis)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

// ============================================
// Tests
// ============================================
