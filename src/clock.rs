//! Clock abstraction for deterministic time in tests.
//!
//! Every timestamp the core produces (account creation, last login, token
//! issued-at/expiry) is sourced from a [`Clock`] so tests can pin time to a
//! known instant instead of reading the wall clock.

use chrono::{DateTime, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time. The default for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant.
///
/// Public so downstream crates can drive deterministic tests against the
/// same abstraction this crate uses internally.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
