//! Clock abstraction for expiry checks.
//!
//! Expiry is a pure comparison against the current time, never a scheduled
//! event. Tokens read the time through an injected [`Clock`] so every check
//! observes a single consistent `now` and tests stay deterministic.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// A source of the current UTC instant.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The ambient system clock. The default for production tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A shared handle to the default system clock.
pub(crate) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
