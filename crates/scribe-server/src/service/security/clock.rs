//! Injectable wall-clock time source.

use std::fmt;

use jiff::Timestamp;

/// Source of the current time for token issuing and expiry checks.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

/// [`Clock`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// [`Clock`] frozen at a single instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub Timestamp);

#[cfg(test)]
impl FixedClock {
    /// Creates a clock frozen at the given unix second.
    pub fn at_second(second: i64) -> Self {
        Self(Timestamp::from_second(second).expect("valid unix second"))
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
