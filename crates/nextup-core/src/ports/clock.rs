//! Clock port - time as an injected collaborator.
//!
//! The decision logic never reads a live clock; "now" flows in as a
//! parameter, and callers that need a clock (the rotation loop, the CLI)
//! take it through this trait so tests can pin the instant.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Live clock for production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_is_fixed() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();
        let clock = FixedClock::new(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
