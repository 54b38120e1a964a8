//! Real-world time source for the default anchor timestamp.
//!
//! Conversions never read a clock; only [`crate::EngineConfig`] does, when no
//! anchor is configured.

use chrono::{DateTime, Utc};

/// Source of the current real-world instant.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current instant as Unix seconds, sub-second precision included.
    fn anchor_now(&self) -> f64 {
        let now = self.now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_millis()) / 1000.0
    }
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for tests.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
