//! Clock abstraction for determinism.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds elapsed since `origin`, saturating at zero when the
    /// clock reads earlier than `origin`.
    fn elapsed_ms(&self, origin: DateTime<Utc>) -> u64 {
        let delta = self.now().signed_duration_since(origin).num_milliseconds();
        u64::try_from(delta).unwrap_or(0)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
