//! Injectable time source.
//!
//! Every delay and duration computation reads "now" through a [`Clock`] so
//! tests can freeze and advance time deterministically.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Duration, Local, NaiveDateTime};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// The current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Production clock reading the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually controlled clock for tests.
///
/// Clones share the same underlying instant, so a test can hand one clone to
/// the services and keep another to advance time.
///
/// # Example
///
/// ```
/// use shift_timeclock::ports::{Clock, FixedClock};
/// use chrono::{Duration, NaiveDateTime};
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let clock = FixedClock::new(start);
/// let shared = clock.clone();
///
/// clock.advance(Duration::minutes(30));
/// assert_eq!(shared.now(), start + Duration::minutes(30));
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_fixed_clock_is_frozen_until_moved() {
        let clock = FixedClock::new(make_datetime("2026-01-15 09:00:00"));
        assert_eq!(clock.now(), clock.now());

        clock.set(make_datetime("2026-01-15 13:00:00"));
        assert_eq!(clock.now(), make_datetime("2026-01-15 13:00:00"));
    }

    #[test]
    fn test_fixed_clock_clones_share_time() {
        let clock = FixedClock::new(make_datetime("2026-01-15 09:00:00"));
        let shared = clock.clone();
        clock.advance(Duration::hours(2));
        assert_eq!(shared.now(), make_datetime("2026-01-15 11:00:00"));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
