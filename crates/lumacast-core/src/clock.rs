//! Clock abstraction for determinism.

use chrono::{DateTime, NaiveTime, Utc};

/// Abstraction over system time for deterministic behavior.
///
/// All timestamps written into the aggregate (`last_played`,
/// `last_vote_time`, win-history entries) flow through this trait so the
/// engines can be tested against a fixed instant.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the start of the current UTC day.
    ///
    /// This is the window boundary for the win-count PSA cadence: only
    /// voting wins recorded after this instant count toward today's total.
    fn start_of_day(&self) -> DateTime<Utc> {
        self.now().date_naive().and_time(NaiveTime::MIN).and_utc()
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    struct MidAfternoon;

    impl Clock for MidAfternoon {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 3, 9, 15, 42, 7).unwrap()
        }
    }

    #[test]
    fn test_start_of_day_truncates_to_midnight() {
        let start = MidAfternoon.start_of_day();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap());
        assert_eq!(start.hour(), 0);
    }
}
