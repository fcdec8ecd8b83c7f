use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Clock abstracts access to the local wall-clock time so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The calendar day a run belongs to: before `rollover_hour` it is still
/// the previous day.
pub fn effective_today(now: NaiveDateTime, rollover_hour: u32) -> NaiveDate {
    if now.hour() < rollover_hour {
        now.date() - Duration::days(1)
    } else {
        now.date()
    }
}
