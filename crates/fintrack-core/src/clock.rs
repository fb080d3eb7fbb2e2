use chrono::NaiveDate;

/// Abstracts "today" so current-month aggregates and reminder checks stay
/// deterministic in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// A clock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
