use chrono::{Local, NaiveDate};

use fintrack_core::Clock;

/// Real-time clock backed by the local system date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
