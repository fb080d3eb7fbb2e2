//! Recurrence frequencies used to fan out repeating transactions.
//!
//! Recurrence is a creation-time concept only: the store expands a frequency
//! and occurrence count into that many independent transactions up front and
//! keeps no recurrence metadata afterwards.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// How far apart consecutive occurrences are scheduled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "biweekly" => Some(Frequency::Biweekly),
            "monthly" => Some(Frequency::Monthly),
            "quarterly" => Some(Frequency::Quarterly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    /// The occurrence date following `from`.
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        self.nth_date(from, 1)
    }

    /// The `n`th occurrence counting from `start` (`n = 0` is `start`).
    ///
    /// Month-based frequencies anchor on the start date's day-of-month and
    /// clamp each occurrence independently, so a monthly run from Jan 31
    /// lands on Feb 28 and then back on Mar 31 rather than drifting to
    /// whatever day the clamp produced.
    pub fn nth_date(&self, start: NaiveDate, n: u32) -> NaiveDate {
        let steps = n as i64;
        match self {
            Frequency::Daily => start + Duration::days(steps),
            Frequency::Weekly => start + Duration::days(7 * steps),
            Frequency::Biweekly => start + Duration::days(14 * steps),
            Frequency::Monthly => shift_month(start, n as i32),
            Frequency::Quarterly => shift_month(start, 3 * n as i32),
            Frequency::Yearly => shift_year(start, n as i32),
        }
    }

    /// Dates of the first `times` occurrences starting at `start`.
    pub fn schedule(&self, start: NaiveDate, times: u32) -> Vec<NaiveDate> {
        (0..times).map(|n| self.nth_date(start, n)).collect()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap())
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 1).unwrap())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_clamps_to_month_end() {
        assert_eq!(
            Frequency::Monthly.next_date(date(2025, 1, 31)),
            date(2025, 2, 28)
        );
        assert_eq!(
            Frequency::Monthly.next_date(date(2024, 1, 31)),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn quarterly_steps_three_months() {
        assert_eq!(
            Frequency::Quarterly.next_date(date(2025, 11, 15)),
            date(2026, 2, 15)
        );
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(
            Frequency::Yearly.next_date(date(2024, 2, 29)),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn schedule_returns_requested_count_starting_at_origin() {
        let dates = Frequency::Biweekly.schedule(date(2025, 5, 1), 3);
        assert_eq!(
            dates,
            vec![date(2025, 5, 1), date(2025, 5, 15), date(2025, 5, 29)]
        );
    }

    #[test]
    fn monthly_schedule_reanchors_after_a_clamped_month() {
        // A February clamp must not shorten every month after it.
        let dates = Frequency::Monthly.schedule(date(2025, 1, 31), 4);
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 31),
                date(2025, 2, 28),
                date(2025, 3, 31),
                date(2025, 4, 30),
            ]
        );
    }
}
