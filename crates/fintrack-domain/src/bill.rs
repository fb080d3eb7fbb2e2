//! Domain model for recurring bills tracked on the calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, RecordId};

/// An upcoming payment obligation with a calendar due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: RecordId,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

impl Bill {
    /// True when the bill falls due within `days` days of `today`,
    /// inclusive on both ends.
    pub fn due_within(&self, today: NaiveDate, days: i64) -> bool {
        self.due_date >= today && self.due_date <= today + chrono::Duration::days(days)
    }
}

impl Identifiable for Bill {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field set for a new bill before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

impl NewBill {
    pub fn new(name: impl Into<String>, amount: f64, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            amount,
            due_date,
        }
    }

    pub fn into_bill(self, id: RecordId) -> Bill {
        Bill {
            id,
            name: self.name,
            amount: self.amount,
            due_date: self.due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_within_is_inclusive() {
        let bill = NewBill::new("Rent", 1200.0, date(2025, 4, 4)).into_bill(1);
        assert!(bill.due_within(date(2025, 4, 1), 3));
        assert!(bill.due_within(date(2025, 4, 4), 3));
        assert!(!bill.due_within(date(2025, 4, 5), 3));
        assert!(!bill.due_within(date(2025, 3, 31), 3));
    }
}
