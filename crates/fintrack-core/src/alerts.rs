//! Budget-alert and bill-reminder derivation plus the outbound
//! notification seam.
//!
//! Notification dispatch is fire-and-forget: the store derives what should
//! go out, hands it to a [`Notifier`], and swallows (but logs) any send
//! failure. Nothing here feeds back into the collections.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use fintrack_domain::Bill;

use crate::store::LedgerStore;

/// How many days ahead a bill is considered "due soon".
pub const BILL_REMINDER_WINDOW_DAYS: i64 = 3;

/// Budget utilization band (percent) that triggers an alert: warned when
/// spending reaches 80% but has not yet blown past 100%.
pub const BUDGET_ALERT_THRESHOLD: f64 = 80.0;

/// A budgeted category whose current-month spend sits in the alert band.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: f64,
    pub budget: f64,
    pub percent: f64,
}

impl BudgetAlert {
    pub fn subject(&self) -> String {
        format!("Budget Alert: {}", self.category)
    }

    pub fn message(&self) -> String {
        format!(
            "You've spent {:.2} ({:.1}%) of your {:.2} budget for {}.",
            self.spent, self.percent, self.budget, self.category
        )
    }
}

/// A bill due within the reminder window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BillReminder {
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

impl BillReminder {
    fn from_bill(bill: &Bill) -> Self {
        Self {
            name: bill.name.clone(),
            amount: bill.amount,
            due_date: bill.due_date,
        }
    }

    pub fn subject(&self) -> String {
        format!("Bill Reminder: {}", self.name)
    }

    pub fn message(&self) -> String {
        format!(
            "Don't forget! Your bill \"{}\" is due on {}. Amount: {:.2}",
            self.name, self.due_date, self.amount
        )
    }
}

#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound message sink (email bridge, log sink, ...). Implementations are
/// free to fail; dispatch never lets that failure propagate.
pub trait Notifier {
    fn send(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

impl LedgerStore {
    /// Budgeted categories whose spend for `today`'s month has reached the
    /// alert threshold but not yet exceeded the budget. Empty when the
    /// budget-alert toggle is off.
    pub fn budget_alerts(&self, today: NaiveDate) -> Vec<BudgetAlert> {
        use chrono::Datelike;
        if !self.settings.budget_alerts {
            return Vec::new();
        }
        self.budget_overview(today.year(), today.month())
            .into_iter()
            .filter(|row| row.percent >= BUDGET_ALERT_THRESHOLD && row.percent < 100.0)
            .map(|row| BudgetAlert {
                category: row.category,
                spent: row.spent,
                budget: row.budget,
                percent: row.percent,
            })
            .collect()
    }

    /// Bills due between `today` and three days out, inclusive. Empty when
    /// the bill-reminder toggle is off.
    pub fn bill_reminders(&self, today: NaiveDate) -> Vec<BillReminder> {
        if !self.settings.bill_reminders {
            return Vec::new();
        }
        self.bills
            .iter()
            .filter(|b| b.due_within(today, BILL_REMINDER_WINDOW_DAYS))
            .map(BillReminder::from_bill)
            .collect()
    }

    /// Runs the daily notification sweep: budget alerts then bill
    /// reminders, each sent through `notifier`. Requires the
    /// email-notifications master toggle; individual send failures are
    /// logged and dropped.
    pub fn dispatch_notifications(&self, notifier: &dyn Notifier, today: NaiveDate) -> usize {
        if !self.settings.email_notifications {
            return 0;
        }
        let mut sent = 0;
        for alert in self.budget_alerts(today) {
            match notifier.send(&alert.subject(), &alert.message()) {
                Ok(()) => sent += 1,
                Err(err) => warn!(category = %alert.category, %err, "budget alert dropped"),
            }
        }
        for reminder in self.bill_reminders(today) {
            match notifier.send(&reminder.subject(), &reminder.message()) {
                Ok(()) => sent += 1,
                Err(err) => warn!(bill = %reminder.name, %err, "bill reminder dropped"),
            }
        }
        sent
    }
}
