//! Flattens transactions, bills, and goal deadlines into calendar events.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use fintrack_domain::{Account, Bill, Goal, Transaction, TransactionKind};

/// A single all-day event derived from one ledger record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarEvent {
    /// Stable per-record id, e.g. `transaction-17`.
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: EventCategory,
}

/// Event tag mirroring the source collection.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventCategory {
    Transaction,
    Bill,
    Goal,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventCategory::Transaction => "Transaction",
            EventCategory::Bill => "Bill",
            EventCategory::Goal => "Goal",
        };
        f.write_str(label)
    }
}

/// Builds the full event list: every transaction, every bill, and every
/// goal that has a deadline.
pub fn collect_events(
    transactions: &[Transaction],
    accounts: &[Account],
    bills: &[Bill],
    goals: &[Goal],
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for txn in transactions {
        let account_name = accounts
            .iter()
            .find(|a| a.id == txn.account_id)
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown Account");
        let marker = if txn.kind == TransactionKind::Expense {
            "📤"
        } else {
            "📥"
        };
        events.push(CalendarEvent {
            id: format!("transaction-{}", txn.id),
            title: format!("{} {}", marker, txn.description),
            date: txn.date,
            description: format!(
                "{}: {:.2} - {} ({})",
                txn.kind.to_string().to_uppercase(),
                txn.magnitude(),
                txn.category.as_deref().unwrap_or(""),
                account_name
            ),
            category: EventCategory::Transaction,
        });
    }

    for bill in bills {
        events.push(CalendarEvent {
            id: format!("bill-{}", bill.id),
            title: format!("💰 Bill Due: {}", bill.name),
            date: bill.due_date,
            description: format!("Bill payment due: {:.2}", bill.amount),
            category: EventCategory::Bill,
        });
    }

    for goal in goals {
        if let Some(deadline) = goal.deadline {
            events.push(CalendarEvent {
                id: format!("goal-{}", goal.id),
                title: format!("🎯 Goal Deadline: {}", goal.name),
                date: deadline,
                description: format!(
                    "Financial goal target: {:.2} (Current: {:.2})",
                    goal.target, goal.current
                ),
                category: EventCategory::Goal,
            });
        }
    }

    events
}
