//! Domain model for ledger transactions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, RecordId};

/// A single dated money movement against one account.
///
/// `amount` is stored signed: negative for expenses, positive for income.
/// The category is a soft reference by name; renaming a category does not
/// rewrite transactions that mention the old name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "account")]
    pub account_id: RecordId,
    pub date: NaiveDate,
}

impl Transaction {
    /// Magnitude of the movement regardless of sign convention.
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// True when the transaction's date falls in the given calendar month.
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;
        self.date.year() == year && self.date.month() == month
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field set for a new transaction before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    /// Unsigned magnitude as entered; the sign is derived from `kind`.
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
    pub account_id: RecordId,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        account_id: RecordId,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            category: None,
            account_id,
            date,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Applies the sign convention: expenses negative, everything else
    /// positive.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Expense => -self.amount.abs(),
            _ => self.amount.abs(),
        }
    }

    pub fn into_transaction(self, id: RecordId) -> Transaction {
        let amount = self.signed_amount();
        Transaction {
            id,
            kind: self.kind,
            amount,
            description: self.description,
            category: self.category,
            account_id: self.account_id,
            date: self.date,
        }
    }
}

/// Shallow changeset for [`Transaction`]; `None` fields keep stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    /// Signed replacement amount, exactly as it should be stored.
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "account")]
    pub account_id: Option<RecordId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn apply(self, txn: &mut Transaction) {
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(description) = self.description {
            txn.description = description;
        }
        if let Some(category) = self.category {
            txn.category = Some(category);
        }
        if let Some(account_id) = self.account_id {
            txn.account_id = account_id;
        }
        if let Some(date) = self.date {
            txn.date = date;
        }
    }
}

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    /// Recorded but moves no balance anywhere; see the store docs.
    Transfer,
}

impl TransactionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            "transfer" => Some(TransactionKind::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expense_amounts_are_stored_negative() {
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            45.0,
            "Groceries",
            1,
            date(2025, 3, 10),
        )
        .into_transaction(7);
        assert_eq!(txn.amount, -45.0);
        assert_eq!(txn.magnitude(), 45.0);
    }

    #[test]
    fn income_amounts_are_stored_positive() {
        let txn = NewTransaction::new(
            TransactionKind::Income,
            -2000.0,
            "Salary",
            1,
            date(2025, 3, 1),
        )
        .into_transaction(8);
        assert_eq!(txn.amount, 2000.0);
    }

    #[test]
    fn in_month_compares_calendar_fields() {
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            5.0,
            "Coffee",
            1,
            date(2025, 1, 31),
        )
        .into_transaction(1);
        assert!(txn.in_month(2025, 1));
        assert!(!txn.in_month(2025, 2));
    }

    #[test]
    fn wire_shape_matches_dashboard_blobs() {
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            12.5,
            "Lunch",
            3,
            date(2025, 6, 2),
        )
        .with_category("Food")
        .into_transaction(11);
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("\"account\":3"));
        assert!(json.contains("\"date\":\"2025-06-02\""));
    }
}
