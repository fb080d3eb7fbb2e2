//! CSV write/read for the transaction table.
//!
//! Columns: `Date,Type,Description,Category,Account,Amount`. Reading is the
//! import path: rows become new-transaction drafts against a caller-chosen
//! fallback account, and rows that do not parse are skipped.

use chrono::NaiveDate;

use fintrack_domain::{Account, NewTransaction, RecordId, Transaction, TransactionKind};

const HEADER: &str = "Date,Type,Description,Category,Account,Amount";

/// Serializes the transactions with account names resolved.
pub fn write_transactions(transactions: &[Transaction], accounts: &[Account]) -> String {
    let mut out = String::from(HEADER);
    for txn in transactions {
        let account_name = accounts
            .iter()
            .find(|a| a.id == txn.account_id)
            .map(|a| a.name.as_str())
            .unwrap_or("");
        out.push('\n');
        out.push_str(&[
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.to_string().to_lowercase(),
            quote(&txn.description),
            quote(txn.category.as_deref().unwrap_or("")),
            quote(account_name),
            format!("{}", txn.amount),
        ]
        .join(","));
    }
    out
}

/// Parses exported rows back into drafts. The account column is a display
/// name only, so every row lands on `fallback_account` (the first account,
/// by convention). Malformed rows are dropped silently.
pub fn read_transactions(csv: &str, fallback_account: RecordId) -> Vec<NewTransaction> {
    csv.lines()
        .skip(1)
        .filter_map(|line| parse_row(line, fallback_account))
        .collect()
}

fn parse_row(line: &str, fallback_account: RecordId) -> Option<NewTransaction> {
    let fields = split_fields(line);
    if fields.len() < 6 {
        return None;
    }
    let date = NaiveDate::parse_from_str(fields[0].trim(), "%Y-%m-%d").ok()?;
    let kind = TransactionKind::parse(&fields[1])?;
    let amount: f64 = fields[5].trim().parse().ok()?;
    let mut draft = NewTransaction::new(kind, amount, fields[2].trim(), fallback_account, date);
    let category = fields[3].trim();
    if !category.is_empty() {
        draft = draft.with_category(category);
    }
    Some(draft)
}

fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits one row on commas while honoring the quoting `quote` emits:
/// commas inside a `"`-wrapped field do not separate, and a doubled `""`
/// collapses back to one quote character.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if field.is_empty() => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            other => field.push(other),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use fintrack_domain::{AccountKind, NewAccount};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn writes_header_and_signed_amounts() {
        let account = NewAccount::new("Everyday", AccountKind::Checking, "Bank").into_account(1);
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            45.5,
            "Groceries",
            1,
            date(2025, 9, 3),
        )
        .with_category("Food")
        .into_transaction(2);
        let csv = write_transactions(&[txn], &[account]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(
            lines.next(),
            Some("2025-09-03,expense,Groceries,Food,Everyday,-45.5")
        );
    }

    #[test]
    fn read_round_trips_a_written_row() {
        let account = NewAccount::new("Everyday", AccountKind::Checking, "Bank").into_account(1);
        let txn = NewTransaction::new(
            TransactionKind::Income,
            1200.0,
            "Salary",
            1,
            date(2025, 9, 1),
        )
        .with_category("Salary")
        .into_transaction(3);
        let csv = write_transactions(&[txn], &[account]);

        let drafts = read_transactions(&csv, 7);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].kind, TransactionKind::Income);
        assert_eq!(drafts[0].description, "Salary");
        assert_eq!(drafts[0].account_id, 7, "import lands on fallback account");
        assert_eq!(drafts[0].signed_amount(), 1200.0);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = format!(
            "{}\nnot-a-date,expense,x,,,10\n2025-09-02,expense,ok,,,5.0\nshort,row",
            HEADER
        );
        let drafts = read_transactions(&csv, 1);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].description, "ok");
    }

    #[test]
    fn descriptions_with_commas_are_quoted() {
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            9.0,
            "Coffee, beans",
            1,
            date(2025, 9, 4),
        )
        .into_transaction(4);
        let csv = write_transactions(&[txn], &[]);
        assert!(csv.contains("\"Coffee, beans\""));
    }

    #[test]
    fn comma_bearing_descriptions_survive_the_round_trip() {
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            9.0,
            "Coffee, beans",
            1,
            date(2025, 9, 4),
        )
        .with_category("Food")
        .into_transaction(4);
        let csv = write_transactions(&[txn], &[]);

        let drafts = read_transactions(&csv, 1);
        assert_eq!(drafts.len(), 1, "quoted row must not be dropped");
        assert_eq!(drafts[0].description, "Coffee, beans");
        assert_eq!(drafts[0].category.as_deref(), Some("Food"));
        assert_eq!(drafts[0].signed_amount(), -9.0);
    }

    #[test]
    fn doubled_quotes_collapse_on_read() {
        let txn = NewTransaction::new(
            TransactionKind::Expense,
            3.0,
            "say \"when\"",
            1,
            date(2025, 9, 5),
        )
        .into_transaction(5);
        let csv = write_transactions(&[txn], &[]);
        assert!(csv.contains("\"say \"\"when\"\"\""));

        let drafts = read_transactions(&csv, 1);
        assert_eq!(drafts[0].description, "say \"when\"");
    }
}
