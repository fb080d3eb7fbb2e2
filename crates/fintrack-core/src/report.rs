//! Derived aggregates: computed fresh from current collection contents on
//! every call, never cached or incrementally maintained.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use fintrack_domain::{RecordId, Transaction};

use crate::store::LedgerStore;

/// Income and expense magnitudes for one calendar month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthFlow {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

impl MonthFlow {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Spending against one budgeted category for a month.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetProgress {
    pub category: String,
    pub color: String,
    pub budget: f64,
    pub spent: f64,
    /// `max(0, budget - spent)`; never negative.
    pub remaining: f64,
    /// `spent / budget * 100`; 0 when the budget is 0 (never NaN or inf).
    pub percent: f64,
}

/// One slice of the per-category expense distribution.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub color: String,
    pub spent: f64,
}

impl LedgerStore {
    /// Sum of all account balances.
    pub fn total_balance(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    /// Sum of income magnitudes dated in the given calendar month.
    pub fn monthly_income(&self, year: i32, month: u32) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.is_income() && t.in_month(year, month))
            .map(Transaction::magnitude)
            .sum()
    }

    /// Sum of expense magnitudes dated in the given calendar month.
    pub fn monthly_expense(&self, year: i32, month: u32) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.is_expense() && t.in_month(year, month))
            .map(Transaction::magnitude)
            .sum()
    }

    /// `(income - expense) / income * 100`; 0 when the month has no income.
    pub fn savings_rate(&self, year: i32, month: u32) -> f64 {
        let income = self.monthly_income(year, month);
        if income > 0.0 {
            (income - self.monthly_expense(year, month)) / income * 100.0
        } else {
            0.0
        }
    }

    /// Expense total for transactions whose category name equals `name`
    /// exactly (no case folding) in the given month.
    pub fn category_spent(&self, name: &str, year: i32, month: u32) -> f64 {
        self.transactions
            .iter()
            .filter(|t| {
                t.is_expense() && t.in_month(year, month) && t.category.as_deref() == Some(name)
            })
            .map(Transaction::magnitude)
            .sum()
    }

    /// Spend-vs-budget for one category by id; `None` when the id is
    /// unknown.
    pub fn budget_progress(
        &self,
        category_id: RecordId,
        year: i32,
        month: u32,
    ) -> Option<BudgetProgress> {
        let category = self.category(category_id)?;
        let spent = self.category_spent(&category.name, year, month);
        Some(progress_row(
            &category.name,
            &category.color,
            category.budget,
            spent,
        ))
    }

    /// Spend-vs-budget rows for every budgeted category (budget > 0).
    pub fn budget_overview(&self, year: i32, month: u32) -> Vec<BudgetProgress> {
        self.categories
            .iter()
            .filter(|c| c.is_budgeted())
            .map(|c| {
                let spent = self.category_spent(&c.name, year, month);
                progress_row(&c.name, &c.color, c.budget, spent)
            })
            .collect()
    }

    /// Per-month income/expense flow for the `months` calendar months ending
    /// at (and including) `reference`'s month, oldest first.
    pub fn monthly_flow(&self, reference: NaiveDate, months: u32) -> Vec<MonthFlow> {
        let mut series = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let (year, month) = month_back(reference.year(), reference.month(), back);
            series.push(MonthFlow {
                year,
                month,
                income: self.monthly_income(year, month),
                expense: self.monthly_expense(year, month),
            });
        }
        series
    }

    /// Expense distribution per category for a month; categories with no
    /// spending are omitted.
    pub fn category_distribution(&self, year: i32, month: u32) -> Vec<CategorySlice> {
        self.categories
            .iter()
            .filter_map(|c| {
                let spent = self.category_spent(&c.name, year, month);
                (spent > 0.0).then(|| CategorySlice {
                    category: c.name.clone(),
                    color: c.color.clone(),
                    spent,
                })
            })
            .collect()
    }

    /// Newest-first transactions, at most `limit` of them.
    pub fn recent_transactions(&self, limit: usize) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = self.transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }
}

fn progress_row(name: &str, color: &str, budget: f64, spent: f64) -> BudgetProgress {
    let percent = if budget > 0.0 {
        spent / budget * 100.0
    } else {
        0.0
    };
    BudgetProgress {
        category: name.to_string(),
        color: color.to_string(),
        budget,
        spent,
        remaining: (budget - spent).max(0.0),
        percent,
    }
}

/// Steps `back` calendar months before `year`/`month`.
fn month_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
