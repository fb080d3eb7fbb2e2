//! End-to-end properties of the Ledger Store against a shared in-memory
//! blob store, including reload behavior.

use std::sync::Arc;

use chrono::NaiveDate;
use fintrack_core::{LedgerStore, MemoryBlobStore};
use fintrack_domain::{
    AccountKind, NewAccount, NewBill, NewGoal, NewTransaction, SettingsPatch, TransactionKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn balance_equals_opening_plus_signed_sum_of_live_transactions() {
    let mut store = LedgerStore::open(Box::new(MemoryBlobStore::new()));
    let account = store
        .create_account(
            NewAccount::new("Checking", AccountKind::Checking, "Acme Bank").with_balance(1000.0),
        )
        .id;

    let mut live = Vec::new();
    for (kind, amount, day) in [
        (TransactionKind::Income, 400.0, 1),
        (TransactionKind::Expense, 120.0, 2),
        (TransactionKind::Expense, 75.5, 3),
        (TransactionKind::Income, 10.0, 4),
    ] {
        let txn = store.create_transaction(NewTransaction::new(
            kind,
            amount,
            "seq",
            account,
            date(2025, 5, day),
        ));
        live.push(txn);
    }
    // delete one expense and one income again
    store.delete_transaction(live[1].id).unwrap();
    store.delete_transaction(live[3].id).unwrap();

    let expected = 1000.0 + 400.0 - 75.5;
    assert!((store.account(account).unwrap().balance - expected).abs() < 1e-9);
}

#[test]
fn create_then_delete_restores_balance_exactly() {
    let mut store = LedgerStore::open(Box::new(MemoryBlobStore::new()));
    let account = store
        .create_account(
            NewAccount::new("Checking", AccountKind::Checking, "Acme Bank").with_balance(1000.0),
        )
        .id;
    let txn = store.create_transaction(NewTransaction::new(
        TransactionKind::Expense,
        150.0,
        "Dinner",
        account,
        date(2025, 5, 20),
    ));

    assert_eq!(store.total_balance(), 850.0);
    assert_eq!(store.monthly_expense(2025, 5), 150.0);

    store.delete_transaction(txn.id).unwrap();
    assert_eq!(store.total_balance(), 1000.0);
    assert_eq!(store.monthly_expense(2025, 5), 0.0);
}

#[test]
fn collections_round_trip_through_the_blob_store() {
    let shared = Arc::new(MemoryBlobStore::new());
    let mut store = LedgerStore::open(Box::new(shared.clone()));
    let account = store
        .create_account(
            NewAccount::new("Savings", AccountKind::Savings, "Acme Bank").with_balance(250.0),
        )
        .id;
    store.create_transaction(
        NewTransaction::new(
            TransactionKind::Expense,
            19.99,
            "Streaming",
            account,
            date(2025, 5, 21),
        )
        .with_category("Entertainment"),
    );
    store.create_goal(NewGoal::new("Laptop", 1500.0).with_current(300.0));
    store.create_bill(NewBill::new("Internet", 55.0, date(2025, 5, 28)));
    store.update_settings(SettingsPatch {
        currency: Some("GBP".into()),
        ..SettingsPatch::default()
    });

    let accounts = store.accounts().to_vec();
    let transactions = store.transactions().to_vec();
    let goals = store.goals().to_vec();
    let bills = store.bills().to_vec();
    let settings = store.settings().clone();
    drop(store);

    let reloaded = LedgerStore::open(Box::new(shared));
    assert_eq!(reloaded.accounts(), accounts.as_slice());
    assert_eq!(reloaded.transactions(), transactions.as_slice());
    assert_eq!(reloaded.goals(), goals.as_slice());
    assert_eq!(reloaded.bills(), bills.as_slice());
    assert_eq!(reloaded.settings(), &settings);
}

#[test]
fn reset_then_reload_yields_pristine_state() {
    let shared = Arc::new(MemoryBlobStore::new());
    let mut store = LedgerStore::open(Box::new(shared.clone()));
    let account = store
        .create_account(NewAccount::new("Checking", AccountKind::Checking, "Bank"))
        .id;
    store.create_transaction(NewTransaction::new(
        TransactionKind::Income,
        10.0,
        "tip",
        account,
        date(2025, 5, 22),
    ));
    store.create_goal(NewGoal::new("Gone", 1.0));
    store.reset_all();
    drop(store);

    assert!(shared.is_empty(), "reset removes every persisted blob");

    let fresh = LedgerStore::open(Box::new(shared));
    assert!(fresh.accounts().is_empty());
    assert!(fresh.transactions().is_empty());
    assert!(fresh.goals().is_empty());
    assert!(fresh.bills().is_empty());
    assert_eq!(fresh.categories().len(), 10);
    assert_eq!(fresh.categories()[0].name, "Housing");
    assert_eq!(fresh.settings(), &fintrack_domain::Settings::default());
}

#[test]
fn date_filters_use_exact_calendar_match() {
    let mut store = LedgerStore::open(Box::new(MemoryBlobStore::new()));
    let account = store
        .create_account(NewAccount::new("Cash", AccountKind::Cash, "Wallet"))
        .id;
    store.create_transaction(NewTransaction::new(
        TransactionKind::Expense,
        3.5,
        "Espresso",
        account,
        date(2025, 5, 23),
    ));
    store.create_bill(NewBill::new("Gym", 29.0, date(2025, 5, 23)));

    assert_eq!(store.transactions_on(date(2025, 5, 23)).len(), 1);
    assert_eq!(store.transactions_on(date(2025, 5, 24)).len(), 0);
    assert_eq!(store.bills_on(date(2025, 5, 23)).len(), 1);
    assert_eq!(store.bills_on(date(2025, 5, 22)).len(), 0);
}
