//! The Ledger Store: owner of all financial collections.
//!
//! All mutation funnels through here. Account balances are maintained as a
//! side effect of transaction create/delete only; updating a transaction in
//! place deliberately leaves balances alone (callers that need exact
//! balances across edits delete and re-create instead). Every mutating
//! operation re-serializes the affected collections in full; a failed write
//! is logged and the in-memory state stays authoritative until the next
//! successful write.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use fintrack_domain::{
    default_categories, Account, AccountPatch, Bill, Category, CategoryPatch, Frequency, Goal,
    GoalPatch, IdSequence, Identifiable, NewAccount, NewBill, NewCategory, NewGoal,
    NewTransaction, RecordId, Settings, SettingsPatch, Transaction, TransactionKind,
    TransactionPatch,
};

use crate::storage::{BlobStore, Collection};

pub struct LedgerStore {
    pub(crate) accounts: Vec<Account>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) categories: Vec<Category>,
    pub(crate) goals: Vec<Goal>,
    pub(crate) bills: Vec<Bill>,
    pub(crate) settings: Settings,
    ids: IdSequence,
    storage: Box<dyn BlobStore>,
}

impl LedgerStore {
    /// Loads every collection from the blob store, substituting defaults
    /// when a key is absent or its blob does not parse.
    pub fn open(storage: Box<dyn BlobStore>) -> Self {
        let accounts: Vec<Account> =
            load_or_default(storage.as_ref(), Collection::Accounts, Vec::new());
        let transactions: Vec<Transaction> =
            load_or_default(storage.as_ref(), Collection::Transactions, Vec::new());
        let categories: Vec<Category> = load_or_default(
            storage.as_ref(),
            Collection::Categories,
            default_categories(),
        );
        let goals: Vec<Goal> = load_or_default(storage.as_ref(), Collection::Goals, Vec::new());
        let bills: Vec<Bill> = load_or_default(storage.as_ref(), Collection::Bills, Vec::new());
        let settings: Settings =
            load_or_default(storage.as_ref(), Collection::Settings, Settings::default());

        let mut ids = IdSequence::default();
        for id in accounts
            .iter()
            .map(Identifiable::id)
            .chain(transactions.iter().map(Identifiable::id))
            .chain(categories.iter().map(Identifiable::id))
            .chain(goals.iter().map(Identifiable::id))
            .chain(bills.iter().map(Identifiable::id))
        {
            ids.observe(id);
        }

        Self {
            accounts,
            transactions,
            categories,
            goals,
            bills,
            settings,
            ids,
            storage,
        }
    }

    // ---- read access -------------------------------------------------

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn account(&self, id: RecordId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn transaction(&self, id: RecordId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: RecordId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn goal(&self, id: RecordId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Transactions dated exactly `date`.
    pub fn transactions_on(&self, date: chrono::NaiveDate) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| t.date == date).collect()
    }

    /// Bills due exactly on `date`.
    pub fn bills_on(&self, date: chrono::NaiveDate) -> Vec<&Bill> {
        self.bills.iter().filter(|b| b.due_date == date).collect()
    }

    // ---- accounts ----------------------------------------------------

    pub fn create_account(&mut self, new: NewAccount) -> Account {
        let account = new.into_account(self.ids.next_id());
        self.accounts.push(account.clone());
        self.persist(Collection::Accounts);
        account
    }

    /// Shallow-merges `patch`; `None` when no account carries `id`.
    pub fn update_account(&mut self, id: RecordId, patch: AccountPatch) -> Option<Account> {
        let account = self.accounts.iter_mut().find(|a| a.id == id)?;
        patch.apply(account);
        let updated = account.clone();
        self.persist(Collection::Accounts);
        Some(updated)
    }

    /// Removes the account record only. Transactions referencing it are left
    /// in place; callers wanting a cascade run
    /// [`purge_account_transactions`](Self::purge_account_transactions) first.
    pub fn delete_account(&mut self, id: RecordId) -> Option<Account> {
        let index = self.accounts.iter().position(|a| a.id == id)?;
        let removed = self.accounts.remove(index);
        self.persist(Collection::Accounts);
        Some(removed)
    }

    /// Drops every transaction referencing `account_id` without touching any
    /// balance (the account is normally about to be deleted). Returns the
    /// number of transactions removed.
    pub fn purge_account_transactions(&mut self, account_id: RecordId) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.account_id != account_id);
        let removed = before - self.transactions.len();
        if removed > 0 {
            self.persist(Collection::Transactions);
        }
        removed
    }

    // ---- transactions ------------------------------------------------

    /// Stores the transaction and applies its balance effect: income adds
    /// the magnitude to the referenced account, expense subtracts it, and a
    /// transfer moves nothing. An unknown account id leaves every balance
    /// untouched while the transaction is still stored.
    pub fn create_transaction(&mut self, new: NewTransaction) -> Transaction {
        let txn = new.into_transaction(self.ids.next_id());
        let mut accounts_touched = false;
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == txn.account_id) {
            match txn.kind {
                TransactionKind::Income => account.balance += txn.magnitude(),
                TransactionKind::Expense => account.balance -= txn.magnitude(),
                TransactionKind::Transfer => {}
            }
            accounts_touched = !matches!(txn.kind, TransactionKind::Transfer);
        } else {
            debug!(account = txn.account_id, "transaction references unknown account");
        }
        self.transactions.push(txn.clone());
        if accounts_touched {
            self.persist(Collection::Accounts);
        }
        self.persist(Collection::Transactions);
        txn
    }

    /// Fans a repeating entry out into `times` stored transactions with
    /// dates stepped by `frequency`. No recurrence metadata survives
    /// creation; each occurrence is an independent record.
    pub fn create_recurring(
        &mut self,
        new: NewTransaction,
        frequency: Frequency,
        times: u32,
    ) -> Vec<Transaction> {
        frequency
            .schedule(new.date, times.max(1))
            .into_iter()
            .map(|date| {
                let mut occurrence = new.clone();
                occurrence.date = date;
                self.create_transaction(occurrence)
            })
            .collect()
    }

    /// Shallow-merges `patch` without reversing or reapplying any balance
    /// delta. Balances move only at create/delete time, so editing an
    /// amount or kind in place leaves the owning account's balance exactly
    /// where it was.
    pub fn update_transaction(&mut self, id: RecordId, patch: TransactionPatch) -> Option<Transaction> {
        let txn = self.transactions.iter_mut().find(|t| t.id == id)?;
        patch.apply(txn);
        let updated = txn.clone();
        self.persist(Collection::Transactions);
        Some(updated)
    }

    /// Removes the transaction and reverses the balance effect applied at
    /// create time (exact inverse, so create-then-delete restores the
    /// original balance bit for bit).
    pub fn delete_transaction(&mut self, id: RecordId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        let removed = self.transactions.remove(index);
        if let Some(account) = self
            .accounts
            .iter_mut()
            .find(|a| a.id == removed.account_id)
        {
            match removed.kind {
                TransactionKind::Income => account.balance -= removed.magnitude(),
                TransactionKind::Expense => account.balance += removed.magnitude(),
                TransactionKind::Transfer => {}
            }
            if !matches!(removed.kind, TransactionKind::Transfer) {
                self.persist(Collection::Accounts);
            }
        }
        self.persist(Collection::Transactions);
        Some(removed)
    }

    // ---- categories --------------------------------------------------

    pub fn create_category(&mut self, new: NewCategory) -> Category {
        let category = new.into_category(self.ids.next_id());
        self.categories.push(category.clone());
        self.persist(Collection::Categories);
        category
    }

    /// Shallow-merges `patch`. A rename does not rewrite transactions that
    /// reference the old name; they simply stop matching.
    pub fn update_category(&mut self, id: RecordId, patch: CategoryPatch) -> Option<Category> {
        let category = self.categories.iter_mut().find(|c| c.id == id)?;
        patch.apply(category);
        let updated = category.clone();
        self.persist(Collection::Categories);
        Some(updated)
    }

    // ---- goals -------------------------------------------------------

    pub fn create_goal(&mut self, new: NewGoal) -> Goal {
        let goal = new.into_goal(self.ids.next_id());
        self.goals.push(goal.clone());
        self.persist(Collection::Goals);
        goal
    }

    pub fn update_goal(&mut self, id: RecordId, patch: GoalPatch) -> Option<Goal> {
        let goal = self.goals.iter_mut().find(|g| g.id == id)?;
        patch.apply(goal);
        let updated = goal.clone();
        self.persist(Collection::Goals);
        Some(updated)
    }

    pub fn delete_goal(&mut self, id: RecordId) -> Option<Goal> {
        let index = self.goals.iter().position(|g| g.id == id)?;
        let removed = self.goals.remove(index);
        self.persist(Collection::Goals);
        Some(removed)
    }

    // ---- bills -------------------------------------------------------

    pub fn create_bill(&mut self, new: NewBill) -> Bill {
        let bill = new.into_bill(self.ids.next_id());
        self.bills.push(bill.clone());
        self.persist(Collection::Bills);
        bill
    }

    // ---- settings ----------------------------------------------------

    pub fn update_settings(&mut self, patch: SettingsPatch) -> &Settings {
        patch.apply(&mut self.settings);
        self.persist(Collection::Settings);
        &self.settings
    }

    // ---- reset -------------------------------------------------------

    /// Empties every collection, restores the fixed default category set and
    /// default settings, and removes all persisted blobs.
    pub fn reset_all(&mut self) {
        self.accounts.clear();
        self.transactions.clear();
        self.categories = default_categories();
        self.goals.clear();
        self.bills.clear();
        self.settings = Settings::default();

        let mut ids = IdSequence::default();
        for category in &self.categories {
            ids.observe(category.id);
        }
        self.ids = ids;

        for collection in Collection::ALL {
            if let Err(err) = self.storage.remove(collection.key()) {
                warn!(key = collection.key(), %err, "failed to remove persisted blob");
            }
        }
    }

    // ---- persistence -------------------------------------------------

    /// Serializes the collection and writes it in full. Failures are logged
    /// and swallowed: the in-memory state stays mutated, diverging from
    /// durable storage until the next successful write.
    fn persist(&mut self, collection: Collection) {
        let payload = match collection {
            Collection::Accounts => serde_json::to_string(&self.accounts),
            Collection::Transactions => serde_json::to_string(&self.transactions),
            Collection::Categories => serde_json::to_string(&self.categories),
            Collection::Goals => serde_json::to_string(&self.goals),
            Collection::Bills => serde_json::to_string(&self.bills),
            Collection::Settings => serde_json::to_string(&self.settings),
        };
        match payload {
            Ok(raw) => {
                if let Err(err) = self.storage.set(collection.key(), &raw) {
                    warn!(key = collection.key(), %err, "persist failed; memory and storage have diverged");
                }
            }
            Err(err) => {
                warn!(key = collection.key(), %err, "failed to serialize collection");
            }
        }
    }
}

fn load_or_default<T: DeserializeOwned>(
    storage: &dyn BlobStore,
    collection: Collection,
    default: T,
) -> T {
    match storage.get(collection.key()) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = collection.key(), %err, "malformed blob; falling back to defaults");
                default
            }
        },
        Ok(None) => default,
        Err(err) => {
            warn!(key = collection.key(), %err, "blob load failed; falling back to defaults");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use fintrack_domain::{AccountKind, TransactionKind};

    use super::*;
    use crate::storage::MemoryBlobStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_store() -> LedgerStore {
        LedgerStore::open(Box::new(MemoryBlobStore::new()))
    }

    fn checking(store: &mut LedgerStore, balance: f64) -> RecordId {
        store
            .create_account(
                NewAccount::new("Checking", AccountKind::Checking, "Acme Bank")
                    .with_balance(balance),
            )
            .id
    }

    #[test]
    fn fresh_store_starts_with_default_categories_and_settings() {
        let store = open_store();
        assert!(store.accounts().is_empty());
        assert_eq!(store.categories().len(), 10);
        assert_eq!(store.settings().currency, "USD");
    }

    #[test]
    fn income_adds_and_expense_subtracts_from_balance() {
        let mut store = open_store();
        let account = checking(&mut store, 1000.0);
        store.create_transaction(NewTransaction::new(
            TransactionKind::Income,
            250.0,
            "Refund",
            account,
            date(2025, 2, 3),
        ));
        store.create_transaction(NewTransaction::new(
            TransactionKind::Expense,
            100.0,
            "Groceries",
            account,
            date(2025, 2, 4),
        ));
        assert_eq!(store.account(account).unwrap().balance, 1150.0);
    }

    #[test]
    fn transfer_moves_no_balance() {
        let mut store = open_store();
        let account = checking(&mut store, 500.0);
        store.create_transaction(NewTransaction::new(
            TransactionKind::Transfer,
            200.0,
            "To savings",
            account,
            date(2025, 2, 5),
        ));
        assert_eq!(store.account(account).unwrap().balance, 500.0);
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn unknown_account_stores_transaction_without_balance_effect() {
        let mut store = open_store();
        let account = checking(&mut store, 300.0);
        store.create_transaction(NewTransaction::new(
            TransactionKind::Expense,
            50.0,
            "Orphan",
            9999,
            date(2025, 2, 6),
        ));
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.account(account).unwrap().balance, 300.0);
    }

    #[test]
    fn delete_reverses_the_create_time_balance_effect() {
        let mut store = open_store();
        let account = checking(&mut store, 1000.0);
        let txn = store.create_transaction(NewTransaction::new(
            TransactionKind::Expense,
            150.0,
            "Dinner",
            account,
            date(2025, 2, 7),
        ));
        assert_eq!(store.account(account).unwrap().balance, 850.0);
        let removed = store.delete_transaction(txn.id);
        assert!(removed.is_some());
        assert_eq!(store.account(account).unwrap().balance, 1000.0);
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn update_transaction_leaves_balance_untouched() {
        // Preserved asymmetry: edits merge fields only; balances move at
        // create/delete time.
        let mut store = open_store();
        let account = checking(&mut store, 1000.0);
        let txn = store.create_transaction(NewTransaction::new(
            TransactionKind::Expense,
            100.0,
            "Dinner",
            account,
            date(2025, 2, 8),
        ));
        let updated = store
            .update_transaction(
                txn.id,
                TransactionPatch {
                    amount: Some(-400.0),
                    ..TransactionPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, -400.0);
        assert_eq!(store.account(account).unwrap().balance, 900.0);
    }

    #[test]
    fn missing_ids_are_silent_no_ops() {
        let mut store = open_store();
        assert!(store.update_account(42, AccountPatch::default()).is_none());
        assert!(store.delete_account(42).is_none());
        assert!(store
            .update_transaction(42, TransactionPatch::default())
            .is_none());
        assert!(store.delete_transaction(42).is_none());
        assert!(store.delete_goal(42).is_none());
    }

    #[test]
    fn recurring_fan_out_creates_independent_transactions() {
        let mut store = open_store();
        let account = checking(&mut store, 0.0);
        let created = store.create_recurring(
            NewTransaction::new(
                TransactionKind::Income,
                1000.0,
                "Paycheck",
                account,
                date(2025, 1, 31),
            ),
            Frequency::Monthly,
            3,
        );
        assert_eq!(created.len(), 3);
        assert_eq!(created[0].date, date(2025, 1, 31));
        assert_eq!(created[1].date, date(2025, 2, 28));
        assert_eq!(created[2].date, date(2025, 3, 31));
        assert_eq!(store.account(account).unwrap().balance, 3000.0);
    }

    #[test]
    fn purge_removes_account_transactions_without_balance_changes() {
        let mut store = open_store();
        let keep = checking(&mut store, 100.0);
        let drop = store
            .create_account(NewAccount::new("Old", AccountKind::Savings, "Acme Bank"))
            .id;
        store.create_transaction(NewTransaction::new(
            TransactionKind::Expense,
            10.0,
            "Keep",
            keep,
            date(2025, 3, 1),
        ));
        store.create_transaction(NewTransaction::new(
            TransactionKind::Income,
            20.0,
            "Drop",
            drop,
            date(2025, 3, 2),
        ));
        let removed = store.purge_account_transactions(drop);
        assert_eq!(removed, 1);
        assert_eq!(store.transactions().len(), 1);
        // keep's balance reflects its own expense only
        assert_eq!(store.account(keep).unwrap().balance, 90.0);
    }

    #[test]
    fn category_rename_does_not_cascade() {
        let mut store = open_store();
        let account = checking(&mut store, 0.0);
        let category = store.create_category(NewCategory::new("Pets", 50.0, "#112233"));
        store.create_transaction(
            NewTransaction::new(
                TransactionKind::Expense,
                12.0,
                "Kibble",
                account,
                date(2025, 3, 3),
            )
            .with_category("Pets"),
        );
        store.update_category(
            category.id,
            CategoryPatch {
                name: Some("Animals".into()),
                ..CategoryPatch::default()
            },
        );
        assert_eq!(
            store.transactions()[0].category.as_deref(),
            Some("Pets"),
            "soft reference keeps the old name"
        );
    }

    #[test]
    fn ids_stay_monotonic_across_reloads() {
        let shared = std::sync::Arc::new(MemoryBlobStore::new());
        let mut store = LedgerStore::open(Box::new(shared.clone()));
        let first = checking(&mut store, 0.0);
        let second = checking(&mut store, 0.0);
        assert!(second > first);
        drop(store);

        let mut reopened = LedgerStore::open(Box::new(shared));
        let third = reopened
            .create_account(NewAccount::new("C", AccountKind::Cash, "Wallet"))
            .id;
        assert!(third > second, "sequence reseeds past persisted ids");
    }

    #[test]
    fn reset_all_restores_defaults_and_clears_storage() {
        let mut store = open_store();
        let account = checking(&mut store, 50.0);
        store.create_transaction(NewTransaction::new(
            TransactionKind::Expense,
            5.0,
            "Snack",
            account,
            date(2025, 4, 1),
        ));
        store.create_goal(NewGoal::new("Trip", 800.0));
        store.create_bill(NewBill::new("Rent", 1200.0, date(2025, 4, 28)));
        store.update_settings(SettingsPatch {
            currency: Some("EUR".into()),
            ..SettingsPatch::default()
        });

        store.reset_all();

        assert!(store.accounts().is_empty());
        assert!(store.transactions().is_empty());
        assert!(store.goals().is_empty());
        assert!(store.bills().is_empty());
        assert_eq!(store.categories().len(), 10);
        assert_eq!(store.settings().currency, "USD");
    }

    #[test]
    fn malformed_blob_falls_back_to_defaults() {
        let storage = MemoryBlobStore::new();
        storage.set("categories", "{ not json").unwrap();
        storage.set("accounts", "[{\"bogus\": true}]").unwrap();
        let store = LedgerStore::open(Box::new(storage));
        assert_eq!(store.categories().len(), 10);
        assert!(store.accounts().is_empty());
    }

    struct FailingBlobStore;

    impl BlobStore for FailingBlobStore {
        fn get(&self, _key: &str) -> Result<Option<String>, crate::CoreError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _blob: &str) -> Result<(), crate::CoreError> {
            Err(crate::CoreError::Storage("disk full".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), crate::CoreError> {
            Err(crate::CoreError::Storage("disk full".into()))
        }
    }

    #[test]
    fn persistence_failure_leaves_memory_mutated() {
        let mut store = LedgerStore::open(Box::new(FailingBlobStore));
        let account = store.create_account(NewAccount::new(
            "Checking",
            AccountKind::Checking,
            "Acme Bank",
        ));
        assert_eq!(store.accounts().len(), 1);
        assert!(store.account(account.id).is_some());
    }
}
