//! Domain model for tracked accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Identifiable, RecordId};

/// A bank, card, or cash account holding a running signed balance.
///
/// The balance is the account's running total: it moves only as a side
/// effect of transaction create/delete in the store, never directly through
/// a transaction write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Institution label shown alongside the account (bank, issuer, ...).
    pub institution: String,
    pub balance: f64,
    /// Only meaningful for [`AccountKind::Credit`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
}

impl Identifiable for Account {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Field set for a new account before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub institution: String,
    pub balance: f64,
    pub credit_limit: Option<f64>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, kind: AccountKind, institution: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            institution: institution.into(),
            balance: 0.0,
            credit_limit: None,
        }
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_credit_limit(mut self, limit: f64) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn into_account(self, id: RecordId) -> Account {
        Account {
            id,
            name: self.name,
            kind: self.kind,
            institution: self.institution,
            balance: self.balance,
            credit_limit: self.credit_limit,
        }
    }
}

/// Shallow changeset for [`Account`]; `None` fields keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<AccountKind>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub credit_limit: Option<f64>,
}

impl AccountPatch {
    /// Overwrites only the fields the patch carries.
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(kind) = self.kind {
            account.kind = kind;
        }
        if let Some(institution) = self.institution {
            account.institution = institution;
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
        if let Some(limit) = self.credit_limit {
            account.credit_limit = Some(limit);
        }
    }
}

/// Supported account flavours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Business,
    Credit,
    Investment,
    Cash,
}

impl AccountKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "checking" => Some(AccountKind::Checking),
            "savings" => Some(AccountKind::Savings),
            "business" => Some(AccountKind::Business),
            "credit" => Some(AccountKind::Credit),
            "investment" => Some(AccountKind::Investment),
            "cash" => Some(AccountKind::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
            AccountKind::Business => "Business",
            AccountKind::Credit => "Credit",
            AccountKind::Investment => "Investment",
            AccountKind::Cash => "Cash",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overwrites_only_provided_fields() {
        let mut account = NewAccount::new("Everyday", AccountKind::Checking, "Acme Bank")
            .with_balance(120.0)
            .into_account(1);
        AccountPatch {
            name: Some("Everyday+".into()),
            balance: Some(80.0),
            ..AccountPatch::default()
        }
        .apply(&mut account);
        assert_eq!(account.name, "Everyday+");
        assert_eq!(account.balance, 80.0);
        assert_eq!(account.kind, AccountKind::Checking);
        assert_eq!(account.institution, "Acme Bank");
    }

    #[test]
    fn serializes_kind_lowercase() {
        let account = NewAccount::new("Card", AccountKind::Credit, "Issuer")
            .with_credit_limit(2500.0)
            .into_account(9);
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"type\":\"credit\""));
        assert!(json.contains("\"creditLimit\":2500.0"));
    }
}
