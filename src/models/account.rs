//! Account model
//!
//! A funding account is identified by its (bank, account) pair. The
//! `"{bank} — {account}"` label is only ever derived for display; grouping
//! and lookups go through [`AccountKey`] so a bank or account name that
//! itself contains the separator cannot collide with another pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::{BorderoError, BorderoResult};

/// Separator used in the display label of an account
pub const ACCOUNT_LABEL_SEPARATOR: &str = " — ";

/// Composite identity of a funding account
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountKey {
    #[serde(rename = "banco")]
    pub bank: String,
    #[serde(rename = "conta")]
    pub account: String,
}

impl AccountKey {
    pub fn new(bank: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            bank: bank.into(),
            account: account.into(),
        }
    }

    /// Display label, e.g. `Itaú — Operacional`
    pub fn label(&self) -> String {
        format!("{}{}{}", self.bank, ACCOUNT_LABEL_SEPARATOR, self.account)
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.bank, ACCOUNT_LABEL_SEPARATOR, self.account)
    }
}

/// A registered funding account with its opening balance for the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(flatten)]
    pub key: AccountKey,

    /// Cash on hand when the session starts
    #[serde(rename = "saldoInicial")]
    pub opening_balance: Money,
}

impl Account {
    pub fn new(bank: impl Into<String>, account: impl Into<String>, opening_balance: Money) -> Self {
        Self {
            key: AccountKey::new(bank, account),
            opening_balance,
        }
    }

    /// Validate the account data
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.key.bank.trim().is_empty() {
            return Err(AccountValidationError::EmptyBank);
        }
        if self.key.account.trim().is_empty() {
            return Err(AccountValidationError::EmptyAccount);
        }
        Ok(())
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyBank,
    EmptyAccount,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBank => write!(f, "Bank name cannot be empty"),
            Self::EmptyAccount => write!(f, "Account label cannot be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// The session's read-only list of registered accounts
///
/// Keeps the configured order and guarantees unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Build a registry, rejecting invalid accounts and duplicate keys
    pub fn new(accounts: Vec<Account>) -> BorderoResult<Self> {
        for (i, account) in accounts.iter().enumerate() {
            account
                .validate()
                .map_err(|e| BorderoError::Validation(format!("{}: {}", account.key, e)))?;

            if accounts[..i].iter().any(|a| a.key == account.key) {
                return Err(BorderoError::duplicate_account(account.key.label()));
            }
        }
        Ok(Self { accounts })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &AccountKey) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.key == key)
    }

    pub fn contains(&self, key: &AccountKey) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Keys in registry order (used for the account filter choices)
    pub fn keys(&self) -> Vec<AccountKey> {
        self.accounts.iter().map(|a| a.key.clone()).collect()
    }
}

impl<'de> Deserialize<'de> for AccountRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let accounts = Vec::<Account>::deserialize(deserializer)?;
        Self::new(accounts).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a AccountRegistry {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}
