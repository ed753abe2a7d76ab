//! Balance projection
//!
//! Projects each funding account's balance after paying the included items:
//! `projected = opening - outflow`. Accounts that appear on items but not in
//! the registry are projected from a zero opening balance and flagged as
//! inferred so the caller can tell them apart.

use serde::Serialize;
use std::fmt;

use crate::models::{AccountKey, AccountRegistry, Money, PaymentItem};

/// Where an account in the projection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountOrigin {
    /// Listed in the account registry
    Registered,
    /// Only referenced by an included item
    Inferred,
}

impl fmt::Display for AccountOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered => write!(f, "registered"),
            Self::Inferred => write!(f, "inferred"),
        }
    }
}

/// Projected balance for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountProjection {
    pub key: AccountKey,
    pub opening: Money,
    pub outflow: Money,
    pub projected: Money,
    pub origin: AccountOrigin,
}

impl AccountProjection {
    fn new(key: AccountKey, opening: Money, origin: AccountOrigin) -> Self {
        Self {
            key,
            opening,
            outflow: Money::zero(),
            projected: opening,
            origin,
        }
    }

    fn charge(&mut self, value: Money) {
        self.outflow += value;
        self.projected = self.opening - self.outflow;
    }

    /// Whether the payments exceed the opening balance
    pub fn is_overdrawn(&self) -> bool {
        self.projected.is_negative()
    }
}

/// Projection of every account touched by the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BalanceProjection {
    accounts: Vec<AccountProjection>,
}

impl BalanceProjection {
    /// Project balances from the registry and the included items
    ///
    /// Registry accounts come first in registry order, followed by inferred
    /// accounts in the order they first appear among the items.
    pub fn compute<'a, I>(registry: &AccountRegistry, included: I) -> Self
    where
        I: IntoIterator<Item = &'a PaymentItem>,
    {
        let mut accounts: Vec<AccountProjection> = registry
            .iter()
            .map(|a| AccountProjection::new(a.key.clone(), a.opening_balance, AccountOrigin::Registered))
            .collect();

        for item in included {
            let index = match accounts.iter().position(|p| item.is_charged_to(&p.key)) {
                Some(index) => index,
                None => {
                    accounts.push(AccountProjection::new(
                        item.account_key(),
                        Money::zero(),
                        AccountOrigin::Inferred,
                    ));
                    accounts.len() - 1
                }
            };
            accounts[index].charge(item.value);
        }

        Self { accounts }
    }

    pub fn get(&self, key: &AccountKey) -> Option<&AccountProjection> {
        self.accounts.iter().find(|p| &p.key == key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccountProjection> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts that had no registry entry
    pub fn inferred(&self) -> impl Iterator<Item = &AccountProjection> {
        self.accounts
            .iter()
            .filter(|p| p.origin == AccountOrigin::Inferred)
    }

    pub fn total_outflow(&self) -> Money {
        self.accounts.iter().map(|p| p.outflow).sum()
    }
}

impl<'a> IntoIterator for &'a BalanceProjection {
    type Item = &'a AccountProjection;
    type IntoIter = std::slice::Iter<'a, AccountProjection>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}
