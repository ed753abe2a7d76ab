//! Weekly aggregation
//!
//! Sums the included items three ways: by funding account, by payment method
//! and by cost center. Each grouping keeps the order in which its keys are
//! first seen, so a manual reorder of the list shows up in the summary.

use serde::Serialize;

use crate::models::{AccountKey, Money, PaymentItem, PaymentMethod};

/// Totals of the included items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Groupings {
    pub by_account: Vec<(AccountKey, Money)>,
    pub by_method: Vec<(PaymentMethod, Money)>,
    pub by_cost_center: Vec<(String, Money)>,
}

impl Groupings {
    /// Aggregate the included items
    pub fn compute<'a, I>(included: I) -> Self
    where
        I: IntoIterator<Item = &'a PaymentItem>,
    {
        let mut groupings = Self::default();
        for item in included {
            accumulate(&mut groupings.by_account, item.account_key(), item.value);
            accumulate(&mut groupings.by_method, item.method, item.value);
            accumulate(&mut groupings.by_cost_center, item.cost_center.clone(), item.value);
        }
        groupings
    }

    /// Grand total, taken from the account grouping
    pub fn total(&self) -> Money {
        self.by_account.iter().map(|(_, v)| v).sum()
    }

    /// Whether the three groupings partition the same total
    pub fn is_consistent(&self) -> bool {
        let total = self.total();
        let by_method: Money = self.by_method.iter().map(|(_, v)| v).sum();
        let by_cost_center: Money = self.by_cost_center.iter().map(|(_, v)| v).sum();
        by_method == total && by_cost_center == total
    }

    pub fn is_empty(&self) -> bool {
        self.by_account.is_empty()
    }

    /// Subtotal for one account, zero if it has no included items
    pub fn account_total(&self, key: &AccountKey) -> Money {
        self.by_account
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }
}

fn accumulate<K: PartialEq>(groups: &mut Vec<(K, Money)>, key: K, value: Money) {
    match groups.iter_mut().find(|(k, _)| *k == key) {
        Some((_, total)) => *total += value,
        None => groups.push((key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn item(id: &str, bank: &str, method: PaymentMethod, cost_center: &str, cents: i64) -> PaymentItem {
        let due = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 13, 9, 0, 0)
            .unwrap();
        PaymentItem::new(
            id,
            "Fornecedor",
            AccountKey::new(bank, "Operacional"),
            method,
            due,
            Money::from_cents(cents),
        )
        .with_cost_center(cost_center)
    }

    #[test]
    fn test_groupings_in_first_seen_order() {
        let items = vec![
            item("1", "Itaú", PaymentMethod::Pix, "Manutenção", 320000),
            item("2", "Bradesco", PaymentMethod::Ted, "Projetos", 820000),
            item("3", "Itaú", PaymentMethod::Boleto, "Manutenção", 540000),
        ];

        let groupings = Groupings::compute(&items);

        assert_eq!(
            groupings.by_account,
            vec![
                (AccountKey::new("Itaú", "Operacional"), Money::from_units(8600)),
                (AccountKey::new("Bradesco", "Operacional"), Money::from_units(8200)),
            ]
        );
        assert_eq!(groupings.by_method.len(), 3);
        assert_eq!(groupings.by_method[0].0, PaymentMethod::Pix);
        assert_eq!(
            groupings.by_cost_center,
            vec![
                ("Manutenção".to_string(), Money::from_units(8600)),
                ("Projetos".to_string(), Money::from_units(8200)),
            ]
        );
        assert_eq!(groupings.total(), Money::from_units(16800));
        assert!(groupings.is_consistent());
    }

    #[test]
    fn test_exact_decimal_summation() {
        // 0.10 added ten times is exactly 1.00
        let items: Vec<_> = (0..10)
            .map(|i| item(&i.to_string(), "Itaú", PaymentMethod::Pix, "", 10))
            .collect();
        let groupings = Groupings::compute(&items);
        assert_eq!(groupings.total(), Money::from_units(1));
        assert_eq!(groupings.by_cost_center, vec![(String::new(), Money::from_units(1))]);
    }

    #[test]
    fn test_empty_input() {
        let groupings = Groupings::compute(std::iter::empty());
        assert!(groupings.is_empty());
        assert!(groupings.by_method.is_empty());
        assert!(groupings.by_cost_center.is_empty());
        assert_eq!(groupings.total(), Money::zero());
        assert!(groupings.is_consistent());
    }

    #[test]
    fn test_order_follows_list_order() {
        let mut items = vec![
            item("1", "Itaú", PaymentMethod::Pix, "A", 100),
            item("2", "Bradesco", PaymentMethod::Pix, "A", 100),
        ];
        items.swap(0, 1);
        let groupings = Groupings::compute(&items);
        assert_eq!(groupings.by_account[0].0.bank, "Bradesco");
        assert_eq!(
            groupings.account_total(&AccountKey::new("Itaú", "Operacional")),
            Money::from_cents(100)
        );
        assert_eq!(
            groupings.account_total(&AccountKey::new("Santander", "Captação")),
            Money::zero()
        );
    }
}
