//! Inclusion selection
//!
//! `incluir` decides whether a visible item counts toward the session's
//! totals. It is independent of filter visibility: an excluded item still
//! shows in the list (dimmed) but contributes nothing to the aggregates.

use crate::models::{ItemId, PaymentItem};

/// The included subset of an already filtered list, order preserved
pub fn included<'a, I>(filtered: I) -> Vec<&'a PaymentItem>
where
    I: IntoIterator<Item = &'a PaymentItem>,
{
    filtered.into_iter().filter(|item| item.incluir).collect()
}

/// Set the inclusion flag of one item
///
/// Returns the previous value, or `None` if no item has that id.
pub fn set_inclusion(items: &mut [PaymentItem], id: &ItemId, include: bool) -> Option<bool> {
    items.iter_mut().find(|item| &item.id == id).map(|item| {
        let previous = item.incluir;
        item.incluir = include;
        previous
    })
}

/// Flip the inclusion flag of one item
///
/// Returns the new value, or `None` if no item has that id.
pub fn toggle_inclusion(items: &mut [PaymentItem], id: &ItemId) -> Option<bool> {
    items.iter_mut().find(|item| &item.id == id).map(|item| {
        item.incluir = !item.incluir;
        item.incluir
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountKey, Money, PaymentMethod};
    use chrono::{FixedOffset, TimeZone};

    fn items() -> Vec<PaymentItem> {
        let due = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 13, 9, 0, 0)
            .unwrap();
        (1..=3)
            .map(|i| {
                PaymentItem::new(
                    i.to_string().as_str(),
                    "Fornecedor",
                    AccountKey::new("Itaú", "Operacional"),
                    PaymentMethod::Pix,
                    due,
                    Money::from_units(i),
                )
            })
            .collect()
    }

    #[test]
    fn test_included_keeps_order_and_flag() {
        let mut items = items();
        items[1].incluir = false;

        let included = included(&items);
        let ids: Vec<_> = included.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_toggle_affects_only_target() {
        let mut items = items();
        let before = items.clone();

        assert_eq!(toggle_inclusion(&mut items, &ItemId::from("2")), Some(false));
        assert!(!items[1].incluir);
        assert_eq!(items[0], before[0]);
        assert_eq!(items[2], before[2]);

        assert_eq!(toggle_inclusion(&mut items, &ItemId::from("2")), Some(true));
        assert_eq!(items, before);
    }

    #[test]
    fn test_set_inclusion() {
        let mut items = items();
        assert_eq!(set_inclusion(&mut items, &ItemId::from("3"), false), Some(true));
        assert_eq!(set_inclusion(&mut items, &ItemId::from("3"), false), Some(false));
        assert!(!items[2].incluir);
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let mut items = items();
        let before = items.clone();
        assert_eq!(toggle_inclusion(&mut items, &ItemId::from("99")), None);
        assert_eq!(set_inclusion(&mut items, &ItemId::from("99"), false), None);
        assert_eq!(items, before);
    }
}
