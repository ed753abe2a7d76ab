//! Manual ordering of the master list
//!
//! Presentation order is the master list order. Moving an item swaps it with
//! its neighbour; nothing else about the item or the totals changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ItemId, PaymentItem};

/// Direction of a manual move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "cima" | "subir" => Some(Self::Up),
            "down" | "baixo" | "descer" => Some(Self::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Swap the item with its neighbour in `direction`
///
/// A missing id, moving the first item up or moving the last item down
/// leaves the list untouched. Returns whether a swap happened.
pub fn move_item(items: &mut [PaymentItem], id: &ItemId, direction: Direction) -> bool {
    let Some(index) = items.iter().position(|item| &item.id == id) else {
        return false;
    };

    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&t| t < items.len()),
    };

    match target {
        Some(target) => {
            items.swap(index, target);
            true
        }
        None => false,
    }
}

/// Position of an item in the master list
pub fn position_of(items: &[PaymentItem], id: &ItemId) -> Option<usize> {
    items.iter().position(|item| &item.id == id)
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
        ["a", "b", "c"]
            .iter()
            .map(|id| {
                PaymentItem::new(
                    *id,
                    "Fornecedor",
                    AccountKey::new("Itaú", "Operacional"),
                    PaymentMethod::Boleto,
                    due,
                    Money::from_units(10),
                )
            })
            .collect()
    }

    fn ids(items: &[PaymentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_move_up_and_down() {
        let mut items = items();

        assert!(move_item(&mut items, &ItemId::from("b"), Direction::Up));
        assert_eq!(ids(&items), vec!["b", "a", "c"]);

        assert!(move_item(&mut items, &ItemId::from("a"), Direction::Down));
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
        assert_eq!(position_of(&items, &ItemId::from("a")), Some(2));
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut items = items();
        let before = items.clone();

        assert!(!move_item(&mut items, &ItemId::from("a"), Direction::Up));
        assert_eq!(items, before);

        assert!(!move_item(&mut items, &ItemId::from("c"), Direction::Down));
        assert_eq!(items, before);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut items = items();
        let before = items.clone();
        assert!(!move_item(&mut items, &ItemId::from("zz"), Direction::Down));
        assert_eq!(items, before);
    }

    #[test]
    fn test_empty_and_single_lists() {
        let mut empty: Vec<PaymentItem> = Vec::new();
        assert!(!move_item(&mut empty, &ItemId::from("a"), Direction::Up));

        let mut single = items();
        single.truncate(1);
        assert!(!move_item(&mut single, &ItemId::from("a"), Direction::Down));
        assert!(!move_item(&mut single, &ItemId::from("a"), Direction::Up));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("UP"), Some(Direction::Up));
        assert_eq!(Direction::parse("descer"), Some(Direction::Down));
        assert_eq!(Direction::parse("left"), None);
    }
}
