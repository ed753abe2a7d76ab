//! Item filtering
//!
//! Two stages, applied in order: week selection narrows the master list to
//! items due inside the period, then [`FilterCriteria`] narrows by account,
//! status and free text. Neither stage touches the items themselves.

use serde::{Deserialize, Serialize};

use crate::models::item::DueDateError;
use crate::models::{AccountKey, ItemId, ItemStatus, PaymentItem, WeekPeriod};

/// Account criterion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountFilter {
    /// Sentinel: every account
    #[default]
    All,
    /// Only items charged to this account
    Only(AccountKey),
}

impl AccountFilter {
    pub fn matches(&self, item: &PaymentItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(key) => item.is_charged_to(key),
        }
    }
}

/// Status criterion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Sentinel: every status
    #[default]
    All,
    Only(ItemStatus),
    /// A status label that names no known status; matches nothing
    Unrecognized(String),
}

impl StatusFilter {
    /// Build a filter from a user label, keeping unknown labels as a no-match filter
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("todos")
            || trimmed.eq_ignore_ascii_case("all")
        {
            return Self::All;
        }
        match ItemStatus::parse(trimmed) {
            Some(status) => Self::Only(status),
            None => Self::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn matches(&self, item: &PaymentItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => item.status == *status,
            Self::Unrecognized(_) => false,
        }
    }
}

/// The three criteria of the filter bar, combined with AND
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub account: AccountFilter,
    pub status: StatusFilter,
    /// Case-insensitive substring of supplier, description and cost center
    pub search: String,
}

impl FilterCriteria {
    /// All-sentinel criteria: matches every item
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, key: AccountKey) -> Self {
        self.account = AccountFilter::Only(key);
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Whether no criterion narrows anything
    pub fn is_unfiltered(&self) -> bool {
        self.account == AccountFilter::All
            && self.status == StatusFilter::All
            && self.search.is_empty()
    }

    pub fn matches(&self, item: &PaymentItem) -> bool {
        self.account.matches(item) && self.status.matches(item) && self.matches_search(item)
    }

    fn matches_search(&self, item: &PaymentItem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        item.search_text()
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }
}

/// An item whose due date could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueDateIssue {
    pub id: ItemId,
    pub raw: String,
    pub error: String,
}

impl DueDateIssue {
    fn new(item: &PaymentItem, error: DueDateError) -> Self {
        Self {
            id: item.id.clone(),
            raw: item.due.clone(),
            error: error.to_string(),
        }
    }
}

/// Result of week selection
///
/// Unreadable due dates are reported separately from "not this week" so the
/// caller decides whether to surface them; they never abort the selection.
#[derive(Debug, Clone, Default)]
pub struct WeekSelection<'a> {
    pub items: Vec<&'a PaymentItem>,
    pub issues: Vec<DueDateIssue>,
}

/// Where an item falls relative to a week
pub fn week_membership(item: &PaymentItem, period: &WeekPeriod) -> Result<bool, DueDateError> {
    item.due_at(period.offset())
        .map(|instant| period.contains(&instant))
}

/// Select the items due within `[period.start, period.end]`, both ends inclusive
pub fn select_week<'a, I>(items: I, period: &WeekPeriod) -> WeekSelection<'a>
where
    I: IntoIterator<Item = &'a PaymentItem>,
{
    let mut selection = WeekSelection::default();
    for item in items {
        match week_membership(item, period) {
            Ok(true) => selection.items.push(item),
            Ok(false) => {}
            Err(e) => selection.issues.push(DueDateIssue::new(item, e)),
        }
    }
    selection
}

/// Narrow items by the filter criteria, preserving order
pub fn apply_criteria<'a, I>(items: I, criteria: &FilterCriteria) -> Vec<&'a PaymentItem>
where
    I: IntoIterator<Item = &'a PaymentItem>,
{
    items
        .into_iter()
        .filter(|item| criteria.matches(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentMethod};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<FixedOffset> {
        brt().with_ymd_and_hms(2025, 1, d, h, 0, 0).unwrap()
    }

    fn item(id: &str, bank: &str, account: &str, due: DateTime<FixedOffset>) -> PaymentItem {
        PaymentItem::new(
            id,
            format!("Fornecedor {}", id),
            AccountKey::new(bank, account),
            PaymentMethod::Ted,
            due,
            Money::from_units(100),
        )
    }

    fn week() -> WeekPeriod {
        WeekPeriod::containing(at(15, 12))
    }

    #[test]
    fn test_select_week_closed_interval() {
        let period = week();
        let mut on_end = item("end", "Itaú", "Operacional", at(15, 0));
        on_end.due = period.end.to_rfc3339();
        let mut after_end = item("after", "Itaú", "Operacional", at(15, 0));
        after_end.due = (period.end + Duration::milliseconds(1)).to_rfc3339();
        let mut on_start = item("start", "Itaú", "Operacional", at(15, 0));
        on_start.due = period.start.to_rfc3339();

        let items = vec![on_start, on_end, after_end];
        let selection = select_week(&items, &period);

        let ids: Vec<_> = selection.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["start", "end"]);
        assert!(selection.issues.is_empty());
    }

    #[test]
    fn test_select_week_reports_unparseable_dates() {
        let period = week();
        let mut broken = item("bad", "Itaú", "Operacional", at(15, 0));
        broken.due = "31/02/2025".into();
        let items = vec![
            item("1", "Itaú", "Operacional", at(13, 9)),
            broken,
            item("2", "Itaú", "Operacional", at(20, 9)),
        ];

        let selection = select_week(&items, &period);
        assert_eq!(selection.items.len(), 1);
        assert_eq!(selection.items[0].id.as_str(), "1");
        assert_eq!(selection.issues.len(), 1);
        assert_eq!(selection.issues[0].id.as_str(), "bad");
        assert_eq!(selection.issues[0].raw, "31/02/2025");
        assert_eq!(
            week_membership(&items[2], &period),
            Ok(false),
            "next week is out of range, not an error"
        );
    }

    #[test]
    fn test_all_sentinel_criteria_is_identity() {
        let mut items = vec![
            item("1", "Itaú", "Operacional", at(13, 9)),
            item("2", "Bradesco", "Projetos", at(14, 9)).with_status(ItemStatus::Paid),
            item("3", "", "", at(15, 9)),
        ];
        items[2].supplier = String::new();
        items[1].incluir = false;

        let criteria = FilterCriteria::all();
        assert!(criteria.is_unfiltered());
        let filtered = apply_criteria(&items, &criteria);
        let expected: Vec<&PaymentItem> = items.iter().collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_account_filter_uses_composite_key() {
        let items = vec![
            item("1", "A — B", "C", at(13, 9)),
            item("2", "A", "B — C", at(13, 9)),
        ];
        let criteria = FilterCriteria::all().with_account(AccountKey::new("A", "B — C"));
        let filtered = apply_criteria(&items, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "2");
    }

    #[test]
    fn test_status_filter() {
        let items = vec![
            item("1", "Itaú", "Operacional", at(13, 9)).with_status(ItemStatus::Approved),
            item("2", "Itaú", "Operacional", at(13, 9)).with_status(ItemStatus::Pending),
        ];

        let approved = FilterCriteria::all().with_status(StatusFilter::Only(ItemStatus::Approved));
        assert_eq!(apply_criteria(&items, &approved).len(), 1);

        let unknown = FilterCriteria::all().with_status(StatusFilter::from_label("Cancelado"));
        assert!(apply_criteria(&items, &unknown).is_empty());

        assert_eq!(StatusFilter::from_label("Todos"), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_label("pago"),
            StatusFilter::Only(ItemStatus::Paid)
        );
    }

    #[test]
    fn test_unregistered_account_filter_matches_nothing() {
        let items = vec![item("1", "Itaú", "Operacional", at(13, 9))];
        let criteria = FilterCriteria::all().with_account(AccountKey::new("Nubank", "Reserva"));
        assert!(apply_criteria(&items, &criteria).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let items = vec![
            item("1", "Itaú", "Operacional", at(13, 9))
                .with_description("Energia elétrica")
                .with_cost_center("Utilidades"),
            item("2", "Itaú", "Operacional", at(13, 9)).with_cost_center("TI"),
        ];

        let by_description = FilterCriteria::all().with_search("ENERGIA");
        assert_eq!(apply_criteria(&items, &by_description).len(), 1);

        let by_cost_center = FilterCriteria::all().with_search("ti");
        // "TI" cost center and "Utilidades" both contain "ti"
        assert_eq!(apply_criteria(&items, &by_cost_center).len(), 2);

        // Supplier and description are joined with a single space
        let across = FilterCriteria::all().with_search("fornecedor 1 energia");
        assert_eq!(apply_criteria(&items, &across).len(), 1);
    }

    #[test]
    fn test_criteria_are_anded() {
        let items = vec![
            item("1", "Itaú", "Operacional", at(13, 9)).with_status(ItemStatus::Approved),
            item("2", "Bradesco", "Projetos", at(13, 9)).with_status(ItemStatus::Approved),
        ];
        let criteria = FilterCriteria::all()
            .with_account(AccountKey::new("Itaú", "Operacional"))
            .with_status(StatusFilter::Only(ItemStatus::Approved))
            .with_search("fornecedor 2");
        assert!(apply_criteria(&items, &criteria).is_empty());
    }

    #[test]
    fn test_filtering_does_not_mutate() {
        let items = vec![item("1", "Itaú", "Operacional", at(13, 9)).with_incluir(false)];
        let before = items.clone();
        let _ = apply_criteria(&items, &FilterCriteria::all().with_search("zzz"));
        let _ = select_week(&items, &week());
        assert_eq!(items, before);
    }
}
