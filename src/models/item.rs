//! Payment item model
//!
//! The atomic unit of a bordero: one payable with its supplier, target
//! account, due instant and value. Field names on the wire follow the
//! schedule spreadsheet the finance team already uses (`fornecedor`,
//! `vencimento`, `valor`, ...).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::AccountKey;
use super::ids::ItemId;
use super::money::{currency_minor_units, Money};

/// How an item is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Instant transfer
    #[serde(rename = "PIX")]
    Pix,
    /// Wire transfer
    #[serde(rename = "TED")]
    Ted,
    /// Bank slip
    #[serde(rename = "Boleto")]
    Boleto,
    /// Cash
    #[serde(rename = "Dinheiro")]
    Cash,
}

impl PaymentMethod {
    pub fn all() -> [Self; 4] {
        [Self::Pix, Self::Ted, Self::Boleto, Self::Cash]
    }

    /// Parse a payment method from its label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pix" => Some(Self::Pix),
            "ted" | "wire" => Some(Self::Ted),
            "boleto" | "slip" => Some(Self::Boleto),
            "dinheiro" | "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pix => write!(f, "PIX"),
            Self::Ted => write!(f, "TED"),
            Self::Boleto => write!(f, "Boleto"),
            Self::Cash => write!(f, "Dinheiro"),
        }
    }
}

/// Approval status of an item
///
/// Display-only data for the engine: no transition rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
    #[serde(rename = "Aprovado")]
    Approved,
    #[serde(rename = "Agendado")]
    Scheduled,
    #[serde(rename = "Pago")]
    Paid,
}

impl ItemStatus {
    pub fn all() -> [Self; 4] {
        [Self::Pending, Self::Approved, Self::Scheduled, Self::Paid]
    }

    /// Parse a status from its Portuguese or English label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pendente" | "pending" => Some(Self::Pending),
            "aprovado" | "approved" => Some(Self::Approved),
            "agendado" | "scheduled" => Some(Self::Scheduled),
            "pago" | "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pendente"),
            Self::Approved => write!(f, "Aprovado"),
            Self::Scheduled => write!(f, "Agendado"),
            Self::Paid => write!(f, "Pago"),
        }
    }
}

/// Priority rank, 1 being the most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    High = 1,
    #[default]
    Medium = 2,
    Low = 3,
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(format!("priority must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", *self as u8)
    }
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_include() -> bool {
    true
}

/// A payable scheduled for the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItem {
    /// Blank when the source omits it; the schedule assigns one on load
    #[serde(default)]
    pub id: ItemId,

    #[serde(rename = "fornecedor")]
    pub supplier: String,

    #[serde(rename = "descricao", default)]
    pub description: String,

    #[serde(rename = "centroCusto", default)]
    pub cost_center: String,

    #[serde(rename = "banco")]
    pub bank: String,

    #[serde(rename = "conta")]
    pub account: String,

    #[serde(rename = "metodo")]
    pub method: PaymentMethod,

    /// Raw due instant as received; parsed on demand with [`PaymentItem::due_at`]
    #[serde(rename = "vencimento")]
    pub due: String,

    #[serde(rename = "valor")]
    pub value: Money,

    /// ISO-4217 code, informational only
    #[serde(rename = "moeda", default = "default_currency")]
    pub currency: String,

    #[serde(rename = "prioridade", default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: ItemStatus,

    /// Whether the item counts toward the session's totals
    #[serde(default = "default_include")]
    pub incluir: bool,
}

impl PaymentItem {
    /// Create a new item with defaults for currency, priority, status and inclusion
    pub fn new(
        id: impl Into<ItemId>,
        supplier: impl Into<String>,
        key: AccountKey,
        method: PaymentMethod,
        due: DateTime<FixedOffset>,
        value: Money,
    ) -> Self {
        Self {
            id: id.into(),
            supplier: supplier.into(),
            description: String::new(),
            cost_center: String::new(),
            bank: key.bank,
            account: key.account,
            method,
            due: due.to_rfc3339(),
            value,
            currency: default_currency(),
            priority: Priority::default(),
            status: ItemStatus::default(),
            incluir: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = cost_center.into();
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_incluir(mut self, incluir: bool) -> Self {
        self.incluir = incluir;
        self
    }

    /// The (bank, account) pair this item is charged against
    pub fn account_key(&self) -> AccountKey {
        AccountKey::new(self.bank.clone(), self.account.clone())
    }

    /// Whether the item targets the given account
    pub fn is_charged_to(&self, key: &AccountKey) -> bool {
        self.bank == key.bank && self.account == key.account
    }

    /// Parse the due instant
    ///
    /// RFC 3339 values carry their own offset. Naive date-times and plain
    /// dates are read as wall-clock time in `local`.
    pub fn due_at(&self, local: FixedOffset) -> Result<DateTime<FixedOffset>, DueDateError> {
        parse_due(&self.due, local)
    }

    /// Text searched by the free-text filter
    pub fn search_text(&self) -> String {
        [
            self.supplier.as_str(),
            self.description.as_str(),
            self.cost_center.as_str(),
        ]
        .join(" ")
    }

    /// Validate the item data
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_empty() {
            return Err(ItemValidationError::EmptyId);
        }
        if self.value.is_negative() {
            return Err(ItemValidationError::NegativeValue(self.value));
        }
        if self.bank.trim().is_empty() || self.account.trim().is_empty() {
            return Err(ItemValidationError::MissingAccount);
        }
        if !self.value.fits_minor_units(currency_minor_units(&self.currency)) {
            return Err(ItemValidationError::ExcessPrecision(self.value, self.currency.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for PaymentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.supplier, self.id)
    }
}

/// Parse a due-date string into an instant
pub fn parse_due(raw: &str, local: FixedOffset) -> Result<DateTime<FixedOffset>, DueDateError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DueDateError::Empty);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant);
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| DueDateError::Unparseable(s.to_string()))?;

    local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DueDateError::Unparseable(s.to_string()))
}

/// Failure to interpret an item's due date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDateError {
    Empty,
    Unparseable(String),
}

impl fmt::Display for DueDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Due date is empty"),
            Self::Unparseable(s) => write!(f, "Unparseable due date: {}", s),
        }
    }
}

impl std::error::Error for DueDateError {}

/// Validation errors for payment items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    EmptyId,
    NegativeValue(Money),
    MissingAccount,
    /// Value has more decimal places than the currency allows
    ExcessPrecision(Money, String),
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Item id cannot be empty"),
            Self::NegativeValue(v) => write!(f, "Item value cannot be negative: {}", v),
            Self::MissingAccount => write!(f, "Item must name a bank and an account"),
            Self::ExcessPrecision(v, currency) => {
                write!(f, "Item value {} has more decimal places than {} allows", v, currency)
            }
        }
    }
}

impl std::error::Error for ItemValidationError {}
