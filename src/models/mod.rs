//! Core data models for bordero
//!
//! This module contains the data structures of the weekly payables domain:
//! payment items, funding accounts, money and the week window.

pub mod account;
pub mod ids;
pub mod item;
pub mod money;
pub mod period;

pub use account::{Account, AccountKey, AccountRegistry};
pub use ids::ItemId;
pub use item::{DueDateError, ItemStatus, PaymentItem, PaymentMethod, Priority};
pub use money::Money;
pub use period::WeekPeriod;
