//! Reports module for bordero
//!
//! Aggregates derived from the included items of a week: totals by account,
//! method and cost center, the projected balance of each funding account,
//! and the composed weekly view that ties them together.

pub mod aggregation;
pub mod bordero;
pub mod projection;

pub use aggregation::Groupings;
pub use bordero::{SessionState, WeeklyBordero, SIGNATURE_LINES};
pub use projection::{AccountOrigin, AccountProjection, BalanceProjection};
