//! Display formatting for terminal output
//!
//! Tables and helpers used by the command-line shell. The weekly summary
//! itself is formatted by `reports::WeeklyBordero`.

pub mod accounts;
pub mod items;
pub mod report;

pub use accounts::format_account_list;
pub use items::{format_item_details, format_item_table, PositionedItem};
pub use report::{double_separator, format_header, format_money_colored, separator, truncate};
