//! Business logic layer for bordero
//!
//! Pure operations over the caller's item list: week resolution, filtering,
//! inclusion and manual ordering. Aggregates live in `reports`.

pub mod filter;
pub mod ordering;
pub mod period;
pub mod selection;

pub use filter::{
    apply_criteria, select_week, week_membership, AccountFilter, DueDateIssue, FilterCriteria,
    StatusFilter, WeekSelection,
};
pub use ordering::{move_item, position_of, Direction};
pub use period::PeriodService;
pub use selection::{included, set_inclusion, toggle_inclusion};
