//! Audit logging for bordero
//!
//! Every command that changes the schedule or produces an export appends a
//! line to an append-only JSONL log next to the settings file.
//!
//! - `AuditEntry`: timestamp, operation, target, optional before/after values
//! - `AuditLogger`: appends entries and reads them back
//! - `generate_diff`: human-readable summary of what changed
//!
//! # Example
//!
//! ```rust,ignore
//! use bordero::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::inclusion(&before, &after))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
