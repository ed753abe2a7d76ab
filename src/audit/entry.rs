//! Audit entry data structures
//!
//! One entry per mutating command: an inclusion change, a manual move, or an
//! export handed to the approvers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::generate_diff;
use crate::models::PaymentItem;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Item marked to count toward the totals
    Include,
    /// Item left out of the totals
    Exclude,
    /// Item swapped with a neighbour
    Move,
    /// Export file written
    Export,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Include => write!(f, "INCLUDE"),
            Operation::Exclude => write!(f, "EXCLUDE"),
            Operation::Move => write!(f, "MOVE"),
            Operation::Export => write!(f, "EXPORT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Item id, or the export path for exports
    pub target: String,

    /// Human-readable label (supplier, or the period for exports)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for an inclusion change; the operation follows the new flag
    pub fn inclusion(before: &PaymentItem, after: &PaymentItem) -> Self {
        let operation = if after.incluir {
            Operation::Include
        } else {
            Operation::Exclude
        };
        let before = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation,
            target: after.id.to_string(),
            label: Some(after.supplier.clone()),
            before,
            after: after_value,
            diff_summary,
        }
    }

    /// Entry for a manual move between list positions (zero-based)
    pub fn moved(item: &PaymentItem, from: usize, to: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Move,
            target: item.id.to_string(),
            label: Some(item.supplier.clone()),
            before: Some(serde_json::json!({ "position": from + 1 })),
            after: Some(serde_json::json!({ "position": to + 1 })),
            diff_summary: Some(format!("position: {} -> {}", from + 1, to + 1)),
        }
    }

    /// Entry for an export
    pub fn export<T: Serialize>(path: impl Into<String>, period_label: impl Into<String>, summary: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Export,
            target: path.into(),
            label: Some(period_label.into()),
            before: None,
            after: serde_json::to_value(summary).ok(),
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.target
        );

        if let Some(label) = &self.label {
            output.push_str(&format!(" ({})", label));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
