//! Export module for bordero
//!
//! Writes a week's bordero in three formats:
//! - CSV: the fixed-column sheet handed to the bank/approvers
//! - JSON: machine-readable snapshot with totals and projection
//! - YAML: the same snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_filename, export_rows, write_csv, ExportRow, EXPORT_HEADER};
pub use self::json::{export_bordero_json, import_from_json, AccountTotal, BorderoExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_bordero_yaml, import_from_yaml};

use std::fmt;

/// Output format of the export command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Fixed-column sheet, one row per included item
    #[default]
    Csv,
    /// Snapshot with totals, groupings and projection
    Json,
    /// Same snapshot as JSON, human-readable
    #[value(alias = "yml")]
    Yaml,
}

impl ExportFormat {
    /// File extension for default file names
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
