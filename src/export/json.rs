//! JSON Export functionality
//!
//! Exports a snapshot of the week: period, totals, the three groupings, the
//! projected balances and the export rows, with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BorderoError, BorderoResult};
use crate::export::csv::ExportRow;
use crate::models::Money;
use crate::reports::{AccountOrigin, WeeklyBordero};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot of a weekly bordero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderoExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub period: PeriodInfo,

    pub totals: Totals,

    pub groupings: GroupingsExport,

    pub projection: Vec<ProjectionEntry>,

    pub rows: Vec<ExportRow>,
}

/// Week covered by the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// ISO week, e.g. `2025-W03`
    pub week: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub currency: String,
    pub visible_count: usize,
    pub included_count: usize,
    pub total: Money,
    /// Items left out because their due date could not be read
    pub due_date_issues: usize,
}

/// One line of a grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: Money,
}

/// Account grouping line, keyed by bank and account separately
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotal {
    #[serde(rename = "banco")]
    pub bank: String,
    #[serde(rename = "conta")]
    pub account: String,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingsExport {
    pub by_account: Vec<AccountTotal>,
    pub by_method: Vec<GroupTotal>,
    pub by_cost_center: Vec<GroupTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionEntry {
    #[serde(rename = "banco")]
    pub bank: String,
    #[serde(rename = "conta")]
    pub account: String,
    pub opening: Money,
    pub outflow: Money,
    pub projected: Money,
    /// False when the account only appears on items
    pub registered: bool,
}

impl BorderoExport {
    /// Build a snapshot from a derived week
    pub fn from_bordero(bordero: &WeeklyBordero<'_>) -> Self {
        let group = |key: String, total: Money| GroupTotal { key, total };

        let groupings = GroupingsExport {
            by_account: bordero
                .groupings
                .by_account
                .iter()
                .map(|(k, v)| AccountTotal {
                    bank: k.bank.clone(),
                    account: k.account.clone(),
                    total: *v,
                })
                .collect(),
            by_method: bordero
                .groupings
                .by_method
                .iter()
                .map(|(m, v)| group(m.to_string(), *v))
                .collect(),
            by_cost_center: bordero
                .groupings
                .by_cost_center
                .iter()
                .map(|(c, v)| group(c.clone(), *v))
                .collect(),
        };

        let projection = bordero
            .projection
            .iter()
            .map(|p| ProjectionEntry {
                bank: p.key.bank.clone(),
                account: p.key.account.clone(),
                opening: p.opening,
                outflow: p.outflow,
                projected: p.projected,
                registered: p.origin == AccountOrigin::Registered,
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            period: PeriodInfo {
                week: bordero.period.to_string(),
                label: bordero.label.clone(),
                start: bordero.period.start_date(),
                end: bordero.period.end_date(),
            },
            totals: Totals {
                currency: bordero.currency.clone(),
                visible_count: bordero.visible.len(),
                included_count: bordero.included_count,
                total: bordero.total,
                due_date_issues: bordero.issues.len(),
            },
            groupings,
            projection,
            rows: bordero.export_rows.clone(),
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.rows.len() != self.totals.included_count {
            return Err(format!(
                "Row count {} does not match included count {}",
                self.rows.len(),
                self.totals.included_count
            ));
        }

        let by_account: Money = self.groupings.by_account.iter().map(|g| g.total).sum();
        if by_account != self.totals.total {
            return Err(format!(
                "Account grouping sums to {}, total is {}",
                by_account, self.totals.total
            ));
        }

        Ok(())
    }
}

/// Export a week as pretty-printed JSON
pub fn export_bordero_json<W: Write>(bordero: &WeeklyBordero<'_>, writer: &mut W) -> BorderoResult<()> {
    let export = BorderoExport::from_bordero(bordero);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BorderoError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BorderoError::Export(e.to_string()))?;
    Ok(())
}

/// Read back a JSON export
pub fn import_from_json(json_str: &str) -> BorderoResult<BorderoExport> {
    let export: BorderoExport = serde_json::from_str(json_str)?;
    export.validate().map_err(BorderoError::Validation)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Account, AccountKey, AccountRegistry, PaymentItem, PaymentMethod};
    use crate::reports::SessionState;
    use chrono::{FixedOffset, TimeZone};

    fn state() -> SessionState {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let registry =
            AccountRegistry::new(vec![Account::new("Itaú", "Operacional", Money::from_units(25000))])
                .unwrap();
        let items = vec![
            PaymentItem::new(
                "1",
                "Fornecedor A",
                AccountKey::new("Itaú", "Operacional"),
                PaymentMethod::Pix,
                brt.with_ymd_and_hms(2025, 1, 13, 10, 0, 0).unwrap(),
                Money::from_units(3200),
            ),
            PaymentItem::new(
                "4",
                "Prestador Y",
                AccountKey::new("Santander", "Captação"),
                PaymentMethod::Ted,
                brt.with_ymd_and_hms(2025, 1, 17, 10, 0, 0).unwrap(),
                Money::from_units(1500),
            ),
        ];
        SessionState::new(items, registry, brt.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_snapshot_contents() {
        let state = state();
        let bordero = WeeklyBordero::derive(&state, &Settings::default());
        let export = BorderoExport::from_bordero(&bordero);

        assert_eq!(export.period.week, "2025-W03");
        assert_eq!(export.period.start, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
        assert_eq!(export.totals.included_count, 2);
        assert_eq!(export.totals.total, Money::from_units(4700));
        assert_eq!(export.groupings.by_account[1].bank, "Santander");
        assert_eq!(export.groupings.by_account[1].account, "Captação");
        assert!(export.projection[0].registered);
        assert!(!export.projection[1].registered);
        assert_eq!(export.projection[1].projected, Money::from_units(-1500));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_export_reads_back() {
        let state = state();
        let bordero = WeeklyBordero::derive(&state, &Settings::default());

        let mut output = Vec::new();
        export_bordero_json(&bordero, &mut output).unwrap();
        let json = String::from_utf8(output).unwrap();
        assert!(json.contains("\"schema_version\": \"1.0.0\""));
        assert!(json.contains("\"total\": \"4700.00\""));

        let imported = import_from_json(&json).unwrap();
        assert_eq!(imported.rows.len(), 2);
        assert_eq!(imported.rows[1].fornecedor, "Prestador Y");
    }

    #[test]
    fn test_account_keys_with_separator_stay_distinct() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let due = brt.with_ymd_and_hms(2025, 1, 14, 10, 0, 0).unwrap();
        let items = vec![
            PaymentItem::new("1", "X", AccountKey::new("A — B", "C"), PaymentMethod::Pix, due, Money::from_units(10)),
            PaymentItem::new("2", "Y", AccountKey::new("A", "B — C"), PaymentMethod::Pix, due, Money::from_units(20)),
        ];
        let state = SessionState::new(items, AccountRegistry::empty(), due);
        let bordero = WeeklyBordero::derive(&state, &Settings::default());

        let mut output = Vec::new();
        export_bordero_json(&bordero, &mut output).unwrap();
        let imported = import_from_json(&String::from_utf8(output).unwrap()).unwrap();

        let accounts = &imported.groupings.by_account;
        assert_eq!(accounts.len(), 2);
        assert_eq!((accounts[0].bank.as_str(), accounts[0].account.as_str()), ("A — B", "C"));
        assert_eq!((accounts[1].bank.as_str(), accounts[1].account.as_str()), ("A", "B — C"));
        assert_ne!(accounts[0], accounts[1]);
    }

    #[test]
    fn test_validate_rejects_wrong_version() {
        let state = state();
        let bordero = WeeklyBordero::derive(&state, &Settings::default());
        let mut export = BorderoExport::from_bordero(&bordero);
        export.schema_version = "0.1.0".into();
        assert!(export.validate().is_err());
    }
}
