//! Weekly bordero
//!
//! Composes the whole pipeline for one session snapshot: week selection,
//! criteria, inclusion, aggregation, projection and export rows. Nothing is
//! cached; every call recomputes from the caller's state.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::export::csv::{export_rows, ExportRow};
use crate::models::{AccountRegistry, Money, PaymentItem, WeekPeriod};
use crate::reports::aggregation::Groupings;
use crate::reports::projection::{AccountOrigin, BalanceProjection};
use crate::services::filter::{apply_criteria, select_week, DueDateIssue, FilterCriteria};
use crate::services::selection::included;

/// Signature lines of the approval minutes
pub const SIGNATURE_LINES: [&str; 4] = [
    "Preparado por:",
    "Conferido por:",
    "Aprovado por:",
    "Direção:",
];

/// Everything the caller holds for a review session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Master list, in presentation order
    pub items: Vec<PaymentItem>,
    pub registry: AccountRegistry,
    /// Any instant inside the week under review
    pub reference: DateTime<FixedOffset>,
    pub criteria: FilterCriteria,
}

impl SessionState {
    pub fn new(
        items: Vec<PaymentItem>,
        registry: AccountRegistry,
        reference: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            items,
            registry,
            reference,
            criteria: FilterCriteria::all(),
        }
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}

/// Derived view of one week
#[derive(Debug, Clone)]
pub struct WeeklyBordero<'a> {
    pub period: WeekPeriod,
    /// Presentation label, e.g. `13/01 — 19/01/2025`
    pub label: String,
    /// Items due this week that pass the criteria, included or not
    pub visible: Vec<&'a PaymentItem>,
    /// Items whose due date could not be read
    pub issues: Vec<DueDateIssue>,
    pub included_count: usize,
    pub total: Money,
    pub groupings: Groupings,
    pub projection: BalanceProjection,
    pub export_rows: Vec<ExportRow>,
    /// Currency used for presentation
    pub currency: String,
}

impl<'a> WeeklyBordero<'a> {
    /// Derive the weekly view from a session snapshot
    pub fn derive(state: &'a SessionState, settings: &Settings) -> Self {
        let period = WeekPeriod::containing(state.reference);

        let selection = select_week(&state.items, &period);
        let visible = apply_criteria(selection.items, &state.criteria);
        let included = included(visible.iter().copied());

        let groupings = Groupings::compute(included.iter().copied());
        let projection = BalanceProjection::compute(&state.registry, included.iter().copied());
        let rows = export_rows(included.iter().copied(), &period, settings);
        let total: Money = included.iter().map(|item| item.value).sum();

        Self {
            label: period.label(),
            period,
            included_count: included.len(),
            visible,
            issues: selection.issues,
            total,
            groupings,
            projection,
            export_rows: rows,
            currency: settings.currency.clone(),
        }
    }

    /// The included subset of the visible items
    pub fn included(&self) -> Vec<&'a PaymentItem> {
        included(self.visible.iter().copied())
    }

    fn money(&self, amount: Money) -> String {
        amount.format_currency(&self.currency)
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Borderô semanal: {} ({})\n", self.label, self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Itens incluídos: {}\n", self.included_count));
        output.push_str(&format!("Valor total:     {}\n", self.money(self.total)));

        output.push_str("\nPor banco/conta\n");
        for (key, value) in &self.groupings.by_account {
            output.push_str(&format!("  {:<36} {:>18}\n", key.label(), self.money(*value)));
        }

        output.push_str("\nPor método\n");
        for (method, value) in &self.groupings.by_method {
            output.push_str(&format!("  {:<36} {:>18}\n", method.to_string(), self.money(*value)));
        }

        output.push_str("\nPor centro de custo\n");
        for (center, value) in &self.groupings.by_cost_center {
            let name = if center.is_empty() { "(sem centro de custo)" } else { center };
            output.push_str(&format!("  {:<36} {:>18}\n", name, self.money(*value)));
        }

        output.push_str("\nSaldo projetado por conta\n");
        for account in &self.projection {
            let marker = match account.origin {
                AccountOrigin::Registered => "",
                AccountOrigin::Inferred => " (não cadastrada)",
            };
            output.push_str(&format!(
                "  {:<36} {:>18} → {:>18}{}\n",
                account.key.label(),
                self.money(account.opening),
                self.money(account.projected),
                marker
            ));
        }

        if !self.issues.is_empty() {
            output.push_str("\nVencimentos inválidos\n");
            for issue in &self.issues {
                output.push_str(&format!("  {}: {:?}\n", issue.id, issue.raw));
            }
        }

        output
    }

    /// Format the approval minutes presented with the bordero
    pub fn format_minutes(&self) -> String {
        let mut output = String::new();

        output.push_str("Ata de Apresentação\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("Período: {}\n", self.label));
        output.push_str(&format!("Valor total apresentado: {}\n\n", self.money(self.total)));

        for line in SIGNATURE_LINES {
            output.push_str(&format!("{:<16}{}\n\n", line, "_".repeat(40)));
        }

        output
    }
}
