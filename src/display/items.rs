//! Item table formatting
//!
//! Excluded items stay in the table with an empty marker so reviewers can
//! see what was left out of the totals.

use chrono::FixedOffset;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::report::truncate;
use crate::models::PaymentItem;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Incl.")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Prior.")]
    priority: String,
    #[tabled(rename = "Fornecedor")]
    supplier: String,
    #[tabled(rename = "Centro de custo")]
    cost_center: String,
    #[tabled(rename = "Banco — Conta")]
    account: String,
    #[tabled(rename = "Método")]
    method: String,
    #[tabled(rename = "Vencimento")]
    due: String,
    #[tabled(rename = "Valor")]
    value: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// An item with its 1-based position in the master list
pub type PositionedItem<'a> = (usize, &'a PaymentItem);

/// Format items as a table
pub fn format_item_table(items: &[PositionedItem<'_>], offset: FixedOffset) -> String {
    if items.is_empty() {
        return "Nenhum item nesta semana.".to_string();
    }

    let rows = items.iter().map(|(position, item)| ItemRow {
        position: *position,
        marker: if item.incluir { "[x]" } else { "[ ]" },
        id: item.id.to_string(),
        priority: item.priority.to_string(),
        supplier: truncate(&item.supplier, 28),
        cost_center: truncate(&item.cost_center, 20),
        account: item.account_key().label(),
        method: item.method.to_string(),
        due: item
            .due_at(offset)
            .map(|d| d.with_timezone(&offset).format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| format!("?? {}", truncate(&item.due, 16))),
        value: item.value.format_currency(&item.currency),
        status: item.status.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

/// Format a single item's details
pub fn format_item_details(item: &PaymentItem, offset: FixedOffset) -> String {
    let mut output = String::new();

    output.push_str(&format!("Item: {}\n", item.id));
    output.push_str(&format!("  Fornecedor:     {}\n", item.supplier));
    if !item.description.is_empty() {
        output.push_str(&format!("  Descrição:      {}\n", item.description));
    }
    if !item.cost_center.is_empty() {
        output.push_str(&format!("  Centro custo:   {}\n", item.cost_center));
    }
    output.push_str(&format!("  Conta:          {}\n", item.account_key()));
    output.push_str(&format!("  Método:         {}\n", item.method));
    match item.due_at(offset) {
        Ok(due) => output.push_str(&format!(
            "  Vencimento:     {}\n",
            due.with_timezone(&offset).format("%d/%m/%Y %H:%M")
        )),
        Err(e) => output.push_str(&format!("  Vencimento:     {}\n", e)),
    }
    output.push_str(&format!("  Valor:          {}\n", item.value.format_currency(&item.currency)));
    output.push_str(&format!("  Prioridade:     {}\n", item.priority));
    output.push_str(&format!("  Status:         {}\n", item.status));
    output.push_str(&format!(
        "  Incluído:       {}\n",
        if item.incluir { "Sim" } else { "Não" }
    ));

    output
}
