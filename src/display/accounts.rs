//! Account registry display formatting

use crate::models::{AccountRegistry, Money};

/// Format the registry with opening balances as a table
pub fn format_account_list(registry: &AccountRegistry, currency: &str) -> String {
    if registry.is_empty() {
        return "Nenhuma conta cadastrada.".to_string();
    }

    let name_width = registry
        .iter()
        .map(|a| a.key.label().chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>18}\n",
        "Conta",
        "Saldo inicial",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->18}\n",
        "",
        "",
        name_width = name_width,
    ));

    for account in registry {
        output.push_str(&format!(
            "{:<name_width$}  {:>18}\n",
            account.key.label(),
            account.opening_balance.format_currency(currency),
            name_width = name_width,
        ));
    }

    let total: Money = registry.iter().map(|a| a.opening_balance).sum();
    output.push_str(&format!(
        "{:-<name_width$}  {:->18}\n",
        "",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:>18}\n",
        "TOTAL",
        total.format_currency(currency),
        name_width = name_width,
    ));

    output
}
