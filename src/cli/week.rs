//! Weekly view commands
//!
//! `show` prints the summary and the approval minutes; `items` prints the
//! filtered item table; `weeks` compares neighbouring weeks.

use crate::config::settings::Settings;
use crate::display::items::{format_item_details, format_item_table};
use crate::display::report::{double_separator, format_header, format_money_colored, separator};
use crate::error::{BorderoError, BorderoResult};
use crate::models::ItemId;
use crate::reports::{SessionState, WeeklyBordero};
use crate::services::ordering::position_of;
use crate::services::period::PeriodService;
use crate::storage::Storage;

use super::{ensure_initialized, load_session, WeekArgs};

const WEEKS_WIDTH: usize = 72;

/// Handle the `show` command
pub fn handle_show_command(
    storage: &Storage,
    settings: &Settings,
    args: &WeekArgs,
    minutes: bool,
) -> BorderoResult<()> {
    let state = load_session(storage, settings, args)?;
    let bordero = WeeklyBordero::derive(&state, settings);

    print!("{}", bordero.format_terminal());

    let overdrawn: Vec<_> = bordero.projection.iter().filter(|p| p.is_overdrawn()).collect();
    if !overdrawn.is_empty() {
        println!();
        for account in overdrawn {
            println!(
                "Atenção: saldo projetado negativo em {}: {}",
                account.key,
                format_money_colored(account.projected, &settings.currency)
            );
        }
    }

    if minutes {
        println!();
        print!("{}", bordero.format_minutes());
    }

    Ok(())
}

/// Handle the `items` command
pub fn handle_items_command(storage: &Storage, settings: &Settings, args: &WeekArgs) -> BorderoResult<()> {
    let state = load_session(storage, settings, args)?;
    let bordero = WeeklyBordero::derive(&state, settings);

    let positioned: Vec<_> = bordero
        .visible
        .iter()
        .map(|item| {
            let position = position_of(&state.items, &item.id).map_or(0, |p| p + 1);
            (position, *item)
        })
        .collect();

    println!("Borderô semanal: {}", bordero.label);
    println!("{}", format_item_table(&positioned, bordero.period.offset()));
    println!(
        "{} de {} itens incluídos, total {}",
        bordero.included_count,
        bordero.visible.len(),
        bordero.total.format_currency(&settings.currency)
    );

    for issue in &bordero.issues {
        println!("Vencimento inválido no item {}: {}", issue.id, issue.error);
    }

    Ok(())
}

/// Handle the `item` command
pub fn handle_item_command(storage: &Storage, settings: &Settings, id: &str) -> BorderoResult<()> {
    ensure_initialized(storage.paths())?;

    let id = ItemId::from(id.trim());
    let document = storage.schedule.snapshot()?;
    let position = position_of(&document.itens, &id)
        .ok_or_else(|| BorderoError::item_not_found(id.as_str()))?;

    print!("{}", format_item_details(&document.itens[position], settings.offset()));
    println!("  Posição:        {} de {}", position + 1, document.itens.len());

    Ok(())
}

/// Handle the `weeks` command: included totals for the weeks around today
pub fn handle_weeks_command(
    storage: &Storage,
    settings: &Settings,
    back: usize,
    ahead: usize,
) -> BorderoResult<()> {
    ensure_initialized(storage.paths())?;

    let service = PeriodService::new(settings);
    let document = storage.schedule.snapshot()?;

    let mut weeks = service.recent_weeks(back + 1);
    weeks.extend(service.upcoming_weeks(ahead + 1).into_iter().skip(1));

    println!("{}", format_header("Borderôs por semana", WEEKS_WIDTH));
    println!("{}", double_separator(WEEKS_WIDTH));

    for period in &weeks {
        let state = SessionState::new(document.itens.clone(), document.contas.clone(), period.start);
        let bordero = WeeklyBordero::derive(&state, settings);
        let marker = if service.is_current(period) { "→" } else { " " };

        println!(
            "{} {:<44} {:>3} itens {:>16}",
            marker,
            service.format_period_friendly(period),
            bordero.included_count,
            bordero.total.format_currency(&settings.currency)
        );
    }

    println!("{}", separator(WEEKS_WIDTH));

    Ok(())
}
