//! Schedule mutation commands
//!
//! Inclusion changes and manual reordering of the master item list. Each
//! change is saved immediately and recorded in the audit log.

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{BorderoError, BorderoResult};
use crate::models::ItemId;
use crate::services::ordering::{move_item, position_of, Direction};
use crate::services::selection::{set_inclusion, toggle_inclusion};
use crate::storage::Storage;

use super::ensure_initialized;

/// Requested inclusion change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionChange {
    Include,
    Exclude,
    Toggle,
}

/// Handle `include`, `exclude` and `toggle`
pub fn handle_inclusion_command(
    storage: &Storage,
    audit: &AuditLogger,
    id: &str,
    change: InclusionChange,
) -> BorderoResult<()> {
    ensure_initialized(storage.paths())?;

    let id = ItemId::from(id.trim());
    let before = storage
        .schedule
        .get_item(&id)?
        .ok_or_else(|| BorderoError::item_not_found(id.as_str()))?;

    let changed = storage.schedule.update_items(|items| match change {
        InclusionChange::Include => set_inclusion(items, &id, true).map(|prev| !prev),
        InclusionChange::Exclude => set_inclusion(items, &id, false).map(|prev| prev),
        InclusionChange::Toggle => toggle_inclusion(items, &id).map(|_| true),
    })?;

    if changed != Some(true) {
        let state = if before.incluir { "incluído" } else { "excluído" };
        println!("Item {} ({}) já está {}.", id, before.supplier, state);
        return Ok(());
    }

    storage.schedule.save()?;

    let after = storage
        .schedule
        .get_item(&id)?
        .ok_or_else(|| BorderoError::item_not_found(id.as_str()))?;
    audit.log(&AuditEntry::inclusion(&before, &after))?;

    let verb = if after.incluir { "incluído no" } else { "excluído do" };
    println!("Item {} ({}) {} borderô.", id, after.supplier, verb);

    Ok(())
}

/// Handle `move`
pub fn handle_move_command(
    storage: &Storage,
    audit: &AuditLogger,
    id: &str,
    direction: Direction,
) -> BorderoResult<()> {
    ensure_initialized(storage.paths())?;

    let id = ItemId::from(id.trim());
    let item = storage
        .schedule
        .get_item(&id)?
        .ok_or_else(|| BorderoError::item_not_found(id.as_str()))?;

    let (from, moved, to) = storage.schedule.update_items(|items| {
        let from = position_of(items, &id);
        let moved = move_item(items, &id, direction);
        (from, moved, position_of(items, &id))
    })?;

    let (from, to) = match (from, to) {
        (Some(from), Some(to)) if moved => (from, to),
        _ => {
            println!(
                "Item {} ({}) já está no limite da lista; nada a mover ({}).",
                id, item.supplier, direction
            );
            return Ok(());
        }
    };

    storage.schedule.save()?;
    audit.log(&AuditEntry::moved(&item, from, to))?;

    println!(
        "Item {} ({}) movido da posição {} para {}.",
        id,
        item.supplier,
        from + 1,
        to + 1
    );

    Ok(())
}
