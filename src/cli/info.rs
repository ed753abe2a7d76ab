//! Informational commands: accounts, configuration and audit history

use crate::audit::AuditLogger;
use crate::config::paths::BorderoPaths;
use crate::config::settings::Settings;
use crate::display::accounts::format_account_list;
use crate::error::BorderoResult;
use crate::storage::file_io::json_file_valid;
use crate::storage::Storage;

use super::ensure_initialized;

/// Handle the `accounts` command
pub fn handle_accounts_command(storage: &Storage, settings: &Settings) -> BorderoResult<()> {
    ensure_initialized(storage.paths())?;

    let document = storage.schedule.snapshot()?;
    println!("{}", format_account_list(&document.contas, &settings.currency));

    Ok(())
}

/// Handle the `config` command
pub fn handle_config_command(paths: &BorderoPaths, settings: &Settings) -> BorderoResult<()> {
    println!("bordero configuration");
    println!("=====================");
    println!();
    println!("Paths:");
    println!("  Base directory: {}", paths.base_dir().display());
    println!("  Settings file:  {}", paths.settings_file().display());
    println!("  Schedule:       {}", paths.schedule_file().display());
    println!("  Audit log:      {}", paths.audit_log().display());
    println!("  Exports:        {}", paths.export_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency:          {}", settings.currency);
    println!("  Decimal separator: {}", settings.decimal_separator);
    println!("  Export delimiter:  {}", settings.export_delimiter);
    match settings.utc_offset_minutes {
        Some(minutes) => println!("  UTC offset:        {} min", minutes),
        None => println!("  UTC offset:        system local ({})", settings.offset()),
    }
    println!(
        "  Audit log:         {}",
        if settings.audit_enabled { "enabled" } else { "disabled" }
    );
    println!();

    let schedule = paths.schedule_file();
    if !schedule.exists() {
        println!("Status: not initialized (run 'bordero init')");
    } else if json_file_valid(&schedule) {
        println!("Status: initialized");
    } else {
        println!("Status: schedule file is not valid JSON");
    }

    Ok(())
}

/// Handle the `audit` command
pub fn handle_audit_command(audit: &AuditLogger, limit: usize) -> BorderoResult<()> {
    let entries = audit.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        if !audit.is_enabled() {
            println!("Audit logging is disabled in settings.");
        }
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
