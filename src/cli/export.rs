//! Export command
//!
//! Derives the week's bordero and writes it as CSV, JSON or YAML through an
//! atomic file write.

use std::path::PathBuf;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::settings::Settings;
use crate::error::BorderoResult;
use crate::export::{export_bordero_json, export_bordero_yaml, write_csv, ExportFormat};
use crate::reports::WeeklyBordero;
use crate::storage::{write_atomic, Storage};

use super::{load_session, WeekArgs};

/// Handle the `export` command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    audit: &AuditLogger,
    args: &WeekArgs,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> BorderoResult<()> {
    let state = load_session(storage, settings, args)?;
    let bordero = WeeklyBordero::derive(&state, settings);

    let path = output.unwrap_or_else(|| {
        storage
            .paths()
            .default_export_file(&bordero.period, format.extension())
    });

    match format {
        ExportFormat::Csv => {
            let delimiter = settings.export_delimiter_byte()?;
            write_atomic(&path, |w| write_csv(&bordero.export_rows, w, delimiter))?;
        }
        ExportFormat::Json => {
            write_atomic(&path, |w| export_bordero_json(&bordero, w))?;
        }
        ExportFormat::Yaml => {
            write_atomic(&path, |w| export_bordero_yaml(&bordero, w))?;
        }
    }

    let summary = serde_json::json!({
        "format": format.to_string(),
        "rows": bordero.export_rows.len(),
        "total": bordero.total,
    });
    audit.log(&AuditEntry::export(path.display().to_string(), bordero.label.clone(), &summary))?;

    println!(
        "Exportados {} itens ({}) da semana {} para {}",
        bordero.export_rows.len(),
        bordero.total.format_currency(&settings.currency),
        bordero.label,
        path.display()
    );

    if bordero.export_rows.is_empty() {
        println!("Nenhum item incluído: o arquivo contém apenas o cabeçalho.");
    }

    Ok(())
}
