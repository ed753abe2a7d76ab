//! YAML Export functionality
//!
//! Same snapshot as the JSON export, in a form that reads well when attached
//! to the meeting minutes.

use std::io::Write;

use crate::error::{BorderoError, BorderoResult};
use crate::export::json::BorderoExport;
use crate::reports::WeeklyBordero;

/// Export a week to YAML
pub fn export_bordero_yaml<W: Write>(bordero: &WeeklyBordero<'_>, writer: &mut W) -> BorderoResult<()> {
    let export = BorderoExport::from_bordero(bordero);

    writeln!(writer, "# Borderô semanal {}", export.period.label)
        .map_err(|e| BorderoError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BorderoError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| BorderoError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BorderoError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BorderoError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export
pub fn import_from_yaml(yaml_str: &str) -> BorderoResult<BorderoExport> {
    let export: BorderoExport = serde_yaml::from_str(yaml_str)?;
    export.validate().map_err(BorderoError::Validation)?;
    Ok(export)
}
