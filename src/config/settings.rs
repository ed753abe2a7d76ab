//! User settings for bordero
//!
//! Manages presentation preferences: default currency, the export locale's
//! decimal separator and field delimiter, the UTC offset used to resolve
//! weeks, and whether mutations are written to the audit log.

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use super::paths::BorderoPaths;
use crate::error::BorderoError;

/// User settings for bordero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency assumed for new items and totals display
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Decimal separator used when exporting values
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Field delimiter for CSV exports
    #[serde(default = "default_export_delimiter")]
    pub export_delimiter: char,

    /// Offset from UTC in minutes used for week boundaries (None = system local)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,

    /// Whether inclusion changes, moves and exports are audited
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

fn default_export_delimiter() -> char {
    ','
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            decimal_separator: default_decimal_separator(),
            export_delimiter: default_export_delimiter(),
            utc_offset_minutes: None,
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Offset used to resolve weeks and interpret naive due dates
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Local::now().offset().fix())
    }

    /// Export delimiter as a single byte, as the CSV writer needs it
    pub fn export_delimiter_byte(&self) -> Result<u8, BorderoError> {
        let c = self.export_delimiter;
        if !c.is_ascii() || c == '"' || c == '\n' || c == '\r' {
            return Err(BorderoError::Config(format!(
                "Export delimiter must be a single ASCII character other than a quote or newline, got {:?}",
                c
            )));
        }
        Ok(c as u8)
    }

    /// Check the settings for values the engine cannot work with
    pub fn validate(&self) -> Result<(), BorderoError> {
        self.export_delimiter_byte()?;

        if let Some(minutes) = self.utc_offset_minutes {
            if minutes.checked_mul(60).and_then(FixedOffset::east_opt).is_none() {
                return Err(BorderoError::Config(format!(
                    "UTC offset out of range: {} minutes",
                    minutes
                )));
            }
        }

        if self.decimal_separator == self.export_delimiter && self.decimal_separator != ',' {
            // ',' on both sides is fine: the CSV writer quotes the value
            return Err(BorderoError::Config(
                "Decimal separator and export delimiter must differ".into(),
            ));
        }

        Ok(())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BorderoPaths) -> Result<Self, BorderoError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BorderoError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BorderoError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BorderoPaths) -> Result<(), BorderoError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BorderoError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            BorderoError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency, "BRL");
        assert_eq!(settings.decimal_separator, ',');
        assert_eq!(settings.export_delimiter, ',');
        assert!(settings.audit_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_fixed_offset() {
        let settings = Settings {
            utc_offset_minutes: Some(-180),
            ..Settings::default()
        };
        assert_eq!(settings.offset(), FixedOffset::west_opt(3 * 3600).unwrap());
    }

    #[test]
    fn test_invalid_delimiter() {
        let settings = Settings {
            export_delimiter: '"',
            ..Settings::default()
        };
        assert!(settings.export_delimiter_byte().is_err());
        assert!(settings.validate().is_err());

        let semicolon = Settings {
            export_delimiter: ';',
            ..Settings::default()
        };
        assert_eq!(semicolon.export_delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn test_clashing_separators() {
        let settings = Settings {
            decimal_separator: '.',
            export_delimiter: '.',
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BorderoPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            export_delimiter: ';',
            utc_offset_minutes: Some(-180),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BorderoPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency":"USD"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.decimal_separator, ',');
    }
}
