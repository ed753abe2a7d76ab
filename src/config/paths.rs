//! Path management for bordero
//!
//! ## Path Resolution Order
//!
//! 1. `BORDERO_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/bordero` on Linux, `%APPDATA%\bordero` on Windows, ...)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BorderoError;
use crate::models::WeekPeriod;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BORDERO_DATA_DIR";

/// Manages all paths used by bordero
#[derive(Debug, Clone)]
pub struct BorderoPaths {
    base_dir: PathBuf,
}

impl BorderoPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, BorderoError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BorderoPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the schedule document (accounts and items)
    pub fn schedule_file(&self) -> PathBuf {
        self.base_dir.join("schedule.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Directory where exports land when no output path is given
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Default export path for a week, e.g. `exports/bordero-semanal-2025-01-13.csv`
    pub fn default_export_file(&self, period: &WeekPeriod, extension: &str) -> PathBuf {
        self.export_dir()
            .join(crate::export::export_filename(period, extension))
    }

    /// Ensure the base and export directories exist
    pub fn ensure_directories(&self) -> Result<(), BorderoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BorderoError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| BorderoError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if bordero has been initialized (schedule file exists)
    pub fn is_initialized(&self) -> bool {
        self.schedule_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BorderoError> {
    ProjectDirs::from("", "", "bordero")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BorderoError::Config("Could not determine a configuration directory".into()))
}
