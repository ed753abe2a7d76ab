//! Storage layer for bordero
//!
//! JSON file storage with atomic writes and automatic directory creation.
//! Only the command-line shell touches storage; the weekly engine works on
//! in-memory data.

pub mod file_io;
pub mod init;
pub mod schedule;

pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use init::{initialize_storage, sample_schedule};
pub use schedule::{ScheduleDocument, ScheduleRepository};

use crate::config::paths::BorderoPaths;
use crate::error::BorderoError;

/// Main storage coordinator
pub struct Storage {
    paths: BorderoPaths,
    pub schedule: ScheduleRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BorderoPaths) -> Result<Self, BorderoError> {
        paths.ensure_directories()?;

        Ok(Self {
            schedule: ScheduleRepository::new(paths.schedule_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BorderoPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BorderoError> {
        self.schedule.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BorderoError> {
        self.schedule.save()
    }

    /// Check if storage has been initialized (schedule document written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BorderoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("exports").exists());
        assert!(!storage.is_initialized());

        storage.load_all().unwrap();
        storage.save_all().unwrap();
        assert!(storage.is_initialized());
    }
}
