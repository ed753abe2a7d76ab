//! Schedule repository for JSON storage
//!
//! The schedule document holds the account registry (`contas`) and the
//! master item list (`itens`) in presentation order. It is loaded whole,
//! validated, and written back whole after each change.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{BorderoError, BorderoResult};
use crate::models::{AccountRegistry, ItemId, PaymentItem};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of the schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub contas: AccountRegistry,
    #[serde(default)]
    pub itens: Vec<PaymentItem>,
}

impl ScheduleDocument {
    pub fn new(contas: AccountRegistry, itens: Vec<PaymentItem>) -> Self {
        Self { contas, itens }
    }

    /// Give every item without an id a fresh one; returns how many were assigned
    pub fn assign_missing_ids(&mut self) -> usize {
        let mut assigned = 0;
        for item in self.itens.iter_mut().filter(|item| item.id.is_empty()) {
            item.id = ItemId::new();
            assigned += 1;
        }
        assigned
    }

    /// Validate every item and reject duplicate ids
    ///
    /// The registry validates itself when deserialized.
    pub fn validate(&self) -> BorderoResult<()> {
        let mut seen = HashSet::new();
        for item in &self.itens {
            item.validate()
                .map_err(|e| BorderoError::Validation(format!("item {}: {}", item.id, e)))?;
            if !seen.insert(item.id.as_str()) {
                return Err(BorderoError::Duplicate {
                    entity_type: "Item",
                    identifier: item.id.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Repository for schedule persistence
pub struct ScheduleRepository {
    path: PathBuf,
    data: RwLock<ScheduleDocument>,
}

impl ScheduleRepository {
    /// Create a new schedule repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(ScheduleDocument::default()),
        }
    }

    /// Load the schedule from disk; a missing file loads as empty
    ///
    /// Items stored without an id get one, and the file is rewritten so the
    /// ids stay stable across runs.
    pub fn load(&self) -> BorderoResult<()> {
        let mut document: ScheduleDocument = read_json(&self.path)?;
        let assigned = document.assign_missing_ids();
        document.validate()?;

        {
            let mut data = self.data.write().map_err(|e| {
                BorderoError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            *data = document;
        }

        if assigned > 0 {
            self.save()?;
        }

        Ok(())
    }

    /// Save the schedule to disk
    pub fn save(&self) -> BorderoResult<()> {
        let data = self.data.read().map_err(|e| {
            BorderoError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_json_atomic(&self.path, &*data)
    }

    /// A copy of the whole document
    pub fn snapshot(&self) -> BorderoResult<ScheduleDocument> {
        let data = self.data.read().map_err(|e| {
            BorderoError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Replace the whole document after validating it
    pub fn replace(&self, document: ScheduleDocument) -> BorderoResult<()> {
        document.validate()?;
        let mut data = self.data.write().map_err(|e| {
            BorderoError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = document;
        Ok(())
    }

    /// Get an item by id
    pub fn get_item(&self, id: &ItemId) -> BorderoResult<Option<PaymentItem>> {
        let data = self.data.read().map_err(|e| {
            BorderoError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.itens.iter().find(|item| &item.id == id).cloned())
    }

    /// Run a mutation over the master item list
    pub fn update_items<F, R>(&self, f: F) -> BorderoResult<R>
    where
        F: FnOnce(&mut Vec<PaymentItem>) -> R,
    {
        let mut data = self.data.write().map_err(|e| {
            BorderoError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(f(&mut data.itens))
    }

    /// Number of items in the master list
    pub fn count(&self) -> BorderoResult<usize> {
        let data = self.data.read().map_err(|e| {
            BorderoError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.itens.len())
    }
}
