//! The persisted memory blob: one [`WorkerMemory`] per worker name.
//!
//! The store serializes to a single JSON object keyed by worker name. Older
//! or partial records read back with first-tick defaults for any missing
//! field, so the blob stays forward-readable across versions.

use std::collections::{BTreeMap, BTreeSet};

use hive_types::{WorkerMemory, WorkerName};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Errors that can occur while (de)serializing the memory blob.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The store could not be written as JSON.
    #[error("failed to serialize worker memory: {source}")]
    Serialize {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The blob is not a valid memory object.
    #[error("failed to parse worker memory: {source}")]
    Parse {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Per-worker memory records, keyed by worker name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    records: BTreeMap<WorkerName, WorkerMemory>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record of a worker, if one exists.
    pub fn get(&self, name: &WorkerName) -> Option<&WorkerMemory> {
        self.records.get(name)
    }

    /// The record of a worker, created with defaults on first access.
    pub fn get_or_default(&mut self, name: &WorkerName) -> &mut WorkerMemory {
        self.records.entry(name.clone()).or_default()
    }

    /// Store a record, replacing any previous one.
    pub fn insert(&mut self, name: WorkerName, memory: WorkerMemory) {
        self.records.insert(name, memory);
    }

    /// Delete a record.
    pub fn remove(&mut self, name: &WorkerName) -> Option<WorkerMemory> {
        self.records.remove(name)
    }

    /// Whether a record exists for the worker.
    pub fn contains(&self, name: &WorkerName) -> bool {
        self.records.contains_key(name)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Delete the records of workers that no longer exist. Returns the
    /// removed names.
    pub fn cleanup(&mut self, live: &BTreeSet<WorkerName>) -> Vec<WorkerName> {
        let stale: Vec<WorkerName> = self
            .records
            .keys()
            .filter(|name| !live.contains(*name))
            .cloned()
            .collect();
        for name in &stale {
            self.records.remove(name);
            info!(worker = %name, "Clearing non-existing worker memory");
        }
        stale
    }

    /// Serialize the whole store.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Serialize`] if JSON encoding fails.
    pub fn to_json(&self) -> Result<String, MemoryError> {
        serde_json::to_string(self).map_err(|source| MemoryError::Serialize { source })
    }

    /// Parse a store. An empty or blank blob is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Parse`] if the blob is not a JSON object of
    /// memory records.
    pub fn from_json(blob: &str) -> Result<Self, MemoryError> {
        if blob.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(blob).map_err(|source| MemoryError::Parse { source })
    }
}
