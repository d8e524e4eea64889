//! Concurrency-safe storage for operation outcomes.
//!
//! The [`ResultStore`] owns every stored [`OperationResponse`]. Readers receive
//! clones, never references into the map, and the backing container is not
//! reachable from outside this module. Reads share a reader lock; `set` and
//! `delete` take the writer lock. Critical sections are plain map operations.
//!
//! Entries live until deleted or until the process exits. There is no expiry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::record::OperationResponse;

const STORE_TARGET: &str = "tc_dao::store";

/// Shared handle to the in-memory result map.
///
/// Cloning the handle shares the underlying map, which lets several
/// dispatchers or threads observe the same outcomes.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Arc<RwLock<HashMap<String, OperationResponse>>>,
}

impl ResultStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under its own correlation identifier, replacing any
    /// previous record with that identifier.
    pub fn set(&self, record: OperationResponse) {
        let key = record.id().as_str().to_owned();
        trace!(target: STORE_TARGET, id = %key, status = record.status().as_str(), "storing record");
        self.write().insert(key, record);
    }

    /// Returns a copy of the record stored under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<OperationResponse> {
        self.read().get(id).cloned()
    }

    /// Removes and returns the record stored under `id`.
    pub fn delete(&self, id: &str) -> Option<OperationResponse> {
        self.write().remove(id)
    }

    /// Returns `true` when a record exists for `id`.
    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    // Poisoned locks still guard a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, OperationResponse>> {
        self.records
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, OperationResponse>> {
        self.records
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
