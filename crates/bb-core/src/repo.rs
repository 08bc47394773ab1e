//! Persistence contract: the snapshot layout and the repository seam.
//!
//! Durable storage holds exactly one versioned JSON record:
//! `{"state": {"logs": [...], "activeSleepId": "..."}, "version": 1}`.
//! The store only talks to storage through [`Repository`], so any backend
//! (or an in-memory fake) can stand in.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::log::LogEntry;
use crate::types::LogId;

/// The mutable state of the tracker, as persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotState {
    /// Every log entry, in insertion order.
    pub logs: Vec<LogEntry>,
    /// The currently open sleep interval's start entry, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_sleep_id: Option<LogId>,
}

/// The full persisted record: state plus a schema version tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub state: SnapshotState,
    pub version: u32,
}

impl Snapshot {
    /// The schema version this build reads and writes.
    pub const CURRENT_VERSION: u32 = 1;

    /// Wraps state in a current-version snapshot.
    #[must_use]
    pub const fn new(state: SnapshotState) -> Self {
        Self {
            state,
            version: Self::CURRENT_VERSION,
        }
    }
}

/// Errors from loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The snapshot could not be serialized or parsed.
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored record carries a schema version this build does not read.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a backend-specific error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Durable storage for the tracker snapshot.
///
/// `load` returns `Ok(None)` when nothing has been persisted yet. `save`
/// replaces the whole record; there is no partial write.
pub trait Repository {
    fn load(&self) -> Result<Option<Snapshot>, RepositoryError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), RepositoryError>;
}

/// In-memory repository, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    slot: Mutex<Option<Snapshot>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last snapshot saved, if any.
    pub fn stored(&self) -> Option<Snapshot> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Result<Option<Snapshot>, RepositoryError> {
        Ok(self.stored())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), RepositoryError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }
}
