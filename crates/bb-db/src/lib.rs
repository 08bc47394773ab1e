//! Storage layer for the baby care tracker.
//!
//! Durable state is one versioned JSON record in a key-value table. The
//! whole snapshot is replaced on every save; there are no partial writes
//! and no migrations beyond the version tag.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. Wrap it in a `Mutex` or give each thread its own handle for
//! multi-threaded access.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::Deserialize;
use thiserror::Error;

use bb_core::repo::{Repository, RepositoryError, Snapshot};

/// Fixed key of the single persisted record.
const STORAGE_KEY: &str = "baby-care-logs";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Just enough of a record to check its schema version before a full parse.
#[derive(Debug, Deserialize)]
struct VersionTag {
    version: u32,
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        tracing::debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn read_record(&self) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()
    }
}

impl Repository for Database {
    fn load(&self) -> Result<Option<Snapshot>, RepositoryError> {
        let Some(raw) = self.read_record().map_err(RepositoryError::backend)? else {
            return Ok(None);
        };

        // Check the version tag before parsing the full state, so a layout
        // from a different schema version reports as such rather than as a
        // parse failure.
        let tag: VersionTag = serde_json::from_str(&raw)?;
        if tag.version != Snapshot::CURRENT_VERSION {
            return Err(RepositoryError::Version {
                found: tag.version,
                expected: Snapshot::CURRENT_VERSION,
            });
        }

        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), RepositoryError> {
        let value = serde_json::to_string(snapshot)?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO snapshots (key, value) VALUES (?, ?)",
                params![STORAGE_KEY, value],
            )
            .map_err(RepositoryError::backend)?;
        Ok(())
    }
}
