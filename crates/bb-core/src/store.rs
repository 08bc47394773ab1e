//! The log book: exclusive owner of the event log and the active-sleep
//! pointer.
//!
//! [`LogBook`] is pure in-memory state with synchronous mutations.
//! [`Tracker`] pairs a book with an injected [`Repository`] and writes the
//! full snapshot back after every effective mutation, best-effort: a failed
//! save is logged and never surfaced to the mutation caller.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::day::DayWindow;
use crate::log::{LogEntry, LogKind};
use crate::repo::{Repository, RepositoryError, Snapshot, SnapshotState};
use crate::types::{FeedAmount, LogId};

/// The ordered collection of log entries plus the open-sleep pointer.
///
/// Insertion order is append order, which is not necessarily chronological
/// by `created_at`.
#[derive(Debug, Clone, Default)]
pub struct LogBook {
    logs: Vec<LogEntry>,
    active_sleep_id: Option<LogId>,
}

impl LogBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a book from a persisted snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            logs: snapshot.state.logs,
            active_sleep_id: snapshot.state.active_sleep_id,
        }
    }

    /// Exports the full state as a persistable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(SnapshotState {
            logs: self.logs.clone(),
            active_sleep_id: self.active_sleep_id.clone(),
        })
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.logs
    }

    /// The id of the open sleep interval's start entry, if one is open.
    pub const fn active_sleep_id(&self) -> Option<&LogId> {
        self.active_sleep_id.as_ref()
    }

    pub const fn is_sleeping(&self) -> bool {
        self.active_sleep_id.is_some()
    }

    fn append(&mut self, kind: LogKind) -> LogId {
        let entry = LogEntry::new(kind);
        let id = entry.id.clone();
        tracing::debug!(kind = entry.kind.name(), id = %id, "append log entry");
        self.logs.push(entry);
        id
    }

    /// Records a diaper change.
    pub fn add_poop(&mut self, amount: Option<String>) -> LogId {
        self.append(LogKind::Poop { amount })
    }

    /// Records a feeding.
    pub fn add_feed(&mut self, amount: Option<FeedAmount>) -> LogId {
        self.append(LogKind::Feed { amount })
    }

    /// Records a free-text memo, stored verbatim.
    pub fn add_memo(&mut self, text: impl Into<String>) -> LogId {
        self.append(LogKind::Memo { text: text.into() })
    }

    /// Opens a sleep interval.
    ///
    /// Returns `None` without appending anything when a sleep is already
    /// open (double-tap guard).
    pub fn start_sleep(&mut self) -> Option<LogId> {
        if self.active_sleep_id.is_some() {
            return None;
        }
        let id = self.append(LogKind::SleepStart);
        self.active_sleep_id = Some(id.clone());
        Some(id)
    }

    /// Closes the open sleep interval.
    ///
    /// Returns `None` without appending anything when no sleep is open.
    pub fn end_sleep(&mut self) -> Option<LogId> {
        let start_id = self.active_sleep_id.take()?;
        Some(self.append(LogKind::SleepEnd { start_id }))
    }

    /// Removes the entry with the given id, if present.
    ///
    /// Removing one half of a sleep pair leaves the other orphaned, and
    /// removing the active sleep start leaves the active pointer in place;
    /// both states are tolerated downstream rather than repaired here.
    pub fn delete(&mut self, id: &LogId) -> bool {
        let before = self.logs.len();
        self.logs.retain(|entry| entry.id != *id);
        before != self.logs.len()
    }

    /// Removes every entry whose `created_at` falls on the calendar day
    /// (in `tz`) that `instant` falls on. Returns the number removed.
    pub fn delete_day(&mut self, instant: DateTime<Utc>, tz: Tz) -> usize {
        let window = DayWindow::containing(instant, tz);
        let before = self.logs.len();
        self.logs.retain(|entry| !window.contains(entry.created_at));
        before - self.logs.len()
    }

    /// Removes everything and closes any open sleep.
    pub fn clear(&mut self) {
        self.logs.clear();
        self.active_sleep_id = None;
    }
}

/// The log book wired to durable storage.
///
/// Constructed from the persisted snapshot at process start; every
/// effective mutation is followed by a best-effort save of the whole
/// snapshot. Use [`Tracker::flush`] on teardown paths that need to know
/// whether the final write stuck.
#[derive(Debug)]
pub struct Tracker<R> {
    book: LogBook,
    repo: R,
}

impl<R: Repository> Tracker<R> {
    /// Restores state from `repo` and wires future saves to it.
    ///
    /// An absent snapshot starts empty; an unreadable one (backend failure
    /// or unsupported version) is logged and also starts empty, leaving the
    /// stored record untouched until the first mutation overwrites it.
    pub fn open(repo: R) -> Self {
        let book = match repo.load() {
            Ok(Some(snapshot)) => LogBook::from_snapshot(snapshot),
            Ok(None) => LogBook::new(),
            Err(err) => {
                tracing::warn!(%err, "could not restore snapshot; starting empty");
                LogBook::new()
            }
        };
        Self { book, repo }
    }

    /// Read access to the underlying book.
    pub const fn book(&self) -> &LogBook {
        &self.book
    }

    pub fn add_poop(&mut self, amount: Option<String>) -> LogId {
        let id = self.book.add_poop(amount);
        self.persist();
        id
    }

    pub fn add_feed(&mut self, amount: Option<FeedAmount>) -> LogId {
        let id = self.book.add_feed(amount);
        self.persist();
        id
    }

    pub fn add_memo(&mut self, text: impl Into<String>) -> LogId {
        let id = self.book.add_memo(text);
        self.persist();
        id
    }

    pub fn start_sleep(&mut self) -> Option<LogId> {
        let id = self.book.start_sleep()?;
        self.persist();
        Some(id)
    }

    pub fn end_sleep(&mut self) -> Option<LogId> {
        let id = self.book.end_sleep()?;
        self.persist();
        Some(id)
    }

    pub fn delete(&mut self, id: &LogId) -> bool {
        let removed = self.book.delete(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn delete_day(&mut self, instant: DateTime<Utc>, tz: Tz) -> usize {
        let removed = self.book.delete_day(instant, tz);
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn delete_all(&mut self) {
        self.book.clear();
        self.persist();
    }

    /// Saves the current snapshot, returning the error if it fails.
    pub fn flush(&self) -> Result<(), RepositoryError> {
        self.repo.save(&self.book.snapshot())
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.book.snapshot()) {
            tracing::warn!(%err, "snapshot save failed; log kept in memory only");
        }
    }
}
