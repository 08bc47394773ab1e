//! Core domain logic for the baby care tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - The log book: the append-biased event log and active-sleep pointer
//! - Day windows: timezone-correct local calendar day boundaries
//! - Summaries: per-day diaper/feed counts and clipped sleep totals
//! - Persistence: the versioned snapshot layout and repository seam

pub mod day;
mod log;
pub mod repo;
mod store;
pub mod summary;
mod types;

pub use day::{
    DayWindow, TimeError, end_of_local_day, midnight_instant, resolve_timezone, start_of_local_day,
};
pub use log::{LogEntry, LogKind};
pub use repo::{MemoryRepository, Repository, RepositoryError, Snapshot, SnapshotState};
pub use store::{LogBook, Tracker};
pub use summary::{DailySummary, daily_summary, day_entries, format_duration};
pub use types::{FeedAmount, LogId, ValidationError};
