//! Daily aggregation and the per-day display projection.
//!
//! Both functions are pure reads over a log slice; they never mutate and
//! can be recomputed on demand.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::day::DayWindow;
use crate::log::{LogEntry, LogKind};
use crate::types::LogId;

/// Aggregates for one local calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    /// Diaper changes inside the day window.
    pub poops: u32,
    /// Feedings inside the day window.
    pub feeds: u32,
    /// Total slept milliseconds, clipped to the day window.
    pub sleep_ms: i64,
}

/// Computes the aggregates for the day (in `tz`) that `instant` falls on.
///
/// Counting is windowed, but sleep pairing scans the whole log: a session
/// is stored as two independent entries, so a start from yesterday can
/// close today and each day gets exactly the overlap with its own window.
/// Ends whose start is missing contribute nothing.
pub fn daily_summary(logs: &[LogEntry], instant: DateTime<Utc>, tz: Tz) -> DailySummary {
    let window = DayWindow::containing(instant, tz);
    let mut summary = DailySummary::default();

    let mut start_times: HashMap<&LogId, DateTime<Utc>> = HashMap::new();
    let mut ends: Vec<(&LogId, DateTime<Utc>)> = Vec::new();

    for entry in logs {
        match &entry.kind {
            LogKind::Poop { .. } => {
                if window.contains(entry.created_at) {
                    summary.poops += 1;
                }
            }
            LogKind::Feed { .. } => {
                if window.contains(entry.created_at) {
                    summary.feeds += 1;
                }
            }
            LogKind::SleepStart => {
                start_times.insert(&entry.id, entry.created_at);
            }
            LogKind::SleepEnd { start_id } => {
                ends.push((start_id, entry.created_at));
            }
            LogKind::Memo { .. } => {}
        }
    }

    for (start_id, end_at) in ends {
        let Some(&start_at) = start_times.get(start_id) else {
            // Orphaned end (start deleted or never persisted): skip.
            continue;
        };
        let clipped_start = start_at.max(window.start);
        let clipped_end = end_at.min(window.end);
        if clipped_end > clipped_start {
            summary.sleep_ms += (clipped_end - clipped_start).num_milliseconds();
        }
    }

    summary
}

/// The entries to display for the day (in `tz`) that `instant` falls on:
/// filtered to the inclusive day window, most recent first.
///
/// Returns a snapshot list; entries with identical timestamps keep no
/// guaranteed relative order.
pub fn day_entries(logs: &[LogEntry], instant: DateTime<Utc>, tz: Tz) -> Vec<LogEntry> {
    let window = DayWindow::containing(instant, tz);
    let mut entries: Vec<LogEntry> = logs
        .iter()
        .filter(|entry| window.contains(entry.created_at))
        .cloned()
        .collect();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.created_at));
    entries
}

/// Formats milliseconds as `"2h 15m"`.
///
/// Hours floor; the minute remainder rounds half away from zero, so the
/// last half-minute before a full hour renders as `"0h 60m"` rather than
/// carrying. Negative input clamps to zero.
#[must_use]
pub fn format_duration(ms: i64) -> String {
    if ms <= 0 {
        return "0h 0m".to_string();
    }
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000 + 30_000) / 60_000;
    format!("{hours}h {minutes}m")
}
