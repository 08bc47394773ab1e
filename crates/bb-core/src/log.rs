//! Log entries: immutable records of tracked activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{FeedAmount, LogId};

/// One immutable record of a tracked activity.
///
/// Entries are only ever appended or deleted by id; there is no in-place
/// editing. The JSON layout is flat and camelCase:
/// `{"id": ..., "kind": "poop", "createdAt": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Unique identifier, assigned at creation.
    pub id: LogId,
    /// What happened.
    #[serde(flatten)]
    pub kind: LogKind,
    /// When it happened. Wall-clock, not guaranteed strictly increasing.
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Creates an entry with a fresh id, stamped now.
    pub fn new(kind: LogKind) -> Self {
        Self {
            id: LogId::generate(),
            kind,
            created_at: Utc::now(),
        }
    }
}

/// The kind of activity a log entry records.
///
/// `SleepEnd::start_id` is a non-owning back-reference to the `SleepStart`
/// it closes. The referenced entry may have been deleted; consumers must
/// treat a failed lookup as a skippable state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LogKind {
    /// A diaper change, with an optional free-form severity tag.
    Poop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<String>,
    },
    /// A feeding.
    Feed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<FeedAmount>,
    },
    /// The baby fell asleep.
    SleepStart,
    /// The baby woke up, closing the referenced sleep start.
    SleepEnd {
        #[serde(rename = "startId")]
        start_id: LogId,
    },
    /// A free-text note. The word limit is enforced by the producing
    /// collaborator, not here.
    Memo { text: String },
}

impl LogKind {
    /// The persisted tag for this kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Poop { .. } => "poop",
            Self::Feed { .. } => "feed",
            Self::SleepStart => "sleepStart",
            Self::SleepEnd { .. } => "sleepEnd",
            Self::Memo { .. } => "memo",
        }
    }
}
