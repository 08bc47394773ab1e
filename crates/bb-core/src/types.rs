//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid feed amount value.
    #[error("invalid feed amount: {value}")]
    InvalidFeedAmount { value: String },
}

/// A validated log entry identifier.
///
/// Entry IDs must be non-empty strings. Freshly created entries get a UUID v4,
/// but any non-empty string deserializes (older stores used other shapes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogId(String);

impl LogId {
    /// Creates an ID from an existing string after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "log ID" });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LogId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogId> for String {
    fn from(id: LogId) -> Self {
        id.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How much the baby drank at a feeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedAmount {
    ALot,
    Normal,
    Barely,
}

impl FeedAmount {
    /// String representation, matching the persisted form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ALot => "a-lot",
            Self::Normal => "normal",
            Self::Barely => "barely",
        }
    }
}

impl fmt::Display for FeedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a-lot" => Ok(Self::ALot),
            "normal" => Ok(Self::Normal),
            "barely" => Ok(Self::Barely),
            _ => Err(ValidationError::InvalidFeedAmount {
                value: s.to_string(),
            }),
        }
    }
}
