//! Identifier and bucket-key types for the quota domain.

use super::QuotaDomainError;
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Format used when a bucket key is derived from a calendar date.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier of a registered user.
///
/// The value is stored exactly as supplied; lookups compare it byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaDomainError::BlankUserId`] when the value is empty or
    /// contains only whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, QuotaDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(QuotaDomainError::BlankUserId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage-generated identifier of a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Date bucket a task is counted against.
///
/// The key is opaque: two tasks share a bucket only when their date strings
/// are identical. No parsing, normalisation or timezone handling takes place,
/// so callers should build keys with [`TaskDate::from_naive_date`] or
/// [`TaskDate::today`] to keep them canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDate(String);

impl TaskDate {
    /// Wraps a caller-supplied bucket key.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaDomainError::EmptyTaskDate`] when the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, QuotaDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(QuotaDomainError::EmptyTaskDate);
        }
        Ok(Self(raw))
    }

    /// Builds the ISO 8601 (`YYYY-MM-DD`) key for a calendar date.
    #[must_use]
    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(date.format(ISO_DATE_FORMAT).to_string())
    }

    /// Builds the key for the current UTC calendar date.
    #[must_use]
    pub fn today(clock: &impl Clock) -> Self {
        Self::from_naive_date(clock.utc().date_naive())
    }

    /// Returns the bucket key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for TaskDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive_date(date)
    }
}

impl AsRef<str> for TaskDate {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
