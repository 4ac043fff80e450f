//! Registered users and their daily task ceiling.

use super::{QuotaDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored credential of a user.
///
/// The value is opaque and kept exactly as registered. `Debug` output is
/// redacted so credentials do not leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wraps a credential string without altering it.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Maximum number of tasks a user may create per date bucket.
///
/// Ceilings range from zero to [`DailyQuota::MAX`], the largest value the
/// storage column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DailyQuota(u32);

impl DailyQuota {
    /// Largest supported ceiling.
    pub const MAX: u32 = 2_147_483_647;

    /// Creates a quota from an unsigned ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaDomainError::DailyQuotaTooLarge`] when `value` exceeds
    /// [`Self::MAX`].
    pub const fn new(value: u32) -> Result<Self, QuotaDomainError> {
        if value > Self::MAX {
            return Err(QuotaDomainError::DailyQuotaTooLarge(value));
        }
        Ok(Self(value))
    }

    /// Returns the ceiling.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the ceiling as the signed integer stored in the database.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }

    /// Returns `true` when `count` tasks in one bucket stay within the ceiling.
    #[must_use]
    pub const fn admits(self, count: u32) -> bool {
        count <= self.0
    }
}

impl TryFrom<u32> for DailyQuota {
    type Error = QuotaDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for DailyQuota {
    type Error = QuotaDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| QuotaDomainError::NegativeDailyQuota(i64::from(value)))
    }
}

impl From<DailyQuota> for u32 {
    fn from(quota: DailyQuota) -> Self {
        quota.0
    }
}

impl fmt::Display for DailyQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    password: Password,
    max_todo: DailyQuota,
}

impl User {
    /// Creates a user record ready to be registered.
    #[must_use]
    pub const fn new(id: UserId, password: Password, max_todo: DailyQuota) -> Self {
        Self {
            id,
            password,
            max_todo,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the stored credential.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the daily task ceiling.
    #[must_use]
    pub const fn max_todo(&self) -> DailyQuota {
        self.max_todo
    }
}
