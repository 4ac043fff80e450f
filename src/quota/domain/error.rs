//! Error types for quota domain validation.

use thiserror::Error;

/// Errors returned while constructing domain quota values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuotaDomainError {
    /// The user identifier is empty or whitespace-only.
    #[error("user identifier must not be blank")]
    BlankUserId,

    /// The task date bucket is empty.
    #[error("task date must not be empty")]
    EmptyTaskDate,

    /// The daily quota is negative.
    #[error("invalid daily quota {0}, expected a non-negative integer")]
    NegativeDailyQuota(i64),

    /// The daily quota exceeds the largest storable ceiling.
    #[error("invalid daily quota {0}, the maximum is 2147483647")]
    DailyQuotaTooLarge(u32),
}
