//! Repository port for users, tasks and transactional task insertion.

use crate::quota::domain::{DailyQuota, NewTask, Password, Task, TaskDate, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for quota repository operations.
pub type QuotaRepositoryResult<T> = Result<T, QuotaRepositoryError>;

/// Read access to task counts from inside an open insert transaction.
///
/// Counts observed through a ledger include the row inserted by the
/// transaction that handed the ledger out.
pub trait TaskLedger {
    /// Counts tasks in the `(user_id, date)` bucket.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaRepositoryError::Storage`] when the query fails.
    fn count_tasks(&mut self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32>;
}

/// User and task persistence contract.
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaRepositoryError::DuplicateUser`] when the identifier is
    /// already taken.
    async fn add_user(&self, user: &User) -> QuotaRepositoryResult<()>;

    /// Returns the daily task ceiling of a user.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaRepositoryError::UserNotFound`] when no such user exists.
    async fn get_max_todo(&self, user_id: &UserId) -> QuotaRepositoryResult<DailyQuota>;

    /// Counts tasks whose owner and date bucket match exactly.
    async fn count_tasks(&self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32>;

    /// Returns all tasks in the `(user_id, date)` bucket, in no particular
    /// order. An empty bucket yields an empty vector.
    async fn retrieve_tasks(
        &self,
        user_id: &UserId,
        date: &TaskDate,
    ) -> QuotaRepositoryResult<Vec<Task>>;

    /// Inserts a task and runs `post_insert` in the same transaction.
    ///
    /// The hook receives a [`TaskLedger`] bound to the open transaction along
    /// with the task's owner and date bucket. When the hook returns an error
    /// the insert is rolled back and the hook's error is returned unchanged.
    /// Storage failures are converted into `E` through
    /// [`QuotaRepositoryError`].
    ///
    /// # Errors
    ///
    /// Returns the hook's error, [`QuotaRepositoryError::UserNotFound`] when
    /// the owner does not exist, or [`QuotaRepositoryError::Storage`].
    async fn add_task<H, E>(&self, task: NewTask, post_insert: H) -> Result<Task, E>
    where
        H: FnOnce(&mut dyn TaskLedger, &UserId, &TaskDate) -> Result<(), E> + Send + 'static,
        E: From<QuotaRepositoryError> + Send + 'static;

    /// Returns `true` iff a user with exactly this identifier and password
    /// exists.
    ///
    /// Lookup failures are logged and reported as `false`.
    async fn validate_user(&self, user_id: &UserId, password: &Password) -> bool;
}

/// Errors returned by quota repository implementations.
#[derive(Debug, Clone, Error)]
pub enum QuotaRepositoryError {
    /// No user with the identifier exists.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Persistence-layer failure.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl QuotaRepositoryError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
