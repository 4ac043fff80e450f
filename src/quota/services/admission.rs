//! Admission control for task creation under a daily quota.
//!
//! A request moves through [`AdmissionStage`]s: it is received, its quota is
//! checked against the committed count, the task is inserted tentatively and
//! the transaction then either commits or rolls back. The decisive count runs
//! inside the insert transaction, so the ceiling holds when requests for the
//! same user race each other.

use crate::quota::{
    domain::{DailyQuota, NewTask, Password, QuotaDomainError, Task, TaskDate, User, UserId},
    ports::{QuotaRepository, QuotaRepositoryError, TaskLedger},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    user_id: String,
    password: String,
    max_todo: i32,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(user_id: impl Into<String>, password: impl Into<String>, max_todo: i32) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
            max_todo,
        }
    }
}

/// Request payload for creating a task in an explicit date bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    user_id: String,
    content: String,
    date: String,
}

impl CreateTaskRequest {
    /// Creates a task request for the given owner and date bucket.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        content: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            content: content.into(),
            date: date.into(),
        }
    }
}

/// Progress of a task-creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdmissionStage {
    /// The request has been accepted for evaluation.
    Received,
    /// The ceiling is known and the committed count is below it.
    QuotaChecked,
    /// The task row exists inside an open transaction.
    Inserted,
    /// The task is durable.
    Committed,
    /// The insert was undone; no task was persisted.
    RolledBack,
}

impl AdmissionStage {
    /// Returns the stage name used in log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::QuotaChecked => "quota_checked",
            Self::Inserted => "inserted",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

/// Service-level errors for quota admission.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The ceiling could not be determined, so the request was refused.
    #[error("daily quota unknown for user {user_id}: {source}")]
    QuotaUnknown {
        /// User whose ceiling lookup failed.
        user_id: UserId,
        /// Lookup failure.
        #[source]
        source: QuotaRepositoryError,
    },

    /// Creating the task would exceed the user's ceiling for the bucket.
    #[error("user {user_id} reached the daily quota of {limit} tasks for {date}")]
    QuotaExceeded {
        /// Owner of the rejected task.
        user_id: UserId,
        /// Date bucket that is full.
        date: TaskDate,
        /// Ceiling in force.
        limit: DailyQuota,
    },

    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] QuotaDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] QuotaRepositoryError),
}

/// Result type for admission service operations.
pub type AdmissionResult<T> = Result<T, AdmissionError>;

/// Quota enforcer orchestrating user registration and task admission.
#[derive(Clone)]
pub struct TaskAdmissionService<R, C>
where
    R: QuotaRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskAdmissionService<R, C>
where
    R: QuotaRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new admission service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a user with a daily ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionError::Domain`] for a blank identifier or negative
    /// ceiling and [`AdmissionError::Repository`] when the identifier is taken
    /// or storage fails.
    pub async fn register_user(&self, request: RegisterUserRequest) -> AdmissionResult<User> {
        let user = User::new(
            UserId::new(request.user_id)?,
            Password::new(request.password),
            DailyQuota::try_from(request.max_todo)?,
        );
        self.repository.add_user(&user).await?;
        tracing::info!(user_id = %user.id(), max_todo = %user.max_todo(), "user registered");
        Ok(user)
    }

    /// Checks a user's credentials.
    ///
    /// Returns `false` for unknown users, wrong passwords and storage
    /// failures alike.
    pub async fn authenticate(&self, user_id: &str, password: &str) -> bool {
        let Ok(id) = UserId::new(user_id) else {
            tracing::warn!("rejected credentials with a blank user identifier");
            return false;
        };
        self.repository
            .validate_user(&id, &Password::new(password))
            .await
    }

    /// Creates a task in the request's date bucket.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionError::QuotaUnknown`] when the ceiling lookup fails,
    /// [`AdmissionError::QuotaExceeded`] when the bucket is full, and
    /// [`AdmissionError::Domain`] or [`AdmissionError::Repository`] for
    /// invalid input or storage failures.
    pub async fn create_task(&self, request: CreateTaskRequest) -> AdmissionResult<Task> {
        let user_id = UserId::new(request.user_id)?;
        let date = TaskDate::new(request.date)?;
        self.admit(NewTask::new(user_id, request.content, date)).await
    }

    /// Creates a task in the bucket for the current UTC date.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_task`].
    pub async fn create_task_today(
        &self,
        user_id: &str,
        content: impl Into<String>,
    ) -> AdmissionResult<Task> {
        let date = TaskDate::today(&*self.clock);
        self.admit(NewTask::new(UserId::new(user_id)?, content, date))
            .await
    }

    /// Lists the tasks in one date bucket.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionError::Repository`] when the lookup fails.
    pub async fn tasks_for(
        &self,
        user_id: &UserId,
        date: &TaskDate,
    ) -> AdmissionResult<Vec<Task>> {
        Ok(self.repository.retrieve_tasks(user_id, date).await?)
    }

    async fn admit(&self, task: NewTask) -> AdmissionResult<Task> {
        let user_id = task.user_id().clone();
        let date = task.created_date().clone();
        log_stage(AdmissionStage::Received, &user_id, &date);

        let limit = self
            .repository
            .get_max_todo(&user_id)
            .await
            .map_err(|source| AdmissionError::QuotaUnknown {
                user_id: user_id.clone(),
                source,
            })?;
        self.precheck(&user_id, &date, limit).await?;
        log_stage(AdmissionStage::QuotaChecked, &user_id, &date);

        let outcome = self
            .repository
            .add_task(task, move |ledger, owner, bucket| {
                enforce_quota(ledger, owner, bucket, limit)
            })
            .await;
        log_outcome(&outcome, &user_id, &date);
        outcome
    }

    /// Rejects a request whose bucket is already full. The check that
    /// guarantees the ceiling runs again inside the insert transaction.
    async fn precheck(
        &self,
        user_id: &UserId,
        date: &TaskDate,
        limit: DailyQuota,
    ) -> AdmissionResult<()> {
        let committed = self.repository.count_tasks(user_id, date).await?;
        if limit.admits(committed.saturating_add(1)) {
            return Ok(());
        }
        tracing::warn!(
            user_id = %user_id,
            date = %date,
            limit = %limit,
            committed,
            "daily quota already reached"
        );
        Err(AdmissionError::QuotaExceeded {
            user_id: user_id.clone(),
            date: date.clone(),
            limit,
        })
    }
}

/// Post-insert hook: vetoes the insert when the bucket, now including the
/// tentative row, holds more tasks than `limit` allows.
fn enforce_quota(
    ledger: &mut dyn TaskLedger,
    user_id: &UserId,
    date: &TaskDate,
    limit: DailyQuota,
) -> AdmissionResult<()> {
    log_stage(AdmissionStage::Inserted, user_id, date);
    let count = ledger.count_tasks(user_id, date)?;
    if limit.admits(count) {
        return Ok(());
    }
    Err(AdmissionError::QuotaExceeded {
        user_id: user_id.clone(),
        date: date.clone(),
        limit,
    })
}

fn log_outcome(outcome: &AdmissionResult<Task>, user_id: &UserId, date: &TaskDate) {
    match outcome {
        Ok(created) => {
            log_stage(AdmissionStage::Committed, user_id, date);
            tracing::info!(
                task_id = %created.id(),
                user_id = %user_id,
                date = %date,
                "task created"
            );
        }
        Err(err) => {
            tracing::warn!(
                stage = AdmissionStage::RolledBack.as_str(),
                user_id = %user_id,
                date = %date,
                error = %err,
                "task creation rolled back"
            );
        }
    }
}

fn log_stage(stage: AdmissionStage, user_id: &UserId, date: &TaskDate) {
    tracing::debug!(stage = stage.as_str(), user_id = %user_id, date = %date, "task admission");
}
