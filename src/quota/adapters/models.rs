//! Diesel row models and domain conversions shared by the SQL adapters.

use super::schema::{tasks, users};
use crate::quota::{
    domain::{DailyQuota, NewTask, PersistedTaskData, Task, TaskDate, TaskId, User, UserId},
    ports::{QuotaRepositoryError, QuotaRepositoryResult},
};
use diesel::prelude::*;
use uuid::Uuid;

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: String,
    /// Stored credential.
    pub password: String,
    /// Daily task ceiling.
    pub max_todo: i32,
}

impl NewUserRow {
    /// Builds an insert row from a domain user.
    #[must_use]
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_owned(),
            password: user.password().as_str().to_owned(),
            max_todo: user.max_todo().as_i32(),
        }
    }
}

/// Query result and insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
pub struct TaskRow {
    /// Task identifier as hyphenated UUID text.
    pub id: String,
    /// Owning user identifier.
    pub user_id: String,
    /// Task text.
    pub content: String,
    /// Date bucket key.
    pub created_date: String,
}

impl TaskRow {
    /// Assigns a fresh identifier to a pending task and builds its row.
    pub fn assign(task: NewTask) -> (Task, Self) {
        let stored = task.into_task(TaskId::new());
        let row = Self {
            id: stored.id().to_string(),
            user_id: stored.user_id().as_str().to_owned(),
            content: stored.content().to_owned(),
            created_date: stored.created_date().as_str().to_owned(),
        };
        (stored, row)
    }

    /// Reconstructs the domain task from a stored row.
    pub fn into_domain(self) -> QuotaRepositoryResult<Task> {
        let Self {
            id,
            user_id,
            content,
            created_date,
        } = self;
        let uuid = Uuid::parse_str(&id).map_err(QuotaRepositoryError::storage)?;
        let data = PersistedTaskData {
            id: TaskId::from_uuid(uuid),
            user_id: UserId::new(user_id).map_err(QuotaRepositoryError::storage)?,
            content,
            created_date: TaskDate::new(created_date).map_err(QuotaRepositoryError::storage)?,
        };
        Ok(Task::from_persisted(data))
    }
}

/// Converts a stored ceiling into the domain quota.
pub fn quota_from_row(max_todo: i32) -> QuotaRepositoryResult<DailyQuota> {
    DailyQuota::try_from(max_todo).map_err(QuotaRepositoryError::storage)
}

/// Converts a `COUNT(*)` result into a bucket size.
pub fn count_from_row(count: i64) -> QuotaRepositoryResult<u32> {
    u32::try_from(count).map_err(QuotaRepositoryError::storage)
}
