//! Task records counted against a user's daily quota.

use super::{TaskDate, TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Task submitted for creation, before storage assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    user_id: UserId,
    content: String,
    created_date: TaskDate,
}

impl NewTask {
    /// Creates a pending task for the given owner and date bucket.
    #[must_use]
    pub fn new(user_id: UserId, content: impl Into<String>, created_date: TaskDate) -> Self {
        Self {
            user_id,
            content: content.into(),
            created_date,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the task text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the date bucket.
    #[must_use]
    pub const fn created_date(&self) -> &TaskDate {
        &self.created_date
    }

    /// Attaches a storage-generated identifier, producing a stored task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            user_id: self.user_id,
            content: self.content,
            created_date: self.created_date,
        })
    }
}

/// Stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    content: String,
    created_date: TaskDate,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub user_id: UserId,
    /// Task text.
    pub content: String,
    /// Date bucket the task was created under.
    pub created_date: TaskDate,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            content: data.content,
            created_date: data.created_date,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the task text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the date bucket.
    #[must_use]
    pub const fn created_date(&self) -> &TaskDate {
        &self.created_date
    }
}
