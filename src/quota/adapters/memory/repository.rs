//! In-memory repository for quota tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::quota::{
    adapters::credentials_match,
    domain::{DailyQuota, NewTask, Password, Task, TaskDate, TaskId, User, UserId},
    ports::{QuotaRepository, QuotaRepositoryError, QuotaRepositoryResult, TaskLedger},
};

/// Thread-safe in-memory quota repository.
///
/// Task insertion holds the write lock for the insert and the post-insert
/// hook, which makes the pair atomic with respect to every other call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuotaRepository {
    state: Arc<RwLock<InMemoryQuotaState>>,
}

#[derive(Debug, Default)]
struct InMemoryQuotaState {
    users: HashMap<UserId, User>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryQuotaState {
    fn bucket<'s>(
        &'s self,
        user_id: &'s UserId,
        date: &'s TaskDate,
    ) -> impl Iterator<Item = &'s Task> + 's {
        self.tasks
            .values()
            .filter(move |task| task.user_id() == user_id && task.created_date() == date)
    }

    fn count_bucket(&self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32> {
        u32::try_from(self.bucket(user_id, date).count()).map_err(QuotaRepositoryError::storage)
    }
}

impl InMemoryQuotaRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ledger view over the locked state of an in-flight insert.
struct MemoryLedger<'s> {
    state: &'s InMemoryQuotaState,
}

impl TaskLedger for MemoryLedger<'_> {
    fn count_tasks(&mut self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32> {
        self.state.count_bucket(user_id, date)
    }
}

fn poisoned(err: &impl ToString) -> QuotaRepositoryError {
    QuotaRepositoryError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl QuotaRepository for InMemoryQuotaRepository {
    async fn add_user(&self, user: &User) -> QuotaRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.users.contains_key(user.id()) {
            return Err(QuotaRepositoryError::DuplicateUser(user.id().clone()));
        }
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn get_max_todo(&self, user_id: &UserId) -> QuotaRepositoryResult<DailyQuota> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        state
            .users
            .get(user_id)
            .map(User::max_todo)
            .ok_or_else(|| QuotaRepositoryError::UserNotFound(user_id.clone()))
    }

    async fn count_tasks(&self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        state.count_bucket(user_id, date)
    }

    async fn retrieve_tasks(
        &self,
        user_id: &UserId,
        date: &TaskDate,
    ) -> QuotaRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.bucket(user_id, date).cloned().collect())
    }

    async fn add_task<H, E>(&self, task: NewTask, post_insert: H) -> Result<Task, E>
    where
        H: FnOnce(&mut dyn TaskLedger, &UserId, &TaskDate) -> Result<(), E> + Send + 'static,
        E: From<QuotaRepositoryError> + Send + 'static,
    {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if !state.users.contains_key(task.user_id()) {
            return Err(QuotaRepositoryError::UserNotFound(task.user_id().clone()).into());
        }

        let stored = task.into_task(TaskId::new());
        state.tasks.insert(stored.id(), stored.clone());

        let mut ledger = MemoryLedger { state: &state };
        if let Err(err) = post_insert(&mut ledger, stored.user_id(), stored.created_date()) {
            state.tasks.remove(&stored.id());
            return Err(err);
        }
        Ok(stored)
    }

    async fn validate_user(&self, user_id: &UserId, password: &Password) -> bool {
        let lookup = self.state.read().map_err(|err| poisoned(&err)).map(|state| {
            state
                .users
                .get(user_id)
                .filter(|user| user.password() == password)
                .map(User::id)
                .cloned()
        });
        credentials_match(user_id, lookup)
    }
}
