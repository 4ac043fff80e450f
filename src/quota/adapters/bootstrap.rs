//! Configuration-driven construction of the SQL quota repositories.
//!
//! [`open_repository`] is the single startup entry point: it builds the
//! connection pool for the configured backend, creates the schema when it is
//! missing and hands back a repository that owns the pool. Dropping the
//! repository (and every clone of it) closes the pooled connections.

use super::{
    postgres::{PostgresQuotaRepository, QuotaPgPool},
    sqlite::{QuotaSqlitePool, SqlitePragmas, SqliteQuotaRepository},
};
use crate::config::{ConfigError, StorageBackend, StorageConfig};
use crate::quota::{
    domain::{DailyQuota, NewTask, Password, Task, TaskDate, User, UserId},
    ports::{QuotaRepository, QuotaRepositoryError, QuotaRepositoryResult, TaskLedger},
};
use async_trait::async_trait;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use thiserror::Error;

/// Time a caller waits for a pooled connection before giving up.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while opening quota storage.
#[derive(Debug, Error)]
pub enum StorageBootstrapError {
    /// The configuration violates an invariant.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schema creation failed, usually because the database is unreachable.
    #[error("failed to prepare {backend:?} storage: {source}")]
    Schema {
        /// Backend that failed to initialise.
        backend: StorageBackend,
        /// Underlying repository failure.
        #[source]
        source: QuotaRepositoryError,
    },
}

/// Quota repository backed by whichever SQL engine the configuration selects.
#[derive(Debug, Clone)]
pub enum SqlQuotaRepository {
    /// `PostgreSQL` storage.
    Postgres(PostgresQuotaRepository),
    /// `SQLite` storage.
    Sqlite(SqliteQuotaRepository),
}

impl SqlQuotaRepository {
    /// Returns the backend this repository talks to.
    #[must_use]
    pub const fn backend(&self) -> StorageBackend {
        match self {
            Self::Postgres(_) => StorageBackend::Postgres,
            Self::Sqlite(_) => StorageBackend::Sqlite,
        }
    }
}

/// Builds the connection pool for `config`, applies the schema and returns
/// the repository.
///
/// # Errors
///
/// Returns [`StorageBootstrapError::Config`] for an invalid configuration and
/// [`StorageBootstrapError::Schema`] when the database cannot be reached or
/// the schema cannot be created.
pub async fn open_repository(
    config: &StorageConfig,
) -> Result<SqlQuotaRepository, StorageBootstrapError> {
    let validated = config.clone().validate()?;
    tracing::info!(
        backend = ?validated.backend,
        max_connections = validated.max_connections,
        "opening quota storage"
    );

    let repository = match validated.backend {
        StorageBackend::Postgres => {
            let repo = PostgresQuotaRepository::new(postgres_pool(&validated));
            repo.apply_schema().await.map(|()| SqlQuotaRepository::Postgres(repo))
        }
        StorageBackend::Sqlite => {
            let repo = SqliteQuotaRepository::new(sqlite_pool(&validated));
            repo.apply_schema().await.map(|()| SqlQuotaRepository::Sqlite(repo))
        }
    }
    .map_err(|source| {
        tracing::error!(backend = ?validated.backend, error = %source, "quota storage unavailable");
        StorageBootstrapError::Schema {
            backend: validated.backend,
            source,
        }
    })?;

    tracing::info!(backend = ?validated.backend, "quota storage ready");
    Ok(repository)
}

// Pools are built lazily; the first checkout (schema creation) surfaces
// connection failures.
fn postgres_pool(config: &StorageConfig) -> QuotaPgPool {
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build_unchecked(ConnectionManager::new(config.database_url.as_str()))
}

fn sqlite_pool(config: &StorageConfig) -> QuotaSqlitePool {
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(CONNECTION_TIMEOUT)
        .connection_customizer(Box::new(SqlitePragmas))
        .build_unchecked(ConnectionManager::new(config.database_url.as_str()))
}

#[async_trait]
impl QuotaRepository for SqlQuotaRepository {
    async fn add_user(&self, user: &User) -> QuotaRepositoryResult<()> {
        match self {
            Self::Postgres(repo) => repo.add_user(user).await,
            Self::Sqlite(repo) => repo.add_user(user).await,
        }
    }

    async fn get_max_todo(&self, user_id: &UserId) -> QuotaRepositoryResult<DailyQuota> {
        match self {
            Self::Postgres(repo) => repo.get_max_todo(user_id).await,
            Self::Sqlite(repo) => repo.get_max_todo(user_id).await,
        }
    }

    async fn count_tasks(&self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32> {
        match self {
            Self::Postgres(repo) => repo.count_tasks(user_id, date).await,
            Self::Sqlite(repo) => repo.count_tasks(user_id, date).await,
        }
    }

    async fn retrieve_tasks(
        &self,
        user_id: &UserId,
        date: &TaskDate,
    ) -> QuotaRepositoryResult<Vec<Task>> {
        match self {
            Self::Postgres(repo) => repo.retrieve_tasks(user_id, date).await,
            Self::Sqlite(repo) => repo.retrieve_tasks(user_id, date).await,
        }
    }

    async fn add_task<H, E>(&self, task: NewTask, post_insert: H) -> Result<Task, E>
    where
        H: FnOnce(&mut dyn TaskLedger, &UserId, &TaskDate) -> Result<(), E> + Send + 'static,
        E: From<QuotaRepositoryError> + Send + 'static,
    {
        match self {
            Self::Postgres(repo) => repo.add_task(task, post_insert).await,
            Self::Sqlite(repo) => repo.add_task(task, post_insert).await,
        }
    }

    async fn validate_user(&self, user_id: &UserId, password: &Password) -> bool {
        match self {
            Self::Postgres(repo) => repo.validate_user(user_id, password).await,
            Self::Sqlite(repo) => repo.validate_user(user_id, password).await,
        }
    }
}
