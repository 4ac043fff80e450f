//! `PostgreSQL` repository implementation for users and tasks.

use crate::quota::{
    adapters::{
        blocking::{Rollback, get_conn, run_blocking, run_blocking_with},
        credentials_match,
        models::{NewUserRow, TaskRow, count_from_row, quota_from_row},
        schema::{tasks, users},
    },
    domain::{DailyQuota, NewTask, Password, Task, TaskDate, User, UserId},
    ports::{QuotaRepository, QuotaRepositoryError, QuotaRepositoryResult, TaskLedger},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Schema applied by [`PostgresQuotaRepository::apply_schema`].
const SCHEMA_SQL: &str = include_str!(
    "../../../../migrations/postgres/2026-10-19-000000_create_users_and_tasks/up.sql"
);

/// `PostgreSQL` connection pool type used by the quota adapter.
pub type QuotaPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed quota repository.
///
/// Task insertion locks the owner's row with `SELECT … FOR UPDATE` before
/// inserting, so concurrent inserts for one user run one after another and
/// each post-insert count sees every previously committed task.
#[derive(Debug, Clone)]
pub struct PostgresQuotaRepository {
    pool: QuotaPgPool,
}

impl PostgresQuotaRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: QuotaPgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &QuotaPgPool {
        &self.pool
    }

    /// Creates the `users` and `tasks` tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaRepositoryError::Storage`] when the DDL fails.
    pub async fn apply_schema(&self) -> QuotaRepositoryResult<()> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            conn.batch_execute(SCHEMA_SQL)
                .map_err(QuotaRepositoryError::storage)
        })
        .await
    }
}

/// Ledger bound to an open `PostgreSQL` transaction.
struct PgLedger<'c> {
    conn: &'c mut PgConnection,
}

impl TaskLedger for PgLedger<'_> {
    fn count_tasks(&mut self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32> {
        count_bucket(self.conn, user_id, date)
    }
}

#[async_trait]
impl QuotaRepository for PostgresQuotaRepository {
    async fn add_user(&self, user: &User) -> QuotaRepositoryResult<()> {
        let pool = self.pool.clone();
        let user_id = user.id().clone();
        let new_row = NewUserRow::from_domain(user);

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(&mut conn)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        QuotaRepositoryError::DuplicateUser(user_id)
                    }
                    _ => QuotaRepositoryError::storage(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn get_max_todo(&self, user_id: &UserId) -> QuotaRepositoryResult<DailyQuota> {
        let pool = self.pool.clone();
        let lookup_id = user_id.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let max_todo = users::table
                .filter(users::id.eq(lookup_id.as_str()))
                .select(users::max_todo)
                .first::<i32>(&mut conn)
                .optional()
                .map_err(QuotaRepositoryError::storage)?
                .ok_or_else(|| QuotaRepositoryError::UserNotFound(lookup_id.clone()))?;
            quota_from_row(max_todo)
        })
        .await
    }

    async fn count_tasks(&self, user_id: &UserId, date: &TaskDate) -> QuotaRepositoryResult<u32> {
        let pool = self.pool.clone();
        let lookup_id = user_id.clone();
        let lookup_date = date.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            count_bucket(&mut conn, &lookup_id, &lookup_date)
        })
        .await
    }

    async fn retrieve_tasks(
        &self,
        user_id: &UserId,
        date: &TaskDate,
    ) -> QuotaRepositoryResult<Vec<Task>> {
        let pool = self.pool.clone();
        let lookup_id = user_id.clone();
        let lookup_date = date.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            let rows = tasks::table
                .filter(tasks::user_id.eq(lookup_id.as_str()))
                .filter(tasks::created_date.eq(lookup_date.as_str()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(&mut conn)
                .map_err(QuotaRepositoryError::storage)?;
            rows.into_iter().map(TaskRow::into_domain).collect()
        })
        .await
    }

    async fn add_task<H, E>(&self, task: NewTask, post_insert: H) -> Result<Task, E>
    where
        H: FnOnce(&mut dyn TaskLedger, &UserId, &TaskDate) -> Result<(), E> + Send + 'static,
        E: From<QuotaRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();

        run_blocking_with(
            move || {
                let mut pooled = get_conn(&pool)?;
                let conn: &mut PgConnection = &mut pooled;
                conn.transaction::<_, Rollback<E>, _>(|tx| {
                    lock_user(tx, task.user_id())?;
                    let (stored, row) = TaskRow::assign(task);
                    diesel::insert_into(tasks::table).values(&row).execute(tx)?;
                    let mut ledger = PgLedger { conn: tx };
                    post_insert(&mut ledger, stored.user_id(), stored.created_date())
                        .map_err(Rollback)?;
                    Ok(stored)
                })
                .map_err(Rollback::into_inner)
            },
            |err| E::from(QuotaRepositoryError::storage(err)),
        )
        .await
    }

    async fn validate_user(&self, user_id: &UserId, password: &Password) -> bool {
        let pool = self.pool.clone();
        let lookup_id = user_id.clone();
        let lookup_password = password.clone();

        let lookup = run_blocking(move || {
            let mut conn = get_conn(&pool)?;
            users::table
                .filter(users::id.eq(lookup_id.as_str()))
                .filter(users::password.eq(lookup_password.as_str()))
                .select(users::id)
                .first::<String>(&mut conn)
                .optional()
                .map_err(QuotaRepositoryError::storage)
        })
        .await;
        credentials_match(user_id, lookup)
    }
}

/// Locks the owner's row for the rest of the transaction.
fn lock_user(conn: &mut PgConnection, user_id: &UserId) -> QuotaRepositoryResult<()> {
    let locked = users::table
        .filter(users::id.eq(user_id.as_str()))
        .select(users::id)
        .for_update()
        .first::<String>(conn)
        .optional()
        .map_err(QuotaRepositoryError::storage)?;
    if locked.is_none() {
        return Err(QuotaRepositoryError::UserNotFound(user_id.clone()));
    }
    Ok(())
}

fn count_bucket(
    conn: &mut PgConnection,
    user_id: &UserId,
    date: &TaskDate,
) -> QuotaRepositoryResult<u32> {
    let count: i64 = tasks::table
        .filter(tasks::user_id.eq(user_id.as_str()))
        .filter(tasks::created_date.eq(date.as_str()))
        .count()
        .get_result(conn)
        .map_err(QuotaRepositoryError::storage)?;
    count_from_row(count)
}
