//! Blocking operation helpers shared by the SQL adapters.
//!
//! Diesel connections are synchronous, so every repository call is offloaded
//! to the blocking thread pool. Transactions report their failure through
//! [`Rollback`], which lets a caller-chosen error type pass through Diesel's
//! transaction API untouched.

use crate::quota::ports::{QuotaRepositoryError, QuotaRepositoryResult};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection, R2D2Connection};

/// Runs a blocking repository operation on the blocking thread pool.
pub(super) async fn run_blocking<F, T>(f: F) -> QuotaRepositoryResult<T>
where
    F: FnOnce() -> QuotaRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    run_blocking_with(f, QuotaRepositoryError::storage).await
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(super) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool.
pub(super) fn get_conn<C>(
    pool: &Pool<ConnectionManager<C>>,
) -> QuotaRepositoryResult<PooledConnection<ConnectionManager<C>>>
where
    C: R2D2Connection + Send + 'static,
{
    pool.get().map_err(QuotaRepositoryError::storage)
}

/// Transaction failure carrying the error handed back to the caller.
pub(super) struct Rollback<E>(pub E);

impl<E> Rollback<E> {
    /// Unwraps the caller-facing error.
    pub fn into_inner(self) -> E {
        self.0
    }
}

impl<E> From<diesel::result::Error> for Rollback<E>
where
    E: From<QuotaRepositoryError>,
{
    fn from(err: diesel::result::Error) -> Self {
        Self(E::from(QuotaRepositoryError::storage(err)))
    }
}

impl<E> From<QuotaRepositoryError> for Rollback<E>
where
    E: From<QuotaRepositoryError>,
{
    fn from(err: QuotaRepositoryError) -> Self {
        Self(E::from(err))
    }
}
