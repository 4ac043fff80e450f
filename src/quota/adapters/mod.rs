//! Adapter implementations for quota persistence.
//!
//! - [`memory`]: lock-guarded in-process store for tests and embedding
//! - [`postgres`]: `PostgreSQL` store serialising writers with row locks
//! - [`sqlite`]: `SQLite` store serialising writers with immediate transactions
//! - [`bootstrap`]: configuration-driven selection of the SQL adapters

pub mod bootstrap;
pub mod memory;
pub mod postgres;
pub mod sqlite;

mod blocking;
mod models;
mod schema;

use crate::quota::{domain::UserId, ports::QuotaRepositoryResult};

/// Interprets a credential lookup, logging every outcome other than a match.
///
/// Callers cannot tell a wrong password from an unavailable store: both are
/// reported as `false`.
pub(crate) fn credentials_match<T>(
    user_id: &UserId,
    lookup: QuotaRepositoryResult<Option<T>>,
) -> bool {
    match lookup {
        Ok(Some(_)) => true,
        Ok(None) => {
            tracing::warn!(user_id = %user_id, "no user matches the supplied credentials");
            false
        }
        Err(err) => {
            tracing::error!(user_id = %user_id, error = %err, "credential lookup failed");
            false
        }
    }
}
