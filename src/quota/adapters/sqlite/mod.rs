//! `SQLite` adapter for quota persistence.

mod repository;

pub use repository::{QuotaSqlitePool, SqlitePragmas, SqliteQuotaRepository};
