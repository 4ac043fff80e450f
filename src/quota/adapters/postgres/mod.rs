//! `PostgreSQL` adapter for quota persistence.

mod repository;

pub use repository::{PostgresQuotaRepository, QuotaPgPool};
