//! Port contracts for quota persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the admission
//! service.

pub mod repository;

pub use repository::{QuotaRepository, QuotaRepositoryError, QuotaRepositoryResult, TaskLedger};
