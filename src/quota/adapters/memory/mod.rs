//! In-memory adapter for quota persistence.

mod repository;

pub use repository::InMemoryQuotaRepository;
