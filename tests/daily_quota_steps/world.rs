//! Shared world state for daily quota BDD scenarios.

use std::sync::Arc;

use daily_quota::quota::{
    adapters::memory::InMemoryQuotaRepository,
    domain::Task,
    services::{AdmissionResult, TaskAdmissionService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestQuotaService = TaskAdmissionService<InMemoryQuotaRepository, DefaultClock>;

/// Scenario world for quota behaviour tests.
pub struct QuotaWorld {
    pub service: TestQuotaService,
    pub repository: Arc<InMemoryQuotaRepository>,
    pub last_result: Option<AdmissionResult<Task>>,
}

impl QuotaWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryQuotaRepository::new());
        let service = TaskAdmissionService::new(Arc::clone(&repository), Arc::new(DefaultClock));
        Self {
            service,
            repository,
            last_result: None,
        }
    }
}

impl Default for QuotaWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QuotaWorld {
    QuotaWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
