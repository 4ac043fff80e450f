//! Domain model for daily task quotas.
//!
//! Users own a daily task ceiling; tasks are bucketed by the date string they
//! were created under. Infrastructure concerns stay outside of this module.

mod error;
mod ids;
mod task;
mod user;

pub use error::QuotaDomainError;
pub use ids::{TaskDate, TaskId, UserId};
pub use task::{NewTask, PersistedTaskData, Task};
pub use user::{DailyQuota, Password, User};
