//! `daily_quota`: per-user daily task quotas.
//!
//! Users register with a ceiling on the number of tasks they may create per
//! calendar day. Task creation is admitted only while the ceiling holds, and
//! the final check runs inside the insert transaction so that concurrent
//! requests cannot overshoot it.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   `SQLite`)
//!
//! # Modules
//!
//! - [`quota`]: Users, tasks and admission control
//! - [`config`]: Storage configuration from the environment
//! - [`telemetry`]: Tracing subscriber installation

pub mod config;
pub mod quota;
pub mod telemetry;
