//! Per-user daily task quotas.
//!
//! Users register with a per-day task ceiling and may create tasks until the
//! ceiling for a calendar day is reached. The ceiling holds under concurrent
//! requests because the final count check runs inside the insert transaction.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Admission control in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
