//! Step definitions for daily quota scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
