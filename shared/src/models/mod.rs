//! Data models
//!
//! Shapes exchanged with the onboarding backend. Ids are carried as strings
//! throughout, mirroring raw form input.

pub mod employee;
pub mod master;

// Re-exports
pub use employee::*;
pub use master::*;
