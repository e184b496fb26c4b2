//! carenote-core
//!
//! Pure domain types and KB path conventions.
//! No network or AWS dependency. This is the shared vocabulary of the CareNote system.

pub mod error;
pub mod kb_paths;
pub mod models;
