//! Data Transfer Objects (DTOs) for layer boundary crossing
//!
//! Commands carry raw input in (ids and dates as strings, validated by the
//! services); views carry snapshots out. JSON field names are camelCase.

pub mod commands;
pub mod views;

// Re-export commonly used DTOs
pub use commands::*;
pub use views::*;
