//! In-Memory Hierarchy Store
//!
//! Thread-safe in-memory implementation of the domain store interfaces.
//! Suitable for tests, development and single-node deployments.

mod arena;
mod hierarchy_store;

pub use arena::{ArenaCounts, EntityArena};
pub use hierarchy_store::InMemoryHierarchyStore;
