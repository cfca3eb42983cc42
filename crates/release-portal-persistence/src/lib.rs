//! Release Portal Persistence Layer
//!
//! Infrastructure layer providing the hierarchy store defined in
//! `release-portal-domain`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                                                         │
//! │  ─────────                                                       │
//! │  EntityArena            (HierarchyGraph: rows + indexes)         │
//! │  InMemoryHierarchyStore (HierarchyStore: snapshot transactions)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                               │
//! │            HierarchyGraph, HierarchyStore                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use release_portal_persistence::InMemoryHierarchyStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryHierarchyStore::new());
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;

pub use error::PersistenceError;

#[cfg(feature = "memory")]
pub use memory::{ArenaCounts, EntityArena, InMemoryHierarchyStore};
