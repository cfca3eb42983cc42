//! Release Portal Domain Layer
//!
//! Entities, value objects and the rules that keep a release hierarchy
//! (Release → Team → {Component, UserStory}) consistent.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Domain Layer                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ids          Identifier Generator (injected)                    │
//! │  status       Status Model: vocabularies, defaults, validator    │
//! │  entities     Release, Team, Component, UserStory                │
//! │  hierarchy    cascade deletes, best-effort id resolution         │
//! │  association  component ↔ user story link maintenance            │
//! │  signoff      sign-off aggregation, approval recipients          │
//! │  repositories HierarchyGraph / HierarchyStore contracts          │
//! │  ports        ApprovalNotifier                                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The domain layer defines only interfaces for persistence and
//! notification. `release-portal-persistence` implements the store and
//! `release-portal-application` orchestrates use cases on top.

pub mod association;
pub mod entities;
pub mod errors;
pub mod hierarchy;
pub mod ids;
pub mod ports;
pub mod repositories;
pub mod signoff;
pub mod status;
pub mod tree;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
pub use value_objects::{ComponentId, EntityKind, ReleaseId, TeamId, UserStoryId};
