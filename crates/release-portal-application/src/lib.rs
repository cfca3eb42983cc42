//! Release Portal Application Layer
//!
//! The Application Layer implements use cases by orchestrating domain rules
//! over the hierarchy store. It owns transaction boundaries, DTO mapping and
//! application events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Services          │ DTOs               │ Adapters           │ Events   │
//! │  ─────────         │ ────               │ ────────           │ ──────   │
//! │  HierarchyService  │ CreateReleaseCmd   │ TracingApproval-   │ AppEvent │
//! │  SignOffService    │ ReleaseView        │   Notifier         │          │
//! │  ReportService     │ ApprovalDispatch-  │                    │          │
//! │                    │   Report           │                    │          │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                     │
//! │  Entities, Status Model, cascades, HierarchyStore, ApprovalNotifier     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Non-Goals
//!
//! - Domain rules (belong in the Domain Layer)
//! - Storage (belongs in the persistence crate)
//! - HTTP handling (belongs in the api crate)

pub mod dto;
pub mod errors;
pub mod events;
pub mod notification;
pub mod services;

// Re-export commonly used types
pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use events::{ApplicationEvent, EventPublisher};
pub use notification::{ApprovalMessage, TracingApprovalNotifier};
pub use services::*;
