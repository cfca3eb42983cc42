//! Application layer services
//!
//! These services orchestrate domain rules over the hierarchy store and
//! implement the use cases. All services are stateless and use constructor
//! injection for dependencies.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Services                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  HierarchyService - CRUD and cascades over the hierarchy     │
//! │  SignOffService   - status mutators, summary, notification   │
//! │  ReportService    - release metrics and CSV status report    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod hierarchy_service;
mod report_service;
mod signoff_service;

pub use hierarchy_service::HierarchyService;
pub use report_service::ReportService;
pub use signoff_service::SignOffService;
