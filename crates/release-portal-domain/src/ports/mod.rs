//! Ports to collaborators outside the core
//!
//! Implementations live in the application and infrastructure layers.

pub mod notification;

pub use notification::ApprovalNotifier;
