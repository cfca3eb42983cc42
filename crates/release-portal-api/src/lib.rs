#![warn(missing_docs)]

//! Release Portal RESTful API
//!
//! JSON endpoints over the release hierarchy: releases, teams, components
//! and user stories, the status mutators, approval notification and the
//! CSV status report. All routes live under `/api`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod settings;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::app;
pub use settings::PortalConfig;
pub use state::AppState;
