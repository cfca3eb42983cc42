//! API request and response models
//!
//! Commands and views come from the application layer; these are the
//! bodies of the dedicated status endpoints plus the health payload.

use serde::{Deserialize, Serialize};

/// `PUT .../components/:component_id/scan`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatusRequest {
    /// `sonarQube`, `nexusIq` or `checkmarx`
    pub scan_type: String,
    /// New scan status
    pub status: String,
}

/// `PUT .../user-stories/:story_id/qa-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaStatusRequest {
    /// New QA status
    pub qa_status: String,
}

/// `PUT .../teams/:team_id/qa-signoff`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaSignOffRequest {
    /// New QA sign-off status
    pub qa_signed_off: String,
}

/// `PUT .../teams/:team_id/appowner-signoff`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOwnerSignOffRequest {
    /// New app-owner sign-off status
    pub app_owner_signed_off: String,
}

/// `PUT /releases/:release_id/overall-signoff`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSignOffRequest {
    /// New overall sign-off status
    pub overall_app_owner_signed_off: String,
}

/// `PUT /releases/:release_id/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseStatusRequest {
    /// New release status
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since start
    pub uptime: u64,
}
