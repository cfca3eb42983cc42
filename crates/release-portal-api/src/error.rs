//! API error types and handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use release_portal_application::ApplicationError;
use serde_json::json;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Failure raised by a use case
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Application(err) => match err {
                ApplicationError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                ApplicationError::ValidationFailed { .. } => {
                    (StatusCode::BAD_REQUEST, "validation_error")
                }
                ApplicationError::InvalidStatus { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_status")
                }
                ApplicationError::IntegrityViolation(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "integrity_violation")
                }
                ApplicationError::NotificationFailed(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "notification_error")
                }
                ApplicationError::ReportFailed(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "report_error")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use release_portal_domain::value_objects::EntityKind;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(ApplicationError::NotFound {
            entity: EntityKind::Team,
            id: "team-a-1".into(),
        });
        assert_eq!(err.status_and_type(), (StatusCode::NOT_FOUND, "not_found"));
        assert_eq!(err.to_string(), "Team not found: team-a-1");
    }

    #[test]
    fn test_client_errors_map_to_400() {
        let invalid = ApiError::from(ApplicationError::InvalidStatus {
            entity: EntityKind::Component,
            field: "checkmarx".into(),
            value: "Green".into(),
        });
        assert_eq!(invalid.status_and_type().0, StatusCode::BAD_REQUEST);

        let validation = ApiError::from(ApplicationError::validation("name", "must not be blank"));
        assert_eq!(validation.status_and_type().0, StatusCode::BAD_REQUEST);

        assert_eq!(ApiError::BadRequest("eof".into()).status_and_type().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_integrity_violation_maps_to_500() {
        let err = ApiError::from(ApplicationError::IntegrityViolation("dangling team".into()));
        assert_eq!(err.status_and_type().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
