//! Application layer error types
//!
//! These errors represent application-level failures that are suitable
//! for API consumption. They keep the entity kind, id or field that caused
//! the failure and nothing about how the hierarchy is stored.

use release_portal_domain::errors::DomainError;
use release_portal_domain::value_objects::EntityKind;
use thiserror::Error;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    // === Validation Errors ===

    /// Input validation failed
    #[error("Validation failed: {field} - {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Status value outside the field's vocabulary
    #[error("Invalid status for {entity}.{field}: '{value}'")]
    InvalidStatus {
        entity: EntityKind,
        field: String,
        value: String,
    },

    // === Not Found Errors ===

    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    // === Infrastructure Errors ===

    /// A cascade or association update could not complete; nothing was applied
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    /// Approval notification could not be dispatched
    #[error("Notification failed: {0}")]
    NotificationFailed(String),

    /// Report rendering failed
    #[error("Report generation failed: {0}")]
    ReportFailed(String),
}

impl ApplicationError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller sent something malformed
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed { .. } | Self::InvalidStatus { .. }
        )
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => ApplicationError::NotFound { entity, id },
            DomainError::InvalidStatus {
                entity,
                field,
                value,
            } => ApplicationError::InvalidStatus {
                entity,
                field,
                value,
            },
            DomainError::InvalidArgument { field, reason } => {
                ApplicationError::ValidationFailed { field, reason }
            }
            DomainError::IntegrityViolation { reason } => {
                ApplicationError::IntegrityViolation(reason)
            }
            other @ DomainError::NotificationDispatchFailure { .. } => {
                ApplicationError::NotificationFailed(other.to_string())
            }
        }
    }
}

impl From<csv::Error> for ApplicationError {
    fn from(err: csv::Error) -> Self {
        ApplicationError::ReportFailed(err.to_string())
    }
}
