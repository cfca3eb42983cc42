//! Domain errors for the release portal

use thiserror::Error;

use crate::value_objects::EntityKind;

/// Core domain errors
///
/// Every variant names the entity kind, id or field that caused it and
/// nothing about how the graph is stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Invalid status for {entity}.{field}: '{value}'")]
    InvalidStatus {
        entity: EntityKind,
        field: String,
        value: String,
    },

    #[error("Invalid argument: {field} - {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Integrity violation: {reason}")]
    IntegrityViolation { reason: String },

    #[error("Approval notification for release {release_id} failed: {reason}")]
    NotificationDispatchFailure { release_id: String, reason: String },
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an integrity violation error
    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            reason: reason.into(),
        }
    }

    /// Whether this error denotes a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_kind_and_id() {
        let err = DomainError::not_found(EntityKind::Team, "team-a-1");
        assert_eq!(err.to_string(), "Team not found: team-a-1");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_status_names_field() {
        let err = DomainError::InvalidStatus {
            entity: EntityKind::Component,
            field: "sonarQube".into(),
            value: "Maybe".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid status for Component.sonarQube: 'Maybe'"
        );
        assert!(!err.is_not_found());
    }
}
