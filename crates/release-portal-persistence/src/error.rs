//! Persistence Layer Error Types
//!
//! Error mapping to domain types

use release_portal_domain::errors::DomainError;
use release_portal_domain::value_objects::EntityKind;
use thiserror::Error;

/// Errors raised by the arena when a write would break the hierarchy
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Child saved under a parent that does not exist
    #[error("{entity} {id} references missing {parent_kind} {parent_id}")]
    MissingParent {
        entity: EntityKind,
        id: String,
        parent_kind: EntityKind,
        parent_id: String,
    },

    /// Entity removed while something still depends on it
    #[error("{entity} {id} still has {dependents} dependent {dependent_kind} row(s)")]
    HasDependents {
        entity: EntityKind,
        id: String,
        dependent_kind: EntityKind,
        dependents: usize,
    },

    /// Attempt to rewrite a parent link outside release adoption
    #[error("{entity} {id} cannot move from {from} to {to}")]
    ParentReassigned {
        entity: EntityKind,
        id: String,
        from: String,
        to: String,
    },
}

impl PersistenceError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity, id } => DomainError::NotFound { entity, id },
            other => DomainError::IntegrityViolation {
                reason: other.to_string(),
            },
        }
    }
}
