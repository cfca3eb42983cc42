//! Property-based tests for identifiers and status vocabularies
//!
//! These tests verify that the Identifier Generator and the Status Model hold
//! their invariants across arbitrary inputs.

use std::collections::HashSet;

use proptest::prelude::*;
use release_portal_domain::errors::DomainError;
use release_portal_domain::ids::{slugify, IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
use release_portal_domain::status::{
    validate, QaStatus, ReleaseStatus, ScanStatus, SignOffStatus, StatusField, StatusVocabulary,
};

// ============================================================================
// Identifier Generator Property Tests
// ============================================================================

proptest! {
    /// Slugs are lowercase and never contain doubled or edge separators
    #[test]
    fn test_slug_shape(name in ".{0,80}") {
        let slug = slugify(&name);
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(!slug.chars().any(char::is_whitespace));
        prop_assert_eq!(slug.clone(), slug.to_lowercase());
    }

    /// Slugging is idempotent
    #[test]
    fn test_slug_idempotent(name in "[A-Za-z0-9 _-]{0,60}") {
        let once = slugify(&name);
        prop_assert_eq!(slugify(&once), once);
    }

    /// Any name with a letter or digit yields an id containing its slug
    #[test]
    fn test_generated_id_contains_slug(name in "[A-Za-z][A-Za-z0-9 ]{0,30}") {
        let ids = TimestampIdGenerator::new();
        let id = ids.generate("", &name).unwrap();
        prop_assert!(!id.is_empty());
        prop_assert!(id.starts_with(&slugify(&name)));
    }

    /// Names without letters or digits are rejected
    #[test]
    fn test_unsluggable_name_rejected(name in "[ \\t!@#$%^&*()_-]{0,20}") {
        let ids = SequentialIdGenerator::new();
        let err = ids.generate("scope", &name).unwrap_err();
        let is_invalid_argument = matches!(err, DomainError::InvalidArgument { .. });
        prop_assert!(is_invalid_argument);
    }

    /// Ids never repeat, even for identical names and scopes
    #[test]
    fn test_ids_unique_for_identical_names(count in 1usize..200) {
        let ids = TimestampIdGenerator::new();
        let generated: HashSet<String> = (0..count)
            .map(|_| ids.generate("team-1", "Billing").unwrap())
            .collect();
        prop_assert_eq!(generated.len(), count);
    }
}

// ============================================================================
// Status Model Property Tests
// ============================================================================

fn accepts_exactly<T: StatusVocabulary>(value: &str) -> bool {
    T::VALUES.iter().any(|v| v.as_str() == value || v.as_str().replace(' ', "") == value)
}

proptest! {
    /// Arbitrary strings are accepted iff they are a vocabulary member
    #[test]
    fn test_validator_is_closed(value in ".{0,16}") {
        for field in StatusField::ALL {
            let result = field.parse(&value);
            let expected = match field {
                StatusField::ReleaseStatus => accepts_exactly::<ReleaseStatus>(&value),
                StatusField::OverallAppOwnerSignOff
                | StatusField::TeamQaSignOff
                | StatusField::TeamAppOwnerSignOff => accepts_exactly::<SignOffStatus>(&value),
                StatusField::SonarQube | StatusField::NexusIq | StatusField::Checkmarx => {
                    accepts_exactly::<ScanStatus>(&value)
                }
                StatusField::UserStoryQaStatus => accepts_exactly::<QaStatus>(&value),
            };
            prop_assert_eq!(result.is_ok(), expected);
        }
    }

    /// Every allowed value validates through the entity-level entry point
    #[test]
    fn test_allowed_values_validate(index in 0usize..8) {
        let field = StatusField::ALL[index];
        for value in field.allowed_values() {
            let parsed = validate(field.entity(), field.name(), value).unwrap();
            prop_assert_eq!(parsed.as_str(), value);
        }
    }
}

#[test]
fn test_rejected_status_reports_entity_and_field() {
    let err = validate(
        release_portal_domain::EntityKind::Component,
        "checkmarx",
        "Skipped",
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid status for Component.checkmarx: 'Skipped'"
    );
}
