//! Release hierarchy entities
//!
//! Entities live in an arena keyed by id. Children carry the id of their
//! parent; "children of X" is answered by the store's indexes, never by a
//! live back-pointer. Identifiers and parent links are fixed at construction
//! and have no setters.

mod component;
mod release;
mod team;
mod user_story;

pub use component::{Component, ComponentDraft, ComponentUpdate};
pub use release::{Release, ReleaseDraft, ReleaseUpdate};
pub use team::{Team, TeamDraft, TeamUpdate};
pub use user_story::{UserStory, UserStoryDraft, UserStoryUpdate, MAX_DESCRIPTION_LEN};

use crate::errors::{DomainError, DomainResult};

/// Trim `value` and reject it when nothing is left
pub(crate) fn require_non_blank(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional partial-update field
pub(crate) fn optional_non_blank(field: &str, value: Option<&str>) -> DomainResult<Option<String>> {
    value.map(|v| require_non_blank(field, v)).transpose()
}
