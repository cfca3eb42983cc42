//! User story entity

use serde::{Deserialize, Serialize};

use super::require_non_blank;
use crate::errors::{DomainError, DomainResult};
use crate::status::QaStatus;
use crate::value_objects::{ComponentId, TeamId, UserStoryId};

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Unit of work tracked by QA status.
///
/// `component_ids` is an association set, not ownership: insertion order is
/// kept for display but an id appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    id: UserStoryId,
    team_id: TeamId,
    description: String,
    qa_status: QaStatus,
    component_ids: Vec<ComponentId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStoryDraft {
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStoryUpdate {
    pub description: Option<String>,
}

impl UserStory {
    /// Build a story under `team_id` with QA `Pending`.
    ///
    /// `component_ids` must already be resolved; duplicates are collapsed.
    pub fn new(
        id: UserStoryId,
        team_id: TeamId,
        draft: UserStoryDraft,
        component_ids: Vec<ComponentId>,
    ) -> DomainResult<Self> {
        let mut story = Self {
            id,
            team_id,
            description: validate_description(&draft.description)?,
            qa_status: QaStatus::default(),
            component_ids: Vec::with_capacity(component_ids.len()),
        };
        for component_id in component_ids {
            if !story.component_ids.contains(&component_id) {
                story.component_ids.push(component_id);
            }
        }
        Ok(story)
    }

    pub fn apply(&mut self, update: UserStoryUpdate) -> DomainResult<()> {
        if let Some(description) = update.description {
            self.description = validate_description(&description)?;
        }
        Ok(())
    }

    pub fn set_qa_status(&mut self, status: QaStatus) -> QaStatus {
        std::mem::replace(&mut self.qa_status, status)
    }

    /// Whether this story is associated with `component_id`
    pub fn references(&self, component_id: &ComponentId) -> bool {
        self.component_ids.contains(component_id)
    }

    /// Remove a single association, leaving the others in place.
    /// Returns false when the story was not associated with it.
    pub fn detach(&mut self, component_id: &ComponentId) -> bool {
        let before = self.component_ids.len();
        self.component_ids.retain(|id| id != component_id);
        self.component_ids.len() != before
    }

    pub fn id(&self) -> &UserStoryId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn qa_status(&self) -> QaStatus {
        self.qa_status
    }

    pub fn component_ids(&self) -> &[ComponentId] {
        &self.component_ids
    }
}

fn validate_description(description: &str) -> DomainResult<String> {
    let description = require_non_blank("description", description)?;
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::invalid_argument(
            "description",
            format!("must be at most {} characters", MAX_DESCRIPTION_LEN),
        ));
    }
    Ok(description)
}
