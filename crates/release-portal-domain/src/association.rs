//! Association Integrity Engine
//!
//! Keeps the many-to-many link between components and user stories
//! consistent. The link is owned by the story side; a component never knows
//! who references it except through the store's reverse index.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::hierarchy::Resolution;
use crate::repositories::HierarchyGraph;
use crate::value_objects::{ComponentId, UserStoryId};

/// One association removed from one story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detachment {
    pub user_story_id: UserStoryId,
    pub component_id: ComponentId,
}

/// Remove `component_id` from every story that references it.
///
/// Each story loses exactly that one entry. Meant to run inside the same
/// transaction as the component's removal: if any story cannot be updated
/// the error aborts the whole transaction.
pub fn detach_component(
    graph: &mut dyn HierarchyGraph,
    component_id: &ComponentId,
) -> DomainResult<Vec<Detachment>> {
    let referencing = graph.user_stories_referencing(component_id);
    let mut detached = Vec::with_capacity(referencing.len());

    for story_id in referencing {
        let mut story = graph.user_story(&story_id).cloned().ok_or_else(|| {
            DomainError::integrity(format!(
                "component {} is indexed as referenced by missing user story {}",
                component_id, story_id
            ))
        })?;

        if !story.detach(component_id) {
            return Err(DomainError::integrity(format!(
                "user story {} is indexed as referencing component {} but does not",
                story_id, component_id
            )));
        }
        graph.save_user_story(story)?;

        detached.push(Detachment {
            user_story_id: story_id,
            component_id: component_id.clone(),
        });
    }

    if !graph.user_stories_referencing(component_id).is_empty() {
        return Err(DomainError::integrity(format!(
            "component {} is still referenced after detach",
            component_id
        )));
    }

    Ok(detached)
}

/// Split requested component ids into those that exist and those that don't
pub fn resolve_components(
    graph: &dyn HierarchyGraph,
    requested: &[String],
) -> Resolution<ComponentId> {
    Resolution::partition(requested, |id: &ComponentId| graph.component(id).is_some())
}
