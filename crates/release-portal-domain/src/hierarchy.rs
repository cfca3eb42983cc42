//! Hierarchy cascade rules
//!
//! Explicit, recursive deletes over a [`HierarchyGraph`]. Each function is a
//! building block for one transaction; none of them commits anything itself.
//! Deletion only ever walks down: removing a team never touches its release,
//! removing a component never removes a story.

use serde::{Deserialize, Serialize};

use crate::association::{detach_component, Detachment};
use crate::entities::{Component, Release, Team, UserStory};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::HierarchyGraph;
use crate::value_objects::{ComponentId, EntityKind, ReleaseId, TeamId, UserStoryId};

/// Outcome of best-effort id resolution: what linked and what didn't
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution<T> {
    pub resolved: Vec<T>,
    pub unresolved: Vec<String>,
}

impl<T> Default for Resolution<T> {
    fn default() -> Self {
        Self {
            resolved: Vec::new(),
            unresolved: Vec::new(),
        }
    }
}

impl<T: From<String> + PartialEq> Resolution<T> {
    /// Partition `requested` by `exists`, keeping request order and
    /// collapsing duplicates on both sides.
    pub fn partition(requested: &[String], exists: impl Fn(&T) -> bool) -> Self {
        let mut resolution = Self::default();
        for raw in requested {
            let id = T::from(raw.clone());
            if exists(&id) {
                if !resolution.resolved.contains(&id) {
                    resolution.resolved.push(id);
                }
            } else if !resolution.unresolved.contains(raw) {
                resolution.unresolved.push(raw.clone());
            }
        }
        resolution
    }
}

/// Everything a delete removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub releases: Vec<ReleaseId>,
    pub teams: Vec<TeamId>,
    pub components: Vec<ComponentId>,
    pub user_stories: Vec<UserStoryId>,
    pub detached: Vec<Detachment>,
}

impl CascadeReport {
    pub fn removed_count(&self) -> usize {
        self.releases.len() + self.teams.len() + self.components.len() + self.user_stories.len()
    }
}

pub fn require_release<'a>(
    graph: &'a dyn HierarchyGraph,
    id: &ReleaseId,
) -> DomainResult<&'a Release> {
    graph
        .release(id)
        .ok_or_else(|| DomainError::not_found(EntityKind::Release, id.as_str()))
}

pub fn require_team<'a>(graph: &'a dyn HierarchyGraph, id: &TeamId) -> DomainResult<&'a Team> {
    graph
        .team(id)
        .ok_or_else(|| DomainError::not_found(EntityKind::Team, id.as_str()))
}

pub fn require_component<'a>(
    graph: &'a dyn HierarchyGraph,
    id: &ComponentId,
) -> DomainResult<&'a Component> {
    graph
        .component(id)
        .ok_or_else(|| DomainError::not_found(EntityKind::Component, id.as_str()))
}

pub fn require_user_story<'a>(
    graph: &'a dyn HierarchyGraph,
    id: &UserStoryId,
) -> DomainResult<&'a UserStory> {
    graph
        .user_story(id)
        .ok_or_else(|| DomainError::not_found(EntityKind::UserStory, id.as_str()))
}

/// Fail unless `id` is free across all four entity kinds.
///
/// Saves both insert and update; every create path calls this first.
pub fn require_unused_id(
    graph: &dyn HierarchyGraph,
    kind: EntityKind,
    id: &str,
) -> DomainResult<()> {
    if graph.id_in_use(id) {
        return Err(DomainError::integrity(format!(
            "cannot create {} '{}': id already in use",
            kind, id
        )));
    }
    Ok(())
}

/// Split requested team ids into those that exist and those that don't
pub fn resolve_teams(graph: &dyn HierarchyGraph, requested: &[String]) -> Resolution<TeamId> {
    Resolution::partition(requested, |id: &TeamId| graph.team(id).is_some())
}

/// Delete a release and, transitively, everything it owns
pub fn delete_release(
    graph: &mut dyn HierarchyGraph,
    id: &ReleaseId,
) -> DomainResult<CascadeReport> {
    require_release(graph, id)?;

    let mut report = CascadeReport::default();
    for team_id in graph.team_ids_of(id) {
        cascade_team(graph, &team_id, &mut report)?;
    }
    graph.remove_release(id)?;
    report.releases.push(id.clone());
    Ok(report)
}

/// Delete a team with its components and user stories
pub fn delete_team(graph: &mut dyn HierarchyGraph, id: &TeamId) -> DomainResult<CascadeReport> {
    require_team(graph, id)?;

    let mut report = CascadeReport::default();
    cascade_team(graph, id, &mut report)?;
    Ok(report)
}

/// Delete a component after detaching it from every referencing story
pub fn delete_component(
    graph: &mut dyn HierarchyGraph,
    id: &ComponentId,
) -> DomainResult<CascadeReport> {
    require_component(graph, id)?;

    let mut report = CascadeReport::default();
    remove_component(graph, id, &mut report)?;
    Ok(report)
}

/// Delete a user story. Components it referenced are untouched.
pub fn delete_user_story(
    graph: &mut dyn HierarchyGraph,
    id: &UserStoryId,
) -> DomainResult<CascadeReport> {
    graph.remove_user_story(id)?;
    Ok(CascadeReport {
        user_stories: vec![id.clone()],
        ..Default::default()
    })
}

fn cascade_team(
    graph: &mut dyn HierarchyGraph,
    id: &TeamId,
    report: &mut CascadeReport,
) -> DomainResult<()> {
    // Stories first so the team's own components have fewer references to detach
    for story_id in graph.user_story_ids_of(id) {
        graph.remove_user_story(&story_id)?;
        report.user_stories.push(story_id);
    }
    for component_id in graph.component_ids_of(id) {
        remove_component(graph, &component_id, report)?;
    }
    graph.remove_team(id)?;
    report.teams.push(id.clone());
    Ok(())
}

fn remove_component(
    graph: &mut dyn HierarchyGraph,
    id: &ComponentId,
    report: &mut CascadeReport,
) -> DomainResult<()> {
    let detached = detach_component(graph, id)?;
    graph.remove_component(id)?;
    report.detached.extend(detached);
    report.components.push(id.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_keeps_order_and_dedups() {
        let known = ["real-2".to_string(), "real-3".to_string()];
        let requested: Vec<String> = ["missing-1", "real-2", "real-2", "real-3", "missing-1"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let resolution = Resolution::partition(&requested, |id: &ComponentId| {
            known.iter().any(|k| k == id.as_str())
        });

        assert_eq!(
            resolution.resolved,
            vec![ComponentId::new("real-2"), ComponentId::new("real-3")]
        );
        assert_eq!(resolution.unresolved, vec!["missing-1".to_string()]);
    }
}
