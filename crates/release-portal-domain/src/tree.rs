//! Read-side snapshots of a release and everything under it

use serde::{Deserialize, Serialize};

use crate::entities::{Component, Release, Team, UserStory};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::HierarchyGraph;
use crate::value_objects::{ComponentId, EntityKind, ReleaseId, TeamId};

/// A release with its teams, as seen at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseTree {
    pub release: Release,
    pub teams: Vec<TeamTree>,
}

/// A team with its components and user stories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTree {
    pub team: Team,
    pub components: Vec<Component>,
    pub user_stories: Vec<UserStory>,
}

impl ReleaseTree {
    /// Assemble the tree rooted at `id`
    pub fn load(graph: &dyn HierarchyGraph, id: &ReleaseId) -> DomainResult<Self> {
        let release = graph
            .release(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(EntityKind::Release, id.as_str()))?;

        let teams = graph
            .team_ids_of(id)
            .iter()
            .map(|team_id| TeamTree::load(graph, team_id))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self { release, teams })
    }

    /// Every release in the graph, ordered by release date then id
    pub fn load_all(graph: &dyn HierarchyGraph) -> DomainResult<Vec<Self>> {
        let mut releases = graph.releases();
        releases.sort_by(|a, b| {
            a.release_date()
                .cmp(&b.release_date())
                .then_with(|| a.id().cmp(b.id()))
        });
        releases
            .into_iter()
            .map(|release| Self::load(graph, release.id()))
            .collect()
    }

    /// Find a component anywhere in the tree
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.teams
            .iter()
            .flat_map(|team| team.components.iter())
            .find(|component| component.id() == id)
    }
}

impl TeamTree {
    pub fn load(graph: &dyn HierarchyGraph, id: &TeamId) -> DomainResult<Self> {
        let team = graph
            .team(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(EntityKind::Team, id.as_str()))?;

        let components = graph
            .component_ids_of(id)
            .iter()
            .map(|cid| {
                graph.component(cid).cloned().ok_or_else(|| {
                    DomainError::integrity(format!("team {} indexes missing component {}", id, cid))
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let user_stories = graph
            .user_story_ids_of(id)
            .iter()
            .map(|sid| {
                graph.user_story(sid).cloned().ok_or_else(|| {
                    DomainError::integrity(format!(
                        "team {} indexes missing user story {}",
                        id, sid
                    ))
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self {
            team,
            components,
            user_stories,
        })
    }
}
