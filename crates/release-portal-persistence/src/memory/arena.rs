//! Entity arena: rows keyed by id plus parent and association indexes

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use release_portal_domain::{
    entities::{Component, Release, Team, UserStory},
    errors::DomainResult,
    repositories::HierarchyGraph,
    value_objects::{ComponentId, EntityKind, ReleaseId, TeamId, UserStoryId},
};

use crate::error::PersistenceError;

/// Arena holding every entity of the hierarchy.
///
/// Parent links live on the children; the `*_by_*` indexes answer
/// "children of X" and "stories referencing component C" without scanning.
/// Index sets are ordered, so child listings are stable.
#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    releases: HashMap<ReleaseId, Release>,
    teams: HashMap<TeamId, Team>,
    components: HashMap<ComponentId, Component>,
    user_stories: HashMap<UserStoryId, UserStory>,

    teams_by_release: HashMap<ReleaseId, BTreeSet<TeamId>>,
    components_by_team: HashMap<TeamId, BTreeSet<ComponentId>>,
    stories_by_team: HashMap<TeamId, BTreeSet<UserStoryId>>,
    stories_by_component: HashMap<ComponentId, BTreeSet<UserStoryId>>,
}

/// Row counts per entity kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaCounts {
    pub releases: usize,
    pub teams: usize,
    pub components: usize,
    pub user_stories: usize,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> ArenaCounts {
        ArenaCounts {
            releases: self.releases.len(),
            teams: self.teams.len(),
            components: self.components.len(),
            user_stories: self.user_stories.len(),
        }
    }

    /// Cross-check rows against indexes. Empty when the arena is consistent.
    pub fn integrity_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for team in self.teams.values() {
            if !self.releases.contains_key(team.release_id()) {
                problems.push(format!("team {} has no release {}", team.id(), team.release_id()));
            }
            if !indexed(&self.teams_by_release, team.release_id(), team.id()) {
                problems.push(format!("team {} missing from release index", team.id()));
            }
        }
        for component in self.components.values() {
            if !self.teams.contains_key(component.team_id()) {
                problems.push(format!("component {} has no team", component.id()));
            }
            if !indexed(&self.components_by_team, component.team_id(), component.id()) {
                problems.push(format!("component {} missing from team index", component.id()));
            }
        }
        for story in self.user_stories.values() {
            if !self.teams.contains_key(story.team_id()) {
                problems.push(format!("user story {} has no team", story.id()));
            }
            if !indexed(&self.stories_by_team, story.team_id(), story.id()) {
                problems.push(format!("user story {} missing from team index", story.id()));
            }
            for component_id in story.component_ids() {
                if !self.components.contains_key(component_id) {
                    problems.push(format!(
                        "user story {} references missing component {}",
                        story.id(),
                        component_id
                    ));
                }
                if !indexed(&self.stories_by_component, component_id, story.id()) {
                    problems.push(format!(
                        "association {} -> {} missing from reverse index",
                        story.id(),
                        component_id
                    ));
                }
            }
        }

        let indexed_rows = self.teams_by_release.values().map(BTreeSet::len).sum::<usize>()
            + self.components_by_team.values().map(BTreeSet::len).sum::<usize>()
            + self.stories_by_team.values().map(BTreeSet::len).sum::<usize>();
        if indexed_rows != self.teams.len() + self.components.len() + self.user_stories.len() {
            problems.push("parent indexes hold stale entries".to_string());
        }

        let associations: usize = self.user_stories.values().map(|s| s.component_ids().len()).sum();
        let reverse: usize = self.stories_by_component.values().map(BTreeSet::len).sum();
        if associations != reverse {
            problems.push("association reverse index holds stale entries".to_string());
        }

        problems
    }

    fn require_team_parent(
        &self,
        kind: EntityKind,
        id: &str,
        team_id: &TeamId,
    ) -> Result<(), PersistenceError> {
        if self.teams.contains_key(team_id) {
            Ok(())
        } else {
            Err(PersistenceError::MissingParent {
                entity: kind,
                id: id.to_string(),
                parent_kind: EntityKind::Team,
                parent_id: team_id.to_string(),
            })
        }
    }
}

fn indexed<P: Hash + Eq, C: Ord>(index: &HashMap<P, BTreeSet<C>>, parent: &P, child: &C) -> bool {
    index.get(parent).map_or(false, |set| set.contains(child))
}

fn index_insert<P: Hash + Eq + Clone, C: Ord>(
    index: &mut HashMap<P, BTreeSet<C>>,
    parent: &P,
    child: C,
) {
    index.entry(parent.clone()).or_default().insert(child);
}

fn index_remove<P: Hash + Eq, C: Ord>(index: &mut HashMap<P, BTreeSet<C>>, parent: &P, child: &C) {
    if let Some(set) = index.get_mut(parent) {
        set.remove(child);
        if set.is_empty() {
            index.remove(parent);
        }
    }
}

fn index_children<P: Hash + Eq, C: Clone>(index: &HashMap<P, BTreeSet<C>>, parent: &P) -> Vec<C> {
    index
        .get(parent)
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default()
}

fn index_len<P: Hash + Eq, C>(index: &HashMap<P, BTreeSet<C>>, parent: &P) -> usize {
    index.get(parent).map_or(0, BTreeSet::len)
}

impl HierarchyGraph for EntityArena {
    fn release(&self, id: &ReleaseId) -> Option<&Release> {
        self.releases.get(id)
    }

    fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    fn user_story(&self, id: &UserStoryId) -> Option<&UserStory> {
        self.user_stories.get(id)
    }

    fn releases(&self) -> Vec<&Release> {
        self.releases.values().collect()
    }

    fn teams(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.values().collect();
        teams.sort_by(|a, b| a.id().cmp(b.id()));
        teams
    }

    fn components(&self) -> Vec<&Component> {
        let mut components: Vec<&Component> = self.components.values().collect();
        components.sort_by(|a, b| a.id().cmp(b.id()));
        components
    }

    fn user_stories(&self) -> Vec<&UserStory> {
        let mut stories: Vec<&UserStory> = self.user_stories.values().collect();
        stories.sort_by(|a, b| a.id().cmp(b.id()));
        stories
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.releases.contains_key(&ReleaseId::new(id))
            || self.teams.contains_key(&TeamId::new(id))
            || self.components.contains_key(&ComponentId::new(id))
            || self.user_stories.contains_key(&UserStoryId::new(id))
    }

    fn team_ids_of(&self, release_id: &ReleaseId) -> Vec<TeamId> {
        index_children(&self.teams_by_release, release_id)
    }

    fn component_ids_of(&self, team_id: &TeamId) -> Vec<ComponentId> {
        index_children(&self.components_by_team, team_id)
    }

    fn user_story_ids_of(&self, team_id: &TeamId) -> Vec<UserStoryId> {
        index_children(&self.stories_by_team, team_id)
    }

    fn user_stories_referencing(&self, component_id: &ComponentId) -> Vec<UserStoryId> {
        index_children(&self.stories_by_component, component_id)
    }

    fn save_release(&mut self, release: Release) -> DomainResult<()> {
        self.releases.insert(release.id().clone(), release);
        Ok(())
    }

    fn save_team(&mut self, team: Team) -> DomainResult<()> {
        if !self.releases.contains_key(team.release_id()) {
            return Err(PersistenceError::MissingParent {
                entity: EntityKind::Team,
                id: team.id().to_string(),
                parent_kind: EntityKind::Release,
                parent_id: team.release_id().to_string(),
            }
            .into());
        }

        // A team may move between releases (adoption at release creation)
        if let Some(existing) = self.teams.get(team.id()) {
            if existing.release_id() != team.release_id() {
                let old_release = existing.release_id().clone();
                index_remove(&mut self.teams_by_release, &old_release, team.id());
            }
        }

        index_insert(&mut self.teams_by_release, team.release_id(), team.id().clone());
        self.teams.insert(team.id().clone(), team);
        Ok(())
    }

    fn save_component(&mut self, component: Component) -> DomainResult<()> {
        self.require_team_parent(
            EntityKind::Component,
            component.id().as_str(),
            component.team_id(),
        )?;

        if let Some(existing) = self.components.get(component.id()) {
            if existing.team_id() != component.team_id() {
                return Err(PersistenceError::ParentReassigned {
                    entity: EntityKind::Component,
                    id: component.id().to_string(),
                    from: existing.team_id().to_string(),
                    to: component.team_id().to_string(),
                }
                .into());
            }
        }

        index_insert(&mut self.components_by_team, component.team_id(), component.id().clone());
        self.components.insert(component.id().clone(), component);
        Ok(())
    }

    fn save_user_story(&mut self, story: UserStory) -> DomainResult<()> {
        self.require_team_parent(EntityKind::UserStory, story.id().as_str(), story.team_id())?;

        if let Some(missing) = story
            .component_ids()
            .iter()
            .find(|id| !self.components.contains_key(*id))
        {
            return Err(PersistenceError::MissingParent {
                entity: EntityKind::UserStory,
                id: story.id().to_string(),
                parent_kind: EntityKind::Component,
                parent_id: missing.to_string(),
            }
            .into());
        }

        if let Some(existing) = self.user_stories.get(story.id()) {
            if existing.team_id() != story.team_id() {
                return Err(PersistenceError::ParentReassigned {
                    entity: EntityKind::UserStory,
                    id: story.id().to_string(),
                    from: existing.team_id().to_string(),
                    to: story.team_id().to_string(),
                }
                .into());
            }
            let previous: Vec<ComponentId> = existing.component_ids().to_vec();
            for component_id in &previous {
                index_remove(&mut self.stories_by_component, component_id, story.id());
            }
        }

        for component_id in story.component_ids() {
            index_insert(&mut self.stories_by_component, component_id, story.id().clone());
        }
        index_insert(&mut self.stories_by_team, story.team_id(), story.id().clone());
        self.user_stories.insert(story.id().clone(), story);
        Ok(())
    }

    fn remove_release(&mut self, id: &ReleaseId) -> DomainResult<Release> {
        if !self.releases.contains_key(id) {
            return Err(PersistenceError::not_found(EntityKind::Release, id.as_str()).into());
        }
        let teams = index_len(&self.teams_by_release, id);
        if teams > 0 {
            return Err(PersistenceError::HasDependents {
                entity: EntityKind::Release,
                id: id.to_string(),
                dependent_kind: EntityKind::Team,
                dependents: teams,
            }
            .into());
        }

        self.releases
            .remove(id)
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Release, id.as_str()).into())
    }

    fn remove_team(&mut self, id: &TeamId) -> DomainResult<Team> {
        let release_id = match self.teams.get(id) {
            Some(team) => team.release_id().clone(),
            None => return Err(PersistenceError::not_found(EntityKind::Team, id.as_str()).into()),
        };

        let components = index_len(&self.components_by_team, id);
        let stories = index_len(&self.stories_by_team, id);
        if components + stories > 0 {
            let (dependent_kind, dependents) = if stories > 0 {
                (EntityKind::UserStory, stories)
            } else {
                (EntityKind::Component, components)
            };
            return Err(PersistenceError::HasDependents {
                entity: EntityKind::Team,
                id: id.to_string(),
                dependent_kind,
                dependents,
            }
            .into());
        }

        index_remove(&mut self.teams_by_release, &release_id, id);
        self.teams
            .remove(id)
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Team, id.as_str()).into())
    }

    fn remove_component(&mut self, id: &ComponentId) -> DomainResult<Component> {
        let team_id = match self.components.get(id) {
            Some(component) => component.team_id().clone(),
            None => {
                return Err(PersistenceError::not_found(EntityKind::Component, id.as_str()).into())
            }
        };

        let referencing = index_len(&self.stories_by_component, id);
        if referencing > 0 {
            return Err(PersistenceError::HasDependents {
                entity: EntityKind::Component,
                id: id.to_string(),
                dependent_kind: EntityKind::UserStory,
                dependents: referencing,
            }
            .into());
        }

        index_remove(&mut self.components_by_team, &team_id, id);
        self.components
            .remove(id)
            .ok_or_else(|| PersistenceError::not_found(EntityKind::Component, id.as_str()).into())
    }

    fn remove_user_story(&mut self, id: &UserStoryId) -> DomainResult<UserStory> {
        let story = self
            .user_stories
            .remove(id)
            .ok_or_else(|| PersistenceError::not_found(EntityKind::UserStory, id.as_str()))?;

        index_remove(&mut self.stories_by_team, story.team_id(), id);
        for component_id in story.component_ids() {
            index_remove(&mut self.stories_by_component, component_id, id);
        }
        Ok(story)
    }
}
