//! Hierarchy Application Service
//!
//! Create, update, delete and query releases, teams, components and user
//! stories. Every mutation runs as one store transaction; events are
//! published only after it commits.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use release_portal_domain::{
    association::resolve_components,
    entities::{Component, Release, ReleaseDraft, ReleaseUpdate, Team, UserStory, UserStoryDraft},
    errors::DomainError,
    hierarchy::{
        self, require_component, require_release, require_team, require_user_story, resolve_teams,
    },
    ids::IdGenerator,
    repositories::HierarchyStore,
    tree::{ReleaseTree, TeamTree},
    value_objects::{ComponentId, EntityKind, ReleaseId, TeamId, UserStoryId},
};

use crate::dto::{
    parse_release_date, AddComponentCommand, AddTeamCommand, AddUserStoryCommand, ComponentView,
    CreateReleaseCommand, CreatedRelease, CreatedUserStory, DeletionSummary, ReleaseView,
    TeamChild, TeamView, UpdateComponentCommand, UpdateReleaseCommand, UpdateTeamCommand,
    UpdateUserStoryCommand, UserStoryView,
};
use crate::errors::ApplicationResult;
use crate::events::{ApplicationEvent, EventPublisher};

/// Scope prefix for user story identifiers
const USER_STORY_SCOPE: &str = "US";

/// Hierarchy Application Service
///
/// Stateless: all state lives in the store.
pub struct HierarchyService<S>
where
    S: HierarchyStore,
{
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    events: Arc<dyn EventPublisher>,
}

impl<S> HierarchyService<S>
where
    S: HierarchyStore,
{
    /// Create a new HierarchyService with injected dependencies
    pub fn new(store: Arc<S>, ids: Arc<dyn IdGenerator>, events: Arc<dyn EventPublisher>) -> Self {
        Self { store, ids, events }
    }

    // ========================================================================
    // Releases
    // ========================================================================

    /// Create a release and adopt the requested teams into it.
    ///
    /// Team ids that do not resolve are skipped and reported back in
    /// `unresolved_team_ids`.
    pub async fn create_release(
        &self,
        cmd: CreateReleaseCommand,
    ) -> ApplicationResult<CreatedRelease> {
        let release_date = parse_release_date(&cmd.release_date)?;
        let release_id = ReleaseId::new(self.ids.generate("", &cmd.name)?);
        let release = Release::new(
            release_id,
            ReleaseDraft {
                name: cmd.name,
                version: cmd.version,
                release_date,
            },
        )?;
        let requested = cmd.team_ids;

        let (tree, resolution) = self
            .store
            .transact(move |graph| {
                let release_id = release.id().clone();
                hierarchy::require_unused_id(graph, EntityKind::Release, release_id.as_str())?;
                let resolution = resolve_teams(graph, &requested);
                graph.save_release(release)?;

                for team_id in &resolution.resolved {
                    let mut team = require_team(graph, team_id)?.clone();
                    let previous = team.adopt_into(release_id.clone());
                    debug!(team_id = %team_id, from = %previous, to = %release_id, "Team adopted");
                    graph.save_team(team)?;
                }

                Ok((ReleaseTree::load(graph, &release_id)?, resolution))
            })
            .await?;

        if !resolution.unresolved.is_empty() {
            debug!(unresolved = ?resolution.unresolved, "Skipped unknown team ids");
        }
        info!(release_id = %tree.release.id(), teams = tree.teams.len(), "Release created");

        self.events
            .publish(ApplicationEvent::ReleaseCreated {
                release_id: tree.release.id().to_string(),
                name: tree.release.name().to_string(),
                adopted_team_ids: resolution.resolved.iter().map(ToString::to_string).collect(),
                unresolved_team_ids: resolution.unresolved.clone(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(CreatedRelease {
            release: ReleaseView::from_domain(&tree),
            unresolved_team_ids: resolution.unresolved,
        })
    }

    /// Update name, version or date. Statuses and teams are untouched.
    pub async fn update_release(
        &self,
        id: &str,
        cmd: UpdateReleaseCommand,
    ) -> ApplicationResult<ReleaseView> {
        let update = ReleaseUpdate {
            name: cmd.name,
            version: cmd.version,
            release_date: cmd
                .release_date
                .as_deref()
                .map(parse_release_date)
                .transpose()?,
        };
        let release_id = ReleaseId::new(id);

        let tree = self
            .store
            .transact(move |graph| {
                let mut release = require_release(graph, &release_id)?.clone();
                release.apply(update)?;
                graph.save_release(release)?;
                ReleaseTree::load(graph, &release_id)
            })
            .await?;

        info!(release_id = %id, "Release updated");
        self.events
            .publish(ApplicationEvent::ReleaseUpdated {
                release_id: id.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(ReleaseView::from_domain(&tree))
    }

    /// Delete a release and everything it owns
    pub async fn delete_release(&self, id: &str) -> ApplicationResult<DeletionSummary> {
        let release_id = ReleaseId::new(id);
        let report = self
            .store
            .transact(move |graph| hierarchy::delete_release(graph, &release_id))
            .await?;
        let summary = DeletionSummary::from_domain(&report);

        info!(release_id = %id, removed = summary.removed_count(), "Release deleted");
        self.events
            .publish(ApplicationEvent::ReleaseDeleted {
                release_id: id.to_string(),
                removed: summary.removed_count(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(summary)
    }

    pub async fn get_release(&self, id: &str) -> ApplicationResult<ReleaseView> {
        let release_id = ReleaseId::new(id);
        let tree = self
            .store
            .read(move |graph| ReleaseTree::load(graph, &release_id))
            .await?;
        Ok(ReleaseView::from_domain(&tree))
    }

    /// All releases, ordered by release date
    pub async fn list_releases(&self) -> ApplicationResult<Vec<ReleaseView>> {
        let trees = self.store.read(ReleaseTree::load_all).await?;
        debug!(count = trees.len(), "Listed releases");
        Ok(trees.iter().map(ReleaseView::from_domain).collect())
    }

    // ========================================================================
    // Teams
    // ========================================================================

    pub async fn add_team(
        &self,
        release_id: &str,
        cmd: AddTeamCommand,
    ) -> ApplicationResult<TeamView> {
        let team_id = TeamId::new(self.ids.generate("", &cmd.name)?);
        let release_id = ReleaseId::new(release_id);
        let team = Team::new(team_id, release_id.clone(), cmd.into())?;

        let tree = self
            .store
            .transact(move |graph| {
                require_release(graph, &release_id)?;
                let team_id = team.id().clone();
                hierarchy::require_unused_id(graph, EntityKind::Team, team_id.as_str())?;
                graph.save_team(team)?;
                TeamTree::load(graph, &team_id)
            })
            .await?;

        info!(team_id = %tree.team.id(), release_id = %tree.team.release_id(), "Team added");
        self.events
            .publish(ApplicationEvent::TeamAdded {
                team_id: tree.team.id().to_string(),
                release_id: tree.team.release_id().to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(TeamView::from_domain(&tree))
    }

    pub async fn update_team(
        &self,
        id: &str,
        cmd: UpdateTeamCommand,
    ) -> ApplicationResult<TeamView> {
        let team_id = TeamId::new(id);
        let tree = self
            .store
            .transact(move |graph| {
                let mut team = require_team(graph, &team_id)?.clone();
                team.apply(cmd.into())?;
                graph.save_team(team)?;
                TeamTree::load(graph, &team_id)
            })
            .await?;

        info!(team_id = %id, "Team updated");
        self.events
            .publish(ApplicationEvent::TeamUpdated {
                team_id: id.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(TeamView::from_domain(&tree))
    }

    /// Delete a team with its components and user stories
    pub async fn delete_team(&self, id: &str) -> ApplicationResult<DeletionSummary> {
        let team_id = TeamId::new(id);
        let report = self
            .store
            .transact(move |graph| hierarchy::delete_team(graph, &team_id))
            .await?;
        let summary = DeletionSummary::from_domain(&report);

        info!(team_id = %id, removed = summary.removed_count(), "Team deleted");
        self.events
            .publish(ApplicationEvent::TeamDeleted {
                team_id: id.to_string(),
                removed: summary.removed_count(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(summary)
    }

    pub async fn get_team(&self, id: &str) -> ApplicationResult<TeamView> {
        let team_id = TeamId::new(id);
        let tree = self
            .store
            .read(move |graph| TeamTree::load(graph, &team_id))
            .await?;
        Ok(TeamView::from_domain(&tree))
    }

    /// Every team across all releases
    pub async fn list_teams(&self) -> ApplicationResult<Vec<TeamView>> {
        let trees = self
            .store
            .read(|graph| {
                graph
                    .teams()
                    .iter()
                    .map(|team| TeamTree::load(graph, team.id()))
                    .collect::<Result<Vec<_>, DomainError>>()
            })
            .await?;
        Ok(trees.iter().map(TeamView::from_domain).collect())
    }

    /// Delete a component or user story, checking it belongs to `team_id`
    pub async fn delete_team_child(
        &self,
        team_id: &str,
        child: TeamChild,
    ) -> ApplicationResult<DeletionSummary> {
        let owner = TeamId::new(team_id);
        let target = child.clone();
        let report = self
            .store
            .transact(move |graph| {
                require_team(graph, &owner)?;
                match target {
                    TeamChild::Component(id) => {
                        if require_component(graph, &id)?.team_id() != &owner {
                            return Err(DomainError::not_found(EntityKind::Component, id.as_str()));
                        }
                        hierarchy::delete_component(graph, &id)
                    }
                    TeamChild::UserStory(id) => {
                        if require_user_story(graph, &id)?.team_id() != &owner {
                            return Err(DomainError::not_found(EntityKind::UserStory, id.as_str()));
                        }
                        hierarchy::delete_user_story(graph, &id)
                    }
                }
            })
            .await?;
        let summary = DeletionSummary::from_domain(&report);

        match child {
            TeamChild::Component(id) => self.component_deleted(id.as_str(), &summary).await,
            TeamChild::UserStory(id) => self.user_story_deleted(id.as_str()).await,
        }
        Ok(summary)
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub async fn add_component(
        &self,
        team_id: &str,
        cmd: AddComponentCommand,
    ) -> ApplicationResult<ComponentView> {
        let component_id = ComponentId::new(self.ids.generate(team_id, &cmd.name)?);
        let owner = TeamId::new(team_id);
        let component = Component::new(component_id, owner.clone(), cmd.into())?;
        let view = ComponentView::from_domain(&component);

        self.store
            .transact(move |graph| {
                require_team(graph, &owner)?;
                hierarchy::require_unused_id(
                    graph,
                    EntityKind::Component,
                    component.id().as_str(),
                )?;
                graph.save_component(component)
            })
            .await?;

        info!(component_id = %view.id, team_id = %team_id, "Component added");
        self.events
            .publish(ApplicationEvent::ComponentAdded {
                component_id: view.id.clone(),
                team_id: team_id.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(view)
    }

    pub async fn update_component(
        &self,
        id: &str,
        cmd: UpdateComponentCommand,
    ) -> ApplicationResult<ComponentView> {
        let component_id = ComponentId::new(id);
        let component = self
            .store
            .transact(move |graph| {
                let mut component = require_component(graph, &component_id)?.clone();
                component.apply(cmd.into())?;
                graph.save_component(component.clone())?;
                Ok(component)
            })
            .await?;

        info!(component_id = %id, "Component updated");
        self.events
            .publish(ApplicationEvent::ComponentUpdated {
                component_id: id.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(ComponentView::from_domain(&component))
    }

    /// Delete a component after detaching it from every user story
    pub async fn delete_component(&self, id: &str) -> ApplicationResult<DeletionSummary> {
        let component_id = ComponentId::new(id);
        let report = self
            .store
            .transact(move |graph| hierarchy::delete_component(graph, &component_id))
            .await?;
        let summary = DeletionSummary::from_domain(&report);

        self.component_deleted(id, &summary).await;
        Ok(summary)
    }

    pub async fn get_component(&self, id: &str) -> ApplicationResult<ComponentView> {
        let component_id = ComponentId::new(id);
        let component = self
            .store
            .read(move |graph| require_component(graph, &component_id).cloned())
            .await?;
        Ok(ComponentView::from_domain(&component))
    }

    async fn component_deleted(&self, id: &str, summary: &DeletionSummary) {
        let detached: Vec<String> =
            summary.detached.iter().map(|(story, _)| story.clone()).collect();
        info!(component_id = %id, detached = detached.len(), "Component deleted");
        self.events
            .publish(ApplicationEvent::ComponentDeleted {
                component_id: id.to_string(),
                detached_user_story_ids: detached,
                timestamp: Utc::now(),
            })
            .await;
    }

    // ========================================================================
    // User stories
    // ========================================================================

    /// Add a user story linked to the given components.
    ///
    /// Component ids that do not resolve are dropped and reported back in
    /// `unresolved_component_ids`.
    pub async fn add_user_story(
        &self,
        team_id: &str,
        cmd: AddUserStoryCommand,
    ) -> ApplicationResult<CreatedUserStory> {
        let story_id = UserStoryId::new(self.ids.generate(USER_STORY_SCOPE, &cmd.description)?);
        let owner = TeamId::new(team_id);
        let draft = UserStoryDraft {
            description: cmd.description,
        };
        let requested = cmd.component_ids;

        let (story, unresolved) = self
            .store
            .transact(move |graph| {
                require_team(graph, &owner)?;
                hierarchy::require_unused_id(graph, EntityKind::UserStory, story_id.as_str())?;
                let resolution = resolve_components(graph, &requested);
                let story = UserStory::new(story_id, owner, draft, resolution.resolved)?;
                graph.save_user_story(story.clone())?;
                Ok((story, resolution.unresolved))
            })
            .await?;

        if !unresolved.is_empty() {
            debug!(
                user_story_id = %story.id(),
                unresolved = ?unresolved,
                "Skipped unknown component ids"
            );
        }
        info!(user_story_id = %story.id(), team_id = %team_id, "User story added");

        let view = UserStoryView::from_domain(&story);
        self.events
            .publish(ApplicationEvent::UserStoryAdded {
                user_story_id: view.id.clone(),
                team_id: team_id.to_string(),
                component_ids: view.component_ids.clone(),
                unresolved_component_ids: unresolved.clone(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(CreatedUserStory {
            user_story: view,
            unresolved_component_ids: unresolved,
        })
    }

    /// Update the description. Component links and QA status are untouched.
    pub async fn update_user_story(
        &self,
        id: &str,
        cmd: UpdateUserStoryCommand,
    ) -> ApplicationResult<UserStoryView> {
        let story_id = UserStoryId::new(id);
        let story = self
            .store
            .transact(move |graph| {
                let mut story = require_user_story(graph, &story_id)?.clone();
                story.apply(cmd.into())?;
                graph.save_user_story(story.clone())?;
                Ok(story)
            })
            .await?;

        info!(user_story_id = %id, "User story updated");
        self.events
            .publish(ApplicationEvent::UserStoryUpdated {
                user_story_id: id.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Ok(UserStoryView::from_domain(&story))
    }

    pub async fn delete_user_story(&self, id: &str) -> ApplicationResult<DeletionSummary> {
        let story_id = UserStoryId::new(id);
        let report = self
            .store
            .transact(move |graph| hierarchy::delete_user_story(graph, &story_id))
            .await?;

        self.user_story_deleted(id).await;
        Ok(DeletionSummary::from_domain(&report))
    }

    pub async fn get_user_story(&self, id: &str) -> ApplicationResult<UserStoryView> {
        let story_id = UserStoryId::new(id);
        let story = self
            .store
            .read(move |graph| require_user_story(graph, &story_id).cloned())
            .await?;
        Ok(UserStoryView::from_domain(&story))
    }

    async fn user_story_deleted(&self, id: &str) {
        info!(user_story_id = %id, "User story deleted");
        self.events
            .publish(ApplicationEvent::UserStoryDeleted {
                user_story_id: id.to_string(),
                timestamp: Utc::now(),
            })
            .await;
    }
}
