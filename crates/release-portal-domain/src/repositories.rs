//! Persistence collaborator interfaces
//!
//! The domain defines only the contracts. Infrastructure crates provide the
//! arena (`HierarchyGraph`) and the store that hands it out under its
//! transaction discipline (`HierarchyStore`).
//!
//! Cascades and association surgery are written once, in
//! [`crate::hierarchy`] and [`crate::association`], against
//! `&mut dyn HierarchyGraph`; the store only guarantees that a closure passed
//! to [`HierarchyStore::transact`] is applied entirely or not at all.

use async_trait::async_trait;

use crate::entities::{Component, Release, Team, UserStory};
use crate::errors::DomainResult;
use crate::value_objects::{ComponentId, ReleaseId, TeamId, UserStoryId};

/// Arena of hierarchy entities with parent and association indexes.
///
/// Writes enforce referential integrity locally: saving a child whose parent
/// is missing, saving a story that references a missing component, or
/// removing an entity that still has owned children or referencing stories
/// fails with `IntegrityViolation`. Removing a missing entity fails with
/// `NotFound`.
pub trait HierarchyGraph {
    fn release(&self, id: &ReleaseId) -> Option<&Release>;
    fn team(&self, id: &TeamId) -> Option<&Team>;
    fn component(&self, id: &ComponentId) -> Option<&Component>;
    fn user_story(&self, id: &UserStoryId) -> Option<&UserStory>;

    fn releases(&self) -> Vec<&Release>;
    fn teams(&self) -> Vec<&Team>;
    fn components(&self) -> Vec<&Component>;
    fn user_stories(&self) -> Vec<&UserStory>;

    /// Whether an entity of any kind already carries `id`
    fn id_in_use(&self, id: &str) -> bool;

    /// Teams owned by a release
    fn team_ids_of(&self, release_id: &ReleaseId) -> Vec<TeamId>;
    /// Components owned by a team
    fn component_ids_of(&self, team_id: &TeamId) -> Vec<ComponentId>;
    /// User stories owned by a team
    fn user_story_ids_of(&self, team_id: &TeamId) -> Vec<UserStoryId>;
    /// User stories whose association set contains the component
    fn user_stories_referencing(&self, component_id: &ComponentId) -> Vec<UserStoryId>;

    fn save_release(&mut self, release: Release) -> DomainResult<()>;
    fn save_team(&mut self, team: Team) -> DomainResult<()>;
    fn save_component(&mut self, component: Component) -> DomainResult<()>;
    fn save_user_story(&mut self, story: UserStory) -> DomainResult<()>;

    fn remove_release(&mut self, id: &ReleaseId) -> DomainResult<Release>;
    fn remove_team(&mut self, id: &TeamId) -> DomainResult<Team>;
    fn remove_component(&mut self, id: &ComponentId) -> DomainResult<Component>;
    fn remove_user_story(&mut self, id: &UserStoryId) -> DomainResult<UserStory>;
}

/// Shared hierarchical store.
///
/// `read` sees a consistent snapshot. `transact` runs the closure against a
/// staged graph and commits it only when the closure returns `Ok`; no reader
/// ever observes a half-applied transaction. Transactions on the same store
/// are serialized (last writer wins on field updates).
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    async fn read<R, F>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&dyn HierarchyGraph) -> DomainResult<R> + Send,
        R: Send;

    async fn transact<R, F>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&mut dyn HierarchyGraph) -> DomainResult<R> + Send,
        R: Send;
}
