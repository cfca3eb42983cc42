//! In-Memory Hierarchy Store Implementation

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use release_portal_domain::{
    errors::DomainResult,
    repositories::{HierarchyGraph, HierarchyStore},
};

use super::arena::{ArenaCounts, EntityArena};

/// Thread-safe in-memory implementation of HierarchyStore
///
/// Readers share the arena behind a RwLock. A transaction takes the write
/// lock, stages its changes on a clone of the arena and swaps the clone in
/// only when the closure succeeds, so failed transactions leave no trace.
///
/// # Example
///
/// ```ignore
/// use release_portal_persistence::InMemoryHierarchyStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(InMemoryHierarchyStore::new());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryHierarchyStore {
    arena: RwLock<EntityArena>,
}

impl InMemoryHierarchyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a pre-built arena (useful for testing)
    pub fn with_arena(arena: EntityArena) -> Self {
        Self {
            arena: RwLock::new(arena),
        }
    }

    /// Row counts per entity kind (for testing)
    pub fn counts(&self) -> ArenaCounts {
        self.arena.read().counts()
    }

    /// Copy of the committed arena
    pub fn snapshot(&self) -> EntityArena {
        self.arena.read().clone()
    }

    /// Drop every entity (for testing)
    pub fn clear(&self) {
        *self.arena.write() = EntityArena::new();
    }
}

#[async_trait]
impl HierarchyStore for InMemoryHierarchyStore {
    async fn read<R, F>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&dyn HierarchyGraph) -> DomainResult<R> + Send,
        R: Send,
    {
        let arena = self.arena.read();
        f(&*arena)
    }

    async fn transact<R, F>(&self, f: F) -> DomainResult<R>
    where
        F: FnOnce(&mut dyn HierarchyGraph) -> DomainResult<R> + Send,
        R: Send,
    {
        let mut committed = self.arena.write();
        let mut staged = committed.clone();

        match f(&mut staged) {
            Ok(result) => {
                *committed = staged;
                Ok(result)
            }
            Err(err) => {
                debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use release_portal_domain::entities::{Release, ReleaseDraft, Team, TeamDraft};
    use release_portal_domain::errors::DomainError;
    use release_portal_domain::value_objects::{ReleaseId, TeamId};

    fn release(id: &str) -> Release {
        Release::new(
            ReleaseId::new(id),
            ReleaseDraft {
                name: "Spring".into(),
                version: "1.0".into(),
                release_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            },
        )
        .unwrap()
    }

    fn team(id: &str, release_id: &str) -> Team {
        Team::new(
            TeamId::new(id),
            ReleaseId::new(release_id),
            TeamDraft {
                name: "Payments".into(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_transact_commits_on_ok() {
        let store = InMemoryHierarchyStore::new();
        store
            .transact(|graph| {
                graph.save_release(release("r-1"))?;
                graph.save_team(team("t-1", "r-1"))
            })
            .await
            .unwrap();

        let teams = store
            .read(|graph| Ok(graph.team_ids_of(&ReleaseId::new("r-1"))))
            .await
            .unwrap();
        assert_eq!(teams, vec![TeamId::new("t-1")]);
    }

    #[tokio::test]
    async fn test_transact_rolls_back_on_err() {
        let store = InMemoryHierarchyStore::new();
        store
            .transact(|graph| graph.save_release(release("r-1")))
            .await
            .unwrap();

        let result: DomainResult<()> = store
            .transact(|graph| {
                graph.save_team(team("t-1", "r-1"))?;
                graph.remove_release(&ReleaseId::new("r-1"))?;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(DomainError::IntegrityViolation { .. })));
        let counts = store.counts();
        assert_eq!(counts.releases, 1);
        assert_eq!(counts.teams, 0);
    }

    #[tokio::test]
    async fn test_read_errors_propagate() {
        let store = InMemoryHierarchyStore::new();
        let result = store
            .read(|graph| {
                graph
                    .release(&ReleaseId::new("missing"))
                    .cloned()
                    .ok_or_else(|| {
                        DomainError::not_found(
                            release_portal_domain::EntityKind::Release,
                            "missing",
                        )
                    })
            })
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = InMemoryHierarchyStore::new();
        store
            .transact(|graph| graph.save_release(release("r-1")))
            .await
            .unwrap();
        store.clear();
        assert_eq!(store.counts(), ArenaCounts::default());
    }
}
