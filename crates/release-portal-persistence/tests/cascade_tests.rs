//! Cascade and association tests against the in-memory store
//!
//! Domain cascade rules run inside real store transactions; after every
//! operation the arena must hold no orphans and no dangling associations.

use chrono::NaiveDate;
use proptest::prelude::*;

use release_portal_domain::{
    association::detach_component,
    entities::{
        Component, ComponentDraft, Release, ReleaseDraft, Team, TeamDraft, UserStory,
        UserStoryDraft,
    },
    errors::{DomainError, DomainResult},
    hierarchy::{delete_component, delete_release, delete_team, delete_user_story},
    repositories::{HierarchyGraph, HierarchyStore},
    value_objects::{ComponentId, ReleaseId, TeamId, UserStoryId},
};
use release_portal_persistence::{EntityArena, InMemoryHierarchyStore};

// ============================================================================
// Fixtures
// ============================================================================

fn release(id: &str) -> Release {
    Release::new(
        ReleaseId::new(id),
        ReleaseDraft {
            name: format!("Release {}", id),
            version: "2.0.0".into(),
            release_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        },
    )
    .unwrap()
}

fn team(id: &str, release_id: &str) -> Team {
    Team::new(
        TeamId::new(id),
        ReleaseId::new(release_id),
        TeamDraft {
            name: format!("Team {}", id),
            team_dl: format!("{}@example.com", id),
            product_owner: "Jane Doe".into(),
        },
    )
    .unwrap()
}

fn component(id: &str, team_id: &str) -> Component {
    Component::new(
        ComponentId::new(id),
        TeamId::new(team_id),
        ComponentDraft {
            name: format!("Component {}", id),
            version: "1.4.0".into(),
        },
    )
    .unwrap()
}

fn story(id: &str, team_id: &str, components: &[&str]) -> UserStory {
    UserStory::new(
        UserStoryId::new(id),
        TeamId::new(team_id),
        UserStoryDraft {
            description: format!("Story {}", id),
        },
        components.iter().map(|c| ComponentId::new(*c)).collect(),
    )
    .unwrap()
}

/// Two releases. Story us-x in r-2 references a component owned by r-1.
fn two_releases(graph: &mut dyn HierarchyGraph) -> DomainResult<()> {
    graph.save_release(release("r-1"))?;
    graph.save_team(team("t-a", "r-1"))?;
    graph.save_team(team("t-b", "r-1"))?;
    graph.save_component(component("c-1", "t-a"))?;
    graph.save_component(component("c-2", "t-a"))?;
    graph.save_component(component("c-3", "t-b"))?;
    graph.save_user_story(story("us-1", "t-a", &["c-1", "c-2"]))?;
    graph.save_user_story(story("us-2", "t-b", &["c-1", "c-3"]))?;

    graph.save_release(release("r-2"))?;
    graph.save_team(team("t-c", "r-2"))?;
    graph.save_component(component("c-4", "t-c"))?;
    graph.save_user_story(story("us-x", "t-c", &["c-4", "c-2"]))?;
    Ok(())
}

async fn seeded_store() -> InMemoryHierarchyStore {
    let store = InMemoryHierarchyStore::new();
    store.transact(two_releases).await.unwrap();
    store
}

fn assert_consistent(arena: &EntityArena) {
    let problems = arena.integrity_problems();
    assert!(problems.is_empty(), "integrity problems: {:?}", problems);
}

// ============================================================================
// Cascade completeness
// ============================================================================

#[tokio::test]
async fn test_delete_release_removes_whole_subtree() {
    let store = seeded_store().await;

    let report = store
        .transact(|graph| delete_release(graph, &ReleaseId::new("r-1")))
        .await
        .unwrap();

    assert_eq!(report.releases, vec![ReleaseId::new("r-1")]);
    assert_eq!(report.teams.len(), 2);
    assert_eq!(report.components.len(), 3);
    assert_eq!(report.user_stories.len(), 2);

    let counts = store.counts();
    assert_eq!(counts.releases, 1);
    assert_eq!(counts.teams, 1);
    assert_eq!(counts.components, 1);
    assert_eq!(counts.user_stories, 1);
    assert_consistent(&store.snapshot());
}

#[tokio::test]
async fn test_delete_release_detaches_cross_release_reference() {
    let store = seeded_store().await;

    store
        .transact(|graph| delete_release(graph, &ReleaseId::new("r-1")))
        .await
        .unwrap();

    let components = store
        .read(|graph| {
            Ok(graph
                .user_story(&UserStoryId::new("us-x"))
                .map(|s| s.component_ids().to_vec()))
        })
        .await
        .unwrap();
    assert_eq!(components, Some(vec![ComponentId::new("c-4")]));
}

#[tokio::test]
async fn test_delete_team_leaves_siblings_and_release() {
    let store = seeded_store().await;

    let report = store
        .transact(|graph| delete_team(graph, &TeamId::new("t-a")))
        .await
        .unwrap();
    assert_eq!(report.teams, vec![TeamId::new("t-a")]);

    let arena = store.snapshot();
    assert!(arena.release(&ReleaseId::new("r-1")).is_some());
    assert!(arena.team(&TeamId::new("t-b")).is_some());
    // us-2 lost c-1 only
    let us2 = arena.user_story(&UserStoryId::new("us-2")).unwrap();
    assert_eq!(us2.component_ids(), &[ComponentId::new("c-3")]);
    assert_consistent(&arena);
}

#[tokio::test]
async fn test_delete_user_story_keeps_components() {
    let store = seeded_store().await;

    store
        .transact(|graph| delete_user_story(graph, &UserStoryId::new("us-1")))
        .await
        .unwrap();

    let arena = store.snapshot();
    assert!(arena.component(&ComponentId::new("c-1")).is_some());
    assert!(arena.component(&ComponentId::new("c-2")).is_some());
    assert_eq!(
        arena.user_stories_referencing(&ComponentId::new("c-1")),
        vec![UserStoryId::new("us-2")]
    );
    assert_consistent(&arena);
}

// ============================================================================
// Association surgery precision
// ============================================================================

#[tokio::test]
async fn test_delete_component_removes_exactly_one_entry_per_story() {
    let store = seeded_store().await;

    let report = store
        .transact(|graph| delete_component(graph, &ComponentId::new("c-1")))
        .await
        .unwrap();
    assert_eq!(report.detached.len(), 2);

    let arena = store.snapshot();
    assert_eq!(
        arena.user_story(&UserStoryId::new("us-1")).unwrap().component_ids(),
        &[ComponentId::new("c-2")]
    );
    assert_eq!(
        arena.user_story(&UserStoryId::new("us-2")).unwrap().component_ids(),
        &[ComponentId::new("c-3")]
    );
    assert_eq!(arena.counts().user_stories, 3);
    assert_consistent(&arena);
}

#[tokio::test]
async fn test_detach_unreferenced_component_is_noop() {
    let store = seeded_store().await;

    let detached = store
        .transact(|graph| detach_component(graph, &ComponentId::new("c-4")).map(|d| d.len()))
        .await
        .unwrap();
    assert_eq!(detached, 1);

    let again = store
        .transact(|graph| detach_component(graph, &ComponentId::new("c-4")).map(|d| d.len()))
        .await
        .unwrap();
    assert_eq!(again, 0);
}

// ============================================================================
// Atomicity
// ============================================================================

#[tokio::test]
async fn test_failed_cascade_leaves_store_untouched() {
    let store = seeded_store().await;
    let before = store.counts();

    let result = store
        .transact(|graph| {
            delete_team(graph, &TeamId::new("t-a"))?;
            delete_release(graph, &ReleaseId::new("missing"))
        })
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    assert_eq!(store.counts(), before);
    let us2 = store
        .read(|graph| Ok(graph.user_story(&UserStoryId::new("us-2")).cloned()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(us2.component_ids().len(), 2);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let store = seeded_store().await;

    let err = store
        .transact(|graph| delete_component(graph, &ComponentId::new("nope")))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = store
        .transact(|graph| delete_user_story(graph, &UserStoryId::new("nope")))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Property: random hierarchies stay consistent under random deletes
// ============================================================================

#[derive(Debug, Clone)]
enum Delete {
    Release(usize),
    Team(usize),
    Component(usize),
    Story(usize),
}

fn delete_strategy() -> impl Strategy<Value = Delete> {
    prop_oneof![
        (0usize..3).prop_map(Delete::Release),
        (0usize..6).prop_map(Delete::Team),
        (0usize..12).prop_map(Delete::Component),
        (0usize..12).prop_map(Delete::Story),
    ]
}

/// 3 releases, 2 teams each, 2 components per team, 2 stories per team.
/// Stories reference components chosen by `links` across the whole arena.
fn build(links: &[Vec<usize>]) -> EntityArena {
    let mut arena = EntityArena::new();
    for r in 0..3 {
        arena.save_release(release(&format!("r{}", r))).unwrap();
        for t in 0..2 {
            let team_id = format!("t{}", r * 2 + t);
            arena.save_team(team(&team_id, &format!("r{}", r))).unwrap();
            for c in 0..2 {
                let component_id = format!("c{}", (r * 2 + t) * 2 + c);
                arena.save_component(component(&component_id, &team_id)).unwrap();
            }
        }
    }
    for (index, picked) in links.iter().enumerate() {
        let team_id = format!("t{}", index / 2);
        let component_ids: Vec<String> = picked.iter().map(|c| format!("c{}", c)).collect();
        let refs: Vec<&str> = component_ids.iter().map(String::as_str).collect();
        arena
            .save_user_story(story(&format!("s{}", index), &team_id, &refs))
            .unwrap();
    }
    arena
}

proptest! {
    #[test]
    fn test_random_deletes_never_orphan(
        links in prop::collection::vec(prop::collection::vec(0usize..12, 0..4), 12),
        deletes in prop::collection::vec(delete_strategy(), 1..8),
    ) {
        let mut arena = build(&links);

        for delete in deletes {
            let staged_before = arena.clone();
            let result = match delete {
                Delete::Release(i) => {
                    delete_release(&mut arena, &ReleaseId::new(format!("r{}", i))).map(|_| ())
                }
                Delete::Team(i) => {
                    delete_team(&mut arena, &TeamId::new(format!("t{}", i))).map(|_| ())
                }
                Delete::Component(i) => {
                    delete_component(&mut arena, &ComponentId::new(format!("c{}", i))).map(|_| ())
                }
                Delete::Story(i) => {
                    delete_user_story(&mut arena, &UserStoryId::new(format!("s{}", i))).map(|_| ())
                }
            };
            match result {
                Ok(()) => {}
                Err(err) => {
                    // Only already-deleted targets may fail
                    prop_assert!(err.is_not_found());
                    arena = staged_before;
                }
            }
            prop_assert!(arena.integrity_problems().is_empty());
        }
    }
}
