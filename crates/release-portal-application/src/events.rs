//! Application layer events
//!
//! Application events record completed use cases: structural changes to the
//! hierarchy, status transitions and the outcome of approval notifications.
//! They are published after the owning transaction has committed.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use release_portal_domain::value_objects::EntityKind;

/// Application-level event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApplicationEvent {
    // === Release Events ===

    /// Release created; existing teams may have been adopted into it
    ReleaseCreated {
        release_id: String,
        name: String,
        adopted_team_ids: Vec<String>,
        unresolved_team_ids: Vec<String>,
        timestamp: DateTime<Utc>,
    },

    ReleaseUpdated {
        release_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Release deleted together with everything it owned
    ReleaseDeleted {
        release_id: String,
        removed: usize,
        timestamp: DateTime<Utc>,
    },

    // === Team Events ===

    TeamAdded {
        team_id: String,
        release_id: String,
        timestamp: DateTime<Utc>,
    },

    TeamUpdated {
        team_id: String,
        timestamp: DateTime<Utc>,
    },

    TeamDeleted {
        team_id: String,
        removed: usize,
        timestamp: DateTime<Utc>,
    },

    // === Component Events ===

    ComponentAdded {
        component_id: String,
        team_id: String,
        timestamp: DateTime<Utc>,
    },

    ComponentUpdated {
        component_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Component deleted; listed stories lost their link to it
    ComponentDeleted {
        component_id: String,
        detached_user_story_ids: Vec<String>,
        timestamp: DateTime<Utc>,
    },

    // === User Story Events ===

    UserStoryAdded {
        user_story_id: String,
        team_id: String,
        component_ids: Vec<String>,
        unresolved_component_ids: Vec<String>,
        timestamp: DateTime<Utc>,
    },

    UserStoryUpdated {
        user_story_id: String,
        timestamp: DateTime<Utc>,
    },

    UserStoryDeleted {
        user_story_id: String,
        timestamp: DateTime<Utc>,
    },

    // === Sign-off Events ===

    /// A status field changed value
    StatusChanged {
        entity: EntityKind,
        id: String,
        field: String,
        from: String,
        to: String,
        timestamp: DateTime<Utc>,
    },

    /// Every team of the release now has app-owner sign-off
    ReleaseApprovalReady {
        release_id: String,
        timestamp: DateTime<Utc>,
    },

    ApprovalNotificationDispatched {
        release_id: String,
        recipients: usize,
        timestamp: DateTime<Utc>,
    },

    ApprovalNotificationFailed {
        release_id: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl ApplicationEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ApplicationEvent::ReleaseCreated { .. } => "ReleaseCreated",
            ApplicationEvent::ReleaseUpdated { .. } => "ReleaseUpdated",
            ApplicationEvent::ReleaseDeleted { .. } => "ReleaseDeleted",
            ApplicationEvent::TeamAdded { .. } => "TeamAdded",
            ApplicationEvent::TeamUpdated { .. } => "TeamUpdated",
            ApplicationEvent::TeamDeleted { .. } => "TeamDeleted",
            ApplicationEvent::ComponentAdded { .. } => "ComponentAdded",
            ApplicationEvent::ComponentUpdated { .. } => "ComponentUpdated",
            ApplicationEvent::ComponentDeleted { .. } => "ComponentDeleted",
            ApplicationEvent::UserStoryAdded { .. } => "UserStoryAdded",
            ApplicationEvent::UserStoryUpdated { .. } => "UserStoryUpdated",
            ApplicationEvent::UserStoryDeleted { .. } => "UserStoryDeleted",
            ApplicationEvent::StatusChanged { .. } => "StatusChanged",
            ApplicationEvent::ReleaseApprovalReady { .. } => "ReleaseApprovalReady",
            ApplicationEvent::ApprovalNotificationDispatched { .. } => {
                "ApprovalNotificationDispatched"
            }
            ApplicationEvent::ApprovalNotificationFailed { .. } => "ApprovalNotificationFailed",
        }
    }

    /// Get the event timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ApplicationEvent::ReleaseCreated { timestamp, .. }
            | ApplicationEvent::ReleaseUpdated { timestamp, .. }
            | ApplicationEvent::ReleaseDeleted { timestamp, .. }
            | ApplicationEvent::TeamAdded { timestamp, .. }
            | ApplicationEvent::TeamUpdated { timestamp, .. }
            | ApplicationEvent::TeamDeleted { timestamp, .. }
            | ApplicationEvent::ComponentAdded { timestamp, .. }
            | ApplicationEvent::ComponentUpdated { timestamp, .. }
            | ApplicationEvent::ComponentDeleted { timestamp, .. }
            | ApplicationEvent::UserStoryAdded { timestamp, .. }
            | ApplicationEvent::UserStoryUpdated { timestamp, .. }
            | ApplicationEvent::UserStoryDeleted { timestamp, .. }
            | ApplicationEvent::StatusChanged { timestamp, .. }
            | ApplicationEvent::ReleaseApprovalReady { timestamp, .. }
            | ApplicationEvent::ApprovalNotificationDispatched { timestamp, .. }
            | ApplicationEvent::ApprovalNotificationFailed { timestamp, .. } => *timestamp,
        }
    }

    /// Generate a unique event ID
    pub fn generate_event_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Event publisher port
///
/// Publishing never fails from the caller's point of view; a publisher that
/// cannot deliver drops the event.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an application event
    async fn publish(&self, event: ApplicationEvent);
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ApplicationEvent) {}
}

/// Publisher that writes every event to the `tracing` log
#[derive(Debug, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ApplicationEvent) {
        debug!(
            event_id = %ApplicationEvent::generate_event_id(),
            event_type = event.event_type(),
            timestamp = %event.timestamp(),
            "{:?}",
            event
        );
    }
}

/// In-memory event collector for testing
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<ApplicationEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<ApplicationEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Names of collected events, in publication order
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events().iter().map(ApplicationEvent::event_type).collect()
    }

    /// Clear collected events
    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: ApplicationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = ApplicationEvent::ReleaseCreated {
            release_id: "spring-launch-1".into(),
            name: "Spring Launch".into(),
            adopted_team_ids: vec![],
            unresolved_team_ids: vec!["ghost".into()],
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type(), "ReleaseCreated");
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = ApplicationEvent::StatusChanged {
            entity: EntityKind::Component,
            id: "c-1".into(),
            field: "sonarQube".into(),
            from: "Pending".into(),
            to: "Passed".into(),
            timestamp: now,
        };
        assert_eq!(event.timestamp(), now);
    }

    #[test]
    fn test_generate_event_id() {
        let id1 = ApplicationEvent::generate_event_id();
        let id2 = ApplicationEvent::generate_event_id();
        assert_ne!(id1, id2);
    }

    #[tokio::test]
    async fn test_in_memory_publisher() {
        let publisher = InMemoryEventPublisher::new();
        publisher
            .publish(ApplicationEvent::TeamDeleted {
                team_id: "t-1".into(),
                removed: 3,
                timestamp: Utc::now(),
            })
            .await;

        assert_eq!(publisher.event_types(), vec!["TeamDeleted"]);
        publisher.clear();
        assert!(publisher.events().is_empty());
    }
}
