//! Application state for the API server

use std::sync::Arc;
use std::time::Instant;

use release_portal_application::events::{EventPublisher, TracingEventPublisher};
use release_portal_application::{
    HierarchyService, ReportService, SignOffService, TracingApprovalNotifier,
};
use release_portal_domain::ids::{IdGenerator, TimestampIdGenerator};
use release_portal_domain::ports::ApprovalNotifier;
use release_portal_domain::signoff::NotificationSettings;
use release_portal_persistence::InMemoryHierarchyStore;

/// Store backing the running server
pub type PortalStore = InMemoryHierarchyStore;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Structural use cases
    pub hierarchy: Arc<HierarchyService<PortalStore>>,
    /// Status mutators and approval notification
    pub signoff: Arc<SignOffService<PortalStore>>,
    /// Metrics and CSV export
    pub reports: Arc<ReportService<PortalStore>>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Fresh in-memory state with timestamp ids and tracing adapters
    pub fn new(settings: NotificationSettings) -> Self {
        Self::with_parts(
            Arc::new(InMemoryHierarchyStore::new()),
            Arc::new(TimestampIdGenerator::new()),
            Arc::new(TracingApprovalNotifier::new()),
            Arc::new(TracingEventPublisher),
            settings,
        )
    }

    /// Wire the services over explicit collaborators
    pub fn with_parts(
        store: Arc<PortalStore>,
        ids: Arc<dyn IdGenerator>,
        notifier: Arc<dyn ApprovalNotifier>,
        events: Arc<dyn EventPublisher>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            hierarchy: Arc::new(HierarchyService::new(
                Arc::clone(&store),
                ids,
                Arc::clone(&events),
            )),
            signoff: Arc::new(SignOffService::new(
                Arc::clone(&store),
                notifier,
                events,
                settings,
            )),
            reports: Arc::new(ReportService::new(store)),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
