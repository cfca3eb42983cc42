//! Sign-off Application Service
//!
//! The dedicated status mutators, the sign-off summary and the explicit
//! approval notification trigger. Each mutator validates its value through
//! the Status Model before the store is touched, so a rejected value leaves
//! the previous one in place.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use release_portal_domain::{
    errors::DomainResult,
    hierarchy::{require_component, require_release, require_team, require_user_story},
    ports::ApprovalNotifier,
    repositories::{HierarchyGraph, HierarchyStore},
    signoff::{NotificationSettings, SignOffSummary},
    status::{
        parse_for, QaStatus, ReleaseStatus, ScanStatus, ScanType, SignOffStatus, StatusField,
        StatusVocabulary,
    },
    tree::ReleaseTree,
    value_objects::{ComponentId, ReleaseId, TeamId, UserStoryId},
};

use crate::dto::{ApprovalDispatchReport, StatusChangeView};
use crate::errors::ApplicationResult;
use crate::events::{ApplicationEvent, EventPublisher};

/// Sign-off Application Service
pub struct SignOffService<S>
where
    S: HierarchyStore,
{
    store: Arc<S>,
    notifier: Arc<dyn ApprovalNotifier>,
    events: Arc<dyn EventPublisher>,
    settings: NotificationSettings,
}

impl<S> SignOffService<S>
where
    S: HierarchyStore,
{
    pub fn new(
        store: Arc<S>,
        notifier: Arc<dyn ApprovalNotifier>,
        events: Arc<dyn EventPublisher>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            store,
            notifier,
            events,
            settings,
        }
    }

    /// Set one of a component's three scan statuses
    pub async fn set_scan_status(
        &self,
        component_id: &str,
        scan_type: &str,
        value: &str,
    ) -> ApplicationResult<StatusChangeView> {
        let scan = ScanType::parse(scan_type)?;
        let status: ScanStatus = self.validated(scan.field(), component_id, value)?;
        let id = ComponentId::new(component_id);

        let previous = self
            .store
            .transact(move |graph| {
                let mut component = require_component(graph, &id)?.clone();
                let previous = component.set_scan(scan, status);
                graph.save_component(component)?;
                Ok(previous)
            })
            .await?;

        Ok(self.record(scan.field(), component_id, previous, status).await)
    }

    pub async fn set_user_story_qa_status(
        &self,
        story_id: &str,
        value: &str,
    ) -> ApplicationResult<StatusChangeView> {
        let field = StatusField::UserStoryQaStatus;
        let status: QaStatus = self.validated(field, story_id, value)?;
        let id = UserStoryId::new(story_id);

        let previous = self
            .store
            .transact(move |graph| {
                let mut story = require_user_story(graph, &id)?.clone();
                let previous = story.set_qa_status(status);
                graph.save_user_story(story)?;
                Ok(previous)
            })
            .await?;

        Ok(self.record(field, story_id, previous, status).await)
    }

    pub async fn set_team_qa_sign_off(
        &self,
        team_id: &str,
        value: &str,
    ) -> ApplicationResult<StatusChangeView> {
        let field = StatusField::TeamQaSignOff;
        let status: SignOffStatus = self.validated(field, team_id, value)?;
        let id = TeamId::new(team_id);

        let previous = self
            .store
            .transact(move |graph| {
                let mut team = require_team(graph, &id)?.clone();
                let previous = team.set_qa_signed_off(status);
                graph.save_team(team)?;
                Ok(previous)
            })
            .await?;

        Ok(self.record(field, team_id, previous, status).await)
    }

    /// Set a team's app-owner sign-off.
    ///
    /// Publishes `ReleaseApprovalReady` when this write completes the last
    /// outstanding team approval of the release. Never notifies anyone.
    pub async fn set_team_app_owner_sign_off(
        &self,
        team_id: &str,
        value: &str,
    ) -> ApplicationResult<StatusChangeView> {
        let field = StatusField::TeamAppOwnerSignOff;
        let status: SignOffStatus = self.validated(field, team_id, value)?;
        let id = TeamId::new(team_id);

        let (previous, became_ready) = self
            .store
            .transact(move |graph| {
                let mut team = require_team(graph, &id)?.clone();
                let release_id = team.release_id().clone();
                let before = all_teams_approved(graph, &release_id)?;

                let previous = team.set_app_owner_signed_off(status);
                graph.save_team(team)?;

                let after = all_teams_approved(graph, &release_id)?;
                Ok((previous, (!before && after).then_some(release_id)))
            })
            .await?;

        let change = self.record(field, team_id, previous, status).await;

        if let Some(release_id) = became_ready {
            info!(release_id = %release_id, "All teams approved");
            self.events
                .publish(ApplicationEvent::ReleaseApprovalReady {
                    release_id: release_id.to_string(),
                    timestamp: Utc::now(),
                })
                .await;
        }

        Ok(change)
    }

    pub async fn set_overall_app_owner_sign_off(
        &self,
        release_id: &str,
        value: &str,
    ) -> ApplicationResult<StatusChangeView> {
        let field = StatusField::OverallAppOwnerSignOff;
        let status: SignOffStatus = self.validated(field, release_id, value)?;
        let id = ReleaseId::new(release_id);

        let previous = self
            .store
            .transact(move |graph| {
                let mut release = require_release(graph, &id)?.clone();
                let previous = release.set_overall_app_owner_signed_off(status);
                graph.save_release(release)?;
                Ok(previous)
            })
            .await?;

        Ok(self.record(field, release_id, previous, status).await)
    }

    pub async fn set_release_status(
        &self,
        release_id: &str,
        value: &str,
    ) -> ApplicationResult<StatusChangeView> {
        let field = StatusField::ReleaseStatus;
        let status: ReleaseStatus = self.validated(field, release_id, value)?;
        let id = ReleaseId::new(release_id);

        let previous = self
            .store
            .transact(move |graph| {
                let mut release = require_release(graph, &id)?.clone();
                let previous = release.set_status(status);
                graph.save_release(release)?;
                Ok(previous)
            })
            .await?;

        Ok(self.record(field, release_id, previous, status).await)
    }

    /// Aggregated sign-off state of a release. Informational only.
    pub async fn sign_off_summary(&self, release_id: &str) -> ApplicationResult<SignOffSummary> {
        let id = ReleaseId::new(release_id);
        let summary = self
            .store
            .read(move |graph| {
                ReleaseTree::load(graph, &id).map(|tree| SignOffSummary::from_tree(&tree))
            })
            .await?;
        Ok(summary)
    }

    /// Send the approval message for a release.
    ///
    /// Does not check that sign-off is complete. The notifier runs after the
    /// snapshot is taken, outside any transaction; its failure is logged and
    /// reported in the result, never returned as an error.
    pub async fn trigger_approval_notification(
        &self,
        release_id: &str,
    ) -> ApplicationResult<ApprovalDispatchReport> {
        let id = ReleaseId::new(release_id);
        let tree = self
            .store
            .read(move |graph| ReleaseTree::load(graph, &id))
            .await?;

        let recipients = self.settings.approval_recipients(&tree);
        let outcome = self.notifier.notify_approval(&tree, &recipients).await;

        let mut report = ApprovalDispatchReport {
            release_id: release_id.to_string(),
            recipients: recipients.into_iter().collect(),
            delivered: outcome.is_ok(),
            failure: None,
        };

        match outcome {
            Ok(()) => {
                info!(
                    release_id = %release_id,
                    recipients = report.recipients.len(),
                    "Approval notification sent"
                );
                self.events
                    .publish(ApplicationEvent::ApprovalNotificationDispatched {
                        release_id: release_id.to_string(),
                        recipients: report.recipients.len(),
                        timestamp: Utc::now(),
                    })
                    .await;
            }
            Err(err) => {
                warn!(release_id = %release_id, error = %err, "Approval notification failed");
                report.failure = Some(err.to_string());
                self.events
                    .publish(ApplicationEvent::ApprovalNotificationFailed {
                        release_id: release_id.to_string(),
                        reason: err.to_string(),
                        timestamp: Utc::now(),
                    })
                    .await;
            }
        }

        Ok(report)
    }

    fn validated<T: StatusVocabulary>(
        &self,
        field: StatusField,
        id: &str,
        value: &str,
    ) -> ApplicationResult<T> {
        parse_for::<T>(field, value).map_err(|err| {
            warn!(field = %field, id = %id, value = %value, "Rejected status value");
            err.into()
        })
    }

    async fn record<T: StatusVocabulary>(
        &self,
        field: StatusField,
        id: &str,
        previous: T,
        current: T,
    ) -> StatusChangeView {
        let change = StatusChangeView {
            entity: field.entity(),
            id: id.to_string(),
            field: field.name().to_string(),
            previous: previous.as_str().to_string(),
            current: current.as_str().to_string(),
        };

        if previous == current {
            debug!(field = %field, id = %id, value = %current, "Status unchanged");
            return change;
        }

        info!(field = %field, id = %id, from = %previous, to = %current, "Status changed");
        self.events
            .publish(ApplicationEvent::StatusChanged {
                entity: change.entity,
                id: change.id.clone(),
                field: change.field.clone(),
                from: change.previous.clone(),
                to: change.current.clone(),
                timestamp: Utc::now(),
            })
            .await;

        change
    }
}

fn all_teams_approved(graph: &dyn HierarchyGraph, release_id: &ReleaseId) -> DomainResult<bool> {
    ReleaseTree::load(graph, release_id)
        .map(|tree| SignOffSummary::from_tree(&tree).all_teams_approved)
}
