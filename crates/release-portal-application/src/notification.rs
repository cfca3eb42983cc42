//! Approval message composition and the logging notifier

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::info;

use release_portal_domain::entities::Release;
use release_portal_domain::errors::{DomainError, DomainResult};
use release_portal_domain::ports::ApprovalNotifier;
use release_portal_domain::tree::ReleaseTree;

/// A composed approval message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl ApprovalMessage {
    pub fn compose(release: &Release, recipients: &BTreeSet<String>) -> Self {
        Self {
            recipients: recipients.iter().cloned().collect(),
            subject: format!(
                "Release {} ({}) has been Approved",
                release.name(),
                release.version()
            ),
            body: format!(
                "The release '{}' has received final approval from the Application Owner \
                 and is ready to proceed.",
                release.name()
            ),
        }
    }
}

/// Notifier that writes the composed message to the log instead of mailing it
#[derive(Debug, Default)]
pub struct TracingApprovalNotifier;

impl TracingApprovalNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ApprovalNotifier for TracingApprovalNotifier {
    async fn notify_approval(
        &self,
        release: &ReleaseTree,
        recipients: &BTreeSet<String>,
    ) -> DomainResult<()> {
        if recipients.is_empty() {
            return Err(DomainError::NotificationDispatchFailure {
                release_id: release.release.id().to_string(),
                reason: "no recipients".to_string(),
            });
        }

        let message = ApprovalMessage::compose(&release.release, recipients);
        info!(
            release_id = %release.release.id(),
            to = %message.recipients.join(", "),
            subject = %message.subject,
            "{}",
            message.body
        );
        Ok(())
    }
}
