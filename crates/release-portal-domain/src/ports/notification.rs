//! Notification collaborator port

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::errors::DomainResult;
use crate::tree::ReleaseTree;

/// Delivers a release approval message.
///
/// The transport (mail, queue, webhook) is the implementor's business. The
/// core calls this outside any store transaction, treats it as best-effort
/// and never retries; failures are reported as
/// `DomainError::NotificationDispatchFailure`.
#[async_trait]
pub trait ApprovalNotifier: Send + Sync {
    async fn notify_approval(
        &self,
        release: &ReleaseTree,
        recipients: &BTreeSet<String>,
    ) -> DomainResult<()>;
}
