//! Sign-off aggregation and approval recipients

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::status::SignOffStatus;
use crate::tree::ReleaseTree;
use crate::value_objects::ReleaseId;

/// Addresses used when composing an approval notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Always receives approval notifications
    pub release_manager: String,
    /// Domain appended to addresses derived from product-owner names
    pub email_domain: String,
    /// Replaces whitespace in product-owner names
    pub owner_separator: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            release_manager: "release.manager@example.com".to_string(),
            email_domain: "example.com".to_string(),
            owner_separator: ".".to_string(),
        }
    }
}

impl NotificationSettings {
    /// Derive an address from a product owner's display name.
    ///
    /// `"Jane Doe"` becomes `jane.doe@example.com`. Blank names yield `None`.
    pub fn product_owner_address(&self, product_owner: &str) -> Option<String> {
        let local = product_owner
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(self.owner_separator.as_str());
        if local.is_empty() {
            return None;
        }
        Some(format!("{}@{}", local, self.email_domain))
    }

    /// Recipient set for a release approval: the release manager, every
    /// non-empty team distribution list and every derivable product-owner
    /// address, duplicates collapsed.
    pub fn approval_recipients(&self, tree: &ReleaseTree) -> BTreeSet<String> {
        let mut recipients = BTreeSet::new();
        recipients.insert(self.release_manager.clone());

        for team in tree.teams.iter().map(|t| &t.team) {
            let dl = team.team_dl().trim();
            if !dl.is_empty() {
                recipients.insert(dl.to_string());
            }
            if let Some(address) = self.product_owner_address(team.product_owner()) {
                recipients.insert(address);
            }
        }
        recipients
    }
}

/// Aggregated sign-off state of a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOffSummary {
    pub release_id: ReleaseId,
    pub teams: usize,
    pub qa_signed_off: usize,
    pub app_owner_signed_off: usize,
    pub overall_app_owner_signed_off: SignOffStatus,
    /// At least one team and every team's app owner has signed off
    pub all_teams_approved: bool,
}

impl SignOffSummary {
    pub fn from_tree(tree: &ReleaseTree) -> Self {
        let teams = tree.teams.len();
        let qa_signed_off = tree
            .teams
            .iter()
            .filter(|t| t.team.qa_signed_off() == SignOffStatus::Completed)
            .count();
        let app_owner_signed_off = tree
            .teams
            .iter()
            .filter(|t| t.team.app_owner_signed_off() == SignOffStatus::Completed)
            .count();

        Self {
            release_id: tree.release.id().clone(),
            teams,
            qa_signed_off,
            app_owner_signed_off,
            overall_app_owner_signed_off: tree.release.overall_app_owner_signed_off(),
            all_teams_approved: teams > 0 && app_owner_signed_off == teams,
        }
    }
}
