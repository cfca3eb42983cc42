//! Outbound views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use release_portal_domain::entities::{Component, Team, UserStory};
use release_portal_domain::hierarchy::CascadeReport;
use release_portal_domain::status::{QaStatus, ReleaseStatus, ScanStatus, SignOffStatus};
use release_portal_domain::tree::{ReleaseTree, TeamTree};
use release_portal_domain::value_objects::EntityKind;

/// Release with everything it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseView {
    pub id: String,
    pub name: String,
    pub version: String,
    pub release_date: NaiveDate,
    pub status: ReleaseStatus,
    pub overall_app_owner_signed_off: SignOffStatus,
    pub teams: Vec<TeamView>,
}

impl ReleaseView {
    /// Create from a domain snapshot
    pub fn from_domain(tree: &ReleaseTree) -> Self {
        let release = &tree.release;
        Self {
            id: release.id().to_string(),
            name: release.name().to_string(),
            version: release.version().to_string(),
            release_date: release.release_date(),
            status: release.status(),
            overall_app_owner_signed_off: release.overall_app_owner_signed_off(),
            teams: tree.teams.iter().map(TeamView::from_domain).collect(),
        }
    }
}

/// Team with its components and user stories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub id: String,
    pub release_id: String,
    pub name: String,
    pub team_dl: String,
    pub product_owner: String,
    pub qa_signed_off: SignOffStatus,
    pub app_owner_signed_off: SignOffStatus,
    pub components: Vec<ComponentView>,
    pub user_stories: Vec<UserStoryView>,
}

impl TeamView {
    pub fn from_domain(tree: &TeamTree) -> Self {
        let team: &Team = &tree.team;
        Self {
            id: team.id().to_string(),
            release_id: team.release_id().to_string(),
            name: team.name().to_string(),
            team_dl: team.team_dl().to_string(),
            product_owner: team.product_owner().to_string(),
            qa_signed_off: team.qa_signed_off(),
            app_owner_signed_off: team.app_owner_signed_off(),
            components: tree.components.iter().map(ComponentView::from_domain).collect(),
            user_stories: tree.user_stories.iter().map(UserStoryView::from_domain).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentView {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub version: String,
    pub sonar_qube: ScanStatus,
    pub nexus_iq: ScanStatus,
    pub checkmarx: ScanStatus,
}

impl ComponentView {
    pub fn from_domain(component: &Component) -> Self {
        use release_portal_domain::status::ScanType;

        Self {
            id: component.id().to_string(),
            team_id: component.team_id().to_string(),
            name: component.name().to_string(),
            version: component.version().to_string(),
            sonar_qube: component.scan(ScanType::SonarQube),
            nexus_iq: component.scan(ScanType::NexusIq),
            checkmarx: component.scan(ScanType::Checkmarx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryView {
    pub id: String,
    pub team_id: String,
    pub description: String,
    pub qa_status: QaStatus,
    pub component_ids: Vec<String>,
}

impl UserStoryView {
    pub fn from_domain(story: &UserStory) -> Self {
        Self {
            id: story.id().to_string(),
            team_id: story.team_id().to_string(),
            description: story.description().to_string(),
            qa_status: story.qa_status(),
            component_ids: story.component_ids().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Result of release creation: the release and team ids that did not resolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRelease {
    pub release: ReleaseView,
    pub unresolved_team_ids: Vec<String>,
}

/// Result of user story creation: the story and component ids that did not resolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserStory {
    pub user_story: UserStoryView,
    pub unresolved_component_ids: Vec<String>,
}

/// Everything removed by one delete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionSummary {
    pub releases: Vec<String>,
    pub teams: Vec<String>,
    pub components: Vec<String>,
    pub user_stories: Vec<String>,
    /// Stories that lost a component link, as `(userStoryId, componentId)`
    pub detached: Vec<(String, String)>,
}

impl DeletionSummary {
    pub fn from_domain(report: &CascadeReport) -> Self {
        Self {
            releases: report.releases.iter().map(ToString::to_string).collect(),
            teams: report.teams.iter().map(ToString::to_string).collect(),
            components: report.components.iter().map(ToString::to_string).collect(),
            user_stories: report.user_stories.iter().map(ToString::to_string).collect(),
            detached: report
                .detached
                .iter()
                .map(|d| (d.user_story_id.to_string(), d.component_id.to_string()))
                .collect(),
        }
    }

    pub fn removed_count(&self) -> usize {
        self.releases.len() + self.teams.len() + self.components.len() + self.user_stories.len()
    }
}

/// One status field transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeView {
    pub entity: EntityKind,
    pub id: String,
    pub field: String,
    pub previous: String,
    pub current: String,
}

/// Outcome of an approval notification trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalDispatchReport {
    pub release_id: String,
    /// Sorted, duplicates collapsed
    pub recipients: Vec<String>,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Release counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMetrics {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub blocked: usize,
}

/// Rendered status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub file_name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_values_serialize_in_display_form() {
        let view = UserStoryView {
            id: "US-login-1".into(),
            team_id: "t-1".into(),
            description: "Login".into(),
            qa_status: QaStatus::InProgress,
            component_ids: vec!["c-1".into()],
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["qaStatus"], "In Progress");
        assert_eq!(json["componentIds"][0], "c-1");
    }

    #[test]
    fn test_dispatch_report_omits_missing_failure() {
        let report = ApprovalDispatchReport {
            release_id: "r-1".into(),
            recipients: vec!["release.manager@example.com".into()],
            delivered: true,
            failure: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("failure"));
        assert!(json.contains("releaseId"));
    }
}
