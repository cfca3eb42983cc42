//! Reporting Application Service
//!
//! Release metrics and the per-release CSV status report.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use release_portal_domain::{
    ids::slugify,
    repositories::HierarchyStore,
    status::{ReleaseStatus, ScanType, StatusVocabulary},
    tree::ReleaseTree,
    value_objects::{ReleaseId, UserStoryId},
};

use crate::dto::{ReleaseMetrics, StatusReport};
use crate::errors::{ApplicationError, ApplicationResult};

const HEADER: [&str; 6] = ["Category", "Team", "Item", "Version/ID", "Detail", "Status"];

/// Joins component names in the user story rows
const NAME_SEPARATOR: &str = " | ";

/// Reporting Application Service
pub struct ReportService<S>
where
    S: HierarchyStore,
{
    store: Arc<S>,
}

impl<S> ReportService<S>
where
    S: HierarchyStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Count releases by lifecycle status
    pub async fn release_metrics(&self) -> ApplicationResult<ReleaseMetrics> {
        let statuses = self
            .store
            .read(|graph| Ok(graph.releases().iter().map(|r| r.status()).collect::<Vec<_>>()))
            .await?;

        let mut metrics = ReleaseMetrics {
            total: statuses.len(),
            ..Default::default()
        };
        for status in statuses {
            match status {
                ReleaseStatus::InProgress => metrics.in_progress += 1,
                ReleaseStatus::Completed => metrics.completed += 1,
                ReleaseStatus::Blocked => metrics.blocked += 1,
            }
        }
        Ok(metrics)
    }

    /// Render the status report of one release as CSV
    pub async fn export_status_report(&self, release_id: &str) -> ApplicationResult<StatusReport> {
        let id = ReleaseId::new(release_id);
        let (tree, component_names) = self
            .store
            .read(move |graph| {
                let tree = ReleaseTree::load(graph, &id)?;
                // Stories may link components owned by other teams or releases
                let names: HashMap<UserStoryId, String> = tree
                    .teams
                    .iter()
                    .flat_map(|team| team.user_stories.iter())
                    .map(|story| {
                        let joined = story
                            .component_ids()
                            .iter()
                            .filter_map(|cid| graph.component(cid).map(|c| c.name().to_string()))
                            .collect::<Vec<_>>()
                            .join(NAME_SEPARATOR);
                        (story.id().clone(), joined)
                    })
                    .collect();
                Ok((tree, names))
            })
            .await?;

        let content = render_csv(&tree, &component_names)?;
        let file_name = format!("release-status-{}.csv", slugify(tree.release.name()));
        debug!(
            release_id = %release_id,
            file_name = %file_name,
            bytes = content.len(),
            "Status report rendered"
        );

        Ok(StatusReport { file_name, content })
    }
}

fn render_csv(
    tree: &ReleaseTree,
    component_names: &HashMap<UserStoryId, String>,
) -> ApplicationResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    let release = &tree.release;
    let release_date = release.release_date().format("%Y-%m-%d").to_string();
    writer.write_record([
        "Release",
        "",
        release.name(),
        release.version(),
        "Target Date",
        release_date.as_str(),
    ])?;
    writer.write_record([
        "Release",
        "",
        release.name(),
        release.version(),
        "Overall Approval",
        release.overall_app_owner_signed_off().as_str(),
    ])?;

    for team_tree in &tree.teams {
        let team = &team_tree.team;
        writer.write_record([
            "Team",
            team.name(),
            "QA Sign-off",
            "",
            "",
            team.qa_signed_off().as_str(),
        ])?;
        writer.write_record([
            "Team",
            team.name(),
            "Owner Approval",
            "",
            "",
            team.app_owner_signed_off().as_str(),
        ])?;

        for component in &team_tree.components {
            for scan in ScanType::ALL {
                writer.write_record([
                    "Component",
                    team.name(),
                    component.name(),
                    component.version(),
                    scan.label(),
                    component.scan(scan).as_str(),
                ])?;
            }
        }

        for story in &team_tree.user_stories {
            let names = component_names.get(story.id()).map(String::as_str).unwrap_or("");
            writer.write_record([
                "User Story",
                team.name(),
                story.description(),
                story.id().as_str(),
                "Components",
                names,
            ])?;
            writer.write_record([
                "User Story",
                team.name(),
                story.description(),
                story.id().as_str(),
                "QA Status",
                story.qa_status().as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ApplicationError::ReportFailed(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ApplicationError::ReportFailed(err.to_string()))
}
