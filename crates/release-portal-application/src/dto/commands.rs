//! Inbound commands

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use release_portal_domain::entities::{
    ComponentDraft, ComponentUpdate, TeamDraft, TeamUpdate, UserStoryUpdate,
};
use release_portal_domain::value_objects::{ComponentId, UserStoryId};

use crate::errors::{ApplicationError, ApplicationResult};

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_release_date(value: &str) -> ApplicationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ApplicationError::validation("releaseDate", format!("'{}' is not a YYYY-MM-DD date", value))
    })
}

/// Command to create a release, optionally adopting existing teams
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReleaseCommand {
    pub name: String,
    pub version: String,
    pub release_date: String,
    #[serde(default)]
    pub team_ids: Vec<String>,
}

/// Partial release update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReleaseCommand {
    pub name: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
}

/// Command to add a team to a release
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamCommand {
    pub name: String,
    #[serde(default)]
    pub team_dl: String,
    #[serde(default)]
    pub product_owner: String,
}

impl From<AddTeamCommand> for TeamDraft {
    fn from(cmd: AddTeamCommand) -> Self {
        TeamDraft {
            name: cmd.name,
            team_dl: cmd.team_dl,
            product_owner: cmd.product_owner,
        }
    }
}

/// Partial team update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamCommand {
    pub name: Option<String>,
    pub team_dl: Option<String>,
    pub product_owner: Option<String>,
}

impl From<UpdateTeamCommand> for TeamUpdate {
    fn from(cmd: UpdateTeamCommand) -> Self {
        TeamUpdate {
            name: cmd.name,
            team_dl: cmd.team_dl,
            product_owner: cmd.product_owner,
        }
    }
}

/// Command to add a component to a team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComponentCommand {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl From<AddComponentCommand> for ComponentDraft {
    fn from(cmd: AddComponentCommand) -> Self {
        ComponentDraft {
            name: cmd.name,
            version: cmd.version,
        }
    }
}

/// Partial component update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentCommand {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl From<UpdateComponentCommand> for ComponentUpdate {
    fn from(cmd: UpdateComponentCommand) -> Self {
        ComponentUpdate {
            name: cmd.name,
            version: cmd.version,
        }
    }
}

/// Command to add a user story; unknown component ids are reported, not rejected
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserStoryCommand {
    pub description: String,
    #[serde(default)]
    pub component_ids: Vec<String>,
}

/// Partial user story update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStoryCommand {
    pub description: Option<String>,
}

impl From<UpdateUserStoryCommand> for UserStoryUpdate {
    fn from(cmd: UpdateUserStoryCommand) -> Self {
        UserStoryUpdate {
            description: cmd.description,
        }
    }
}

/// A child of a team, addressed for deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamChild {
    Component(ComponentId),
    UserStory(UserStoryId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_release_command_serialization() {
        let cmd: CreateReleaseCommand = serde_json::from_str(
            r#"{"name":"Spring Launch","version":"1.0","releaseDate":"2026-04-01"}"#,
        )
        .unwrap();

        assert_eq!(cmd.name, "Spring Launch");
        assert_eq!(cmd.release_date, "2026-04-01");
        assert!(cmd.team_ids.is_empty());
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("2026-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
        );
        assert!(parse_release_date("01/04/2026").is_err());
        assert!(parse_release_date("2026-02-30").is_err());
    }
}
