//! Team entity

use serde::{Deserialize, Serialize};

use super::{optional_non_blank, require_non_blank};
use crate::errors::DomainResult;
use crate::status::SignOffStatus;
use crate::value_objects::{ReleaseId, TeamId};

/// Organizational unit within a release. Owns components and user stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    id: TeamId,
    release_id: ReleaseId,
    name: String,
    /// Distribution-list contact; may be empty
    team_dl: String,
    /// Product owner's display name; may be empty
    product_owner: String,
    qa_signed_off: SignOffStatus,
    app_owner_signed_off: SignOffStatus,
}

/// Caller-supplied fields for a new team
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub team_dl: String,
    pub product_owner: String,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub team_dl: Option<String>,
    pub product_owner: Option<String>,
}

impl Team {
    /// Build a team under `release_id` with both sign-offs `Pending`
    pub fn new(id: TeamId, release_id: ReleaseId, draft: TeamDraft) -> DomainResult<Self> {
        Ok(Self {
            id,
            release_id,
            name: require_non_blank("name", &draft.name)?,
            team_dl: draft.team_dl.trim().to_string(),
            product_owner: draft.product_owner.trim().to_string(),
            qa_signed_off: SignOffStatus::default(),
            app_owner_signed_off: SignOffStatus::default(),
        })
    }

    /// Apply a partial update. Validates every field before touching any.
    pub fn apply(&mut self, update: TeamUpdate) -> DomainResult<()> {
        let name = optional_non_blank("name", update.name.as_deref())?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(dl) = update.team_dl {
            self.team_dl = dl.trim().to_string();
        }
        if let Some(owner) = update.product_owner {
            self.product_owner = owner.trim().to_string();
        }
        Ok(())
    }

    /// Move the team under another release.
    ///
    /// Only release creation does this, when it is handed existing team ids.
    /// The team's components and stories follow it since they point at the
    /// team, not the release.
    pub fn adopt_into(&mut self, release_id: ReleaseId) -> ReleaseId {
        std::mem::replace(&mut self.release_id, release_id)
    }

    pub fn set_qa_signed_off(&mut self, status: SignOffStatus) -> SignOffStatus {
        std::mem::replace(&mut self.qa_signed_off, status)
    }

    pub fn set_app_owner_signed_off(&mut self, status: SignOffStatus) -> SignOffStatus {
        std::mem::replace(&mut self.app_owner_signed_off, status)
    }

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn release_id(&self) -> &ReleaseId {
        &self.release_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_dl(&self) -> &str {
        &self.team_dl
    }

    pub fn product_owner(&self) -> &str {
        &self.product_owner
    }

    pub fn qa_signed_off(&self) -> SignOffStatus {
        self.qa_signed_off
    }

    pub fn app_owner_signed_off(&self) -> SignOffStatus {
        self.app_owner_signed_off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team_signoffs_pending() {
        let team = Team::new(
            TeamId::new("payments-1"),
            ReleaseId::new("r-1"),
            TeamDraft {
                name: "Payments".into(),
                team_dl: " payments@x.com ".into(),
                product_owner: "Jane Doe".into(),
            },
        )
        .unwrap();

        assert_eq!(team.team_dl(), "payments@x.com");
        assert_eq!(team.qa_signed_off(), SignOffStatus::Pending);
        assert_eq!(team.app_owner_signed_off(), SignOffStatus::Pending);
    }

    #[test]
    fn test_update_can_clear_contacts() {
        let mut team = Team::new(
            TeamId::new("t-1"),
            ReleaseId::new("r-1"),
            TeamDraft {
                name: "Core".into(),
                team_dl: "core@x.com".into(),
                product_owner: "Sam Lee".into(),
            },
        )
        .unwrap();

        team.apply(TeamUpdate {
            team_dl: Some(String::new()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(team.team_dl(), "");
        assert_eq!(team.product_owner(), "Sam Lee");
        assert_eq!(team.release_id().as_str(), "r-1");
    }
}
