//! Component entity

use serde::{Deserialize, Serialize};

use super::{optional_non_blank, require_non_blank};
use crate::errors::DomainResult;
use crate::status::{ScanStatus, ScanType};
use crate::value_objects::{ComponentId, TeamId};

/// Deployable code unit with three independent scan statuses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    id: ComponentId,
    team_id: TeamId,
    name: String,
    version: String,
    sonar_qube: ScanStatus,
    nexus_iq: ScanStatus,
    checkmarx: ScanStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDraft {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentUpdate {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl Component {
    /// Build a component under `team_id` with every scan `Pending`
    pub fn new(id: ComponentId, team_id: TeamId, draft: ComponentDraft) -> DomainResult<Self> {
        Ok(Self {
            id,
            team_id,
            name: require_non_blank("name", &draft.name)?,
            version: draft.version.trim().to_string(),
            sonar_qube: ScanStatus::default(),
            nexus_iq: ScanStatus::default(),
            checkmarx: ScanStatus::default(),
        })
    }

    pub fn apply(&mut self, update: ComponentUpdate) -> DomainResult<()> {
        let name = optional_non_blank("name", update.name.as_deref())?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(version) = update.version {
            self.version = version.trim().to_string();
        }
        Ok(())
    }

    pub fn scan(&self, scan: ScanType) -> ScanStatus {
        match scan {
            ScanType::SonarQube => self.sonar_qube,
            ScanType::NexusIq => self.nexus_iq,
            ScanType::Checkmarx => self.checkmarx,
        }
    }

    /// Replace one scan status, returning the previous value
    pub fn set_scan(&mut self, scan: ScanType, status: ScanStatus) -> ScanStatus {
        let slot = match scan {
            ScanType::SonarQube => &mut self.sonar_qube,
            ScanType::NexusIq => &mut self.nexus_iq,
            ScanType::Checkmarx => &mut self.checkmarx,
        };
        std::mem::replace(slot, status)
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}
