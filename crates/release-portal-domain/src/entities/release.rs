//! Release entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{optional_non_blank, require_non_blank};
use crate::errors::DomainResult;
use crate::status::{ReleaseStatus, SignOffStatus};
use crate::value_objects::ReleaseId;

/// Root of the hierarchy. Owns its teams exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    id: ReleaseId,
    name: String,
    version: String,
    release_date: NaiveDate,
    status: ReleaseStatus,
    overall_app_owner_signed_off: SignOffStatus,
}

/// Caller-supplied fields for a new release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    pub name: String,
    pub version: String,
    pub release_date: NaiveDate,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseUpdate {
    pub name: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl Release {
    /// Build a release with default statuses (`In Progress`, sign-off `Pending`)
    pub fn new(id: ReleaseId, draft: ReleaseDraft) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: require_non_blank("name", &draft.name)?,
            version: require_non_blank("version", &draft.version)?,
            release_date: draft.release_date,
            status: ReleaseStatus::default(),
            overall_app_owner_signed_off: SignOffStatus::default(),
        })
    }

    /// Apply a partial update. Validates every field before touching any.
    pub fn apply(&mut self, update: ReleaseUpdate) -> DomainResult<()> {
        let name = optional_non_blank("name", update.name.as_deref())?;
        let version = optional_non_blank("version", update.version.as_deref())?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(version) = version {
            self.version = version;
        }
        if let Some(date) = update.release_date {
            self.release_date = date;
        }
        Ok(())
    }

    /// Replace the lifecycle status, returning the previous value
    pub fn set_status(&mut self, status: ReleaseStatus) -> ReleaseStatus {
        std::mem::replace(&mut self.status, status)
    }

    /// Replace the overall app-owner sign-off, returning the previous value
    pub fn set_overall_app_owner_signed_off(&mut self, status: SignOffStatus) -> SignOffStatus {
        std::mem::replace(&mut self.overall_app_owner_signed_off, status)
    }

    pub fn id(&self) -> &ReleaseId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn status(&self) -> ReleaseStatus {
        self.status
    }

    pub fn overall_app_owner_signed_off(&self) -> SignOffStatus {
        self.overall_app_owner_signed_off
    }
}
