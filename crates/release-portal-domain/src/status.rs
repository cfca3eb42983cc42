//! Status Model
//!
//! Closed status vocabularies for every status field in the hierarchy, the
//! default assigned at creation, and the validator every status write goes
//! through. Nothing else in the workspace parses a status string.
//!
//! | Entity    | Field                       | Vocabulary                 | Default     |
//! |-----------|-----------------------------|----------------------------|-------------|
//! | Release   | `status`                    | In Progress, Completed,    | In Progress |
//! |           |                             | Blocked                    |             |
//! | Release   | `overallAppOwnerSignedOff`  | Pending, Completed         | Pending     |
//! | Team      | `qaSignedOff`               | Pending, Completed         | Pending     |
//! | Team      | `appOwnerSignedOff`         | Pending, Completed         | Pending     |
//! | Component | `sonarQube`, `nexusIq`,     | Pending, Passed, Failed    | Pending     |
//! |           | `checkmarx`                 |                            |             |
//! | UserStory | `qaStatus`                  | Pending, In Progress,      | Pending     |
//! |           |                             | Passed, Failed             |             |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::EntityKind;

/// A closed set of status values
pub trait StatusVocabulary: Sized + Copy + PartialEq + fmt::Display + 'static {
    /// Every legal value, in display order
    const VALUES: &'static [Self];

    /// Canonical wire form
    fn as_str(&self) -> &'static str;

    /// Parse a wire value. Accepts the canonical form and, for multi-word
    /// values, the compact variant name (`InProgress`).
    fn parse(value: &str) -> Option<Self> {
        Self::VALUES
            .iter()
            .copied()
            .find(|v| v.as_str() == value || v.as_str().replace(' ', "") == value)
    }
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl StatusVocabulary for $name {
            const VALUES: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary!(
    /// Lifecycle status of a release
    ReleaseStatus {
        InProgress => "In Progress",
        Completed => "Completed",
        Blocked => "Blocked",
    }
);

vocabulary!(
    /// Binary approval gate
    SignOffStatus {
        Pending => "Pending",
        Completed => "Completed",
    }
);

vocabulary!(
    /// Outcome of a security/quality scan
    ScanStatus {
        Pending => "Pending",
        Passed => "Passed",
        Failed => "Failed",
    }
);

vocabulary!(
    /// QA progress of a user story
    QaStatus {
        Pending => "Pending",
        InProgress => "In Progress",
        Passed => "Passed",
        Failed => "Failed",
    }
);

impl Default for ReleaseStatus {
    fn default() -> Self {
        ReleaseStatus::InProgress
    }
}

impl Default for SignOffStatus {
    fn default() -> Self {
        SignOffStatus::Pending
    }
}

impl Default for ScanStatus {
    fn default() -> Self {
        ScanStatus::Pending
    }
}

impl Default for QaStatus {
    fn default() -> Self {
        QaStatus::Pending
    }
}

/// The three independent scans every component carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanType {
    SonarQube,
    NexusIq,
    Checkmarx,
}

impl ScanType {
    pub const ALL: [ScanType; 3] = [ScanType::SonarQube, ScanType::NexusIq, ScanType::Checkmarx];

    /// Status field backing this scan
    pub fn field(&self) -> StatusField {
        match self {
            ScanType::SonarQube => StatusField::SonarQube,
            ScanType::NexusIq => StatusField::NexusIq,
            ScanType::Checkmarx => StatusField::Checkmarx,
        }
    }

    /// Label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            ScanType::SonarQube => "SonarQube",
            ScanType::NexusIq => "NexusIQ",
            ScanType::Checkmarx => "Checkmarx",
        }
    }

    /// Parse the wire name (`sonarQube`, `nexusIq`, `checkmarx`)
    pub fn parse(value: &str) -> DomainResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|scan| scan.field().name() == value)
            .ok_or_else(|| {
                DomainError::invalid_argument(
                    "scanType",
                    format!("'{}' is not one of sonarQube, nexusIq, checkmarx", value),
                )
            })
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().name())
    }
}

/// Every status-bearing field in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusField {
    ReleaseStatus,
    OverallAppOwnerSignOff,
    TeamQaSignOff,
    TeamAppOwnerSignOff,
    SonarQube,
    NexusIq,
    Checkmarx,
    UserStoryQaStatus,
}

impl StatusField {
    pub const ALL: [StatusField; 8] = [
        StatusField::ReleaseStatus,
        StatusField::OverallAppOwnerSignOff,
        StatusField::TeamQaSignOff,
        StatusField::TeamAppOwnerSignOff,
        StatusField::SonarQube,
        StatusField::NexusIq,
        StatusField::Checkmarx,
        StatusField::UserStoryQaStatus,
    ];

    /// Entity kind owning the field
    pub fn entity(&self) -> EntityKind {
        match self {
            StatusField::ReleaseStatus | StatusField::OverallAppOwnerSignOff => {
                EntityKind::Release
            }
            StatusField::TeamQaSignOff | StatusField::TeamAppOwnerSignOff => EntityKind::Team,
            StatusField::SonarQube | StatusField::NexusIq | StatusField::Checkmarx => {
                EntityKind::Component
            }
            StatusField::UserStoryQaStatus => EntityKind::UserStory,
        }
    }

    /// Field name as exposed on the wire
    pub fn name(&self) -> &'static str {
        match self {
            StatusField::ReleaseStatus => "status",
            StatusField::OverallAppOwnerSignOff => "overallAppOwnerSignedOff",
            StatusField::TeamQaSignOff => "qaSignedOff",
            StatusField::TeamAppOwnerSignOff => "appOwnerSignedOff",
            StatusField::SonarQube => "sonarQube",
            StatusField::NexusIq => "nexusIq",
            StatusField::Checkmarx => "checkmarx",
            StatusField::UserStoryQaStatus => "qaStatus",
        }
    }

    /// Look a field up by entity and wire name
    pub fn lookup(entity: EntityKind, name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.entity() == entity && field.name() == name)
    }

    /// Legal values for this field, in display order
    pub fn allowed_values(&self) -> Vec<&'static str> {
        match self {
            StatusField::ReleaseStatus => wire_values::<ReleaseStatus>(),
            StatusField::OverallAppOwnerSignOff
            | StatusField::TeamQaSignOff
            | StatusField::TeamAppOwnerSignOff => wire_values::<SignOffStatus>(),
            StatusField::SonarQube | StatusField::NexusIq | StatusField::Checkmarx => {
                wire_values::<ScanStatus>()
            }
            StatusField::UserStoryQaStatus => wire_values::<QaStatus>(),
        }
    }

    /// Value assigned when the owning entity is created
    pub fn default_value(&self) -> StatusValue {
        match self {
            StatusField::ReleaseStatus => StatusValue::Release(ReleaseStatus::default()),
            StatusField::OverallAppOwnerSignOff
            | StatusField::TeamQaSignOff
            | StatusField::TeamAppOwnerSignOff => StatusValue::SignOff(SignOffStatus::default()),
            StatusField::SonarQube | StatusField::NexusIq | StatusField::Checkmarx => {
                StatusValue::Scan(ScanStatus::default())
            }
            StatusField::UserStoryQaStatus => StatusValue::Qa(QaStatus::default()),
        }
    }

    /// Parse `value` against this field's vocabulary
    pub fn parse(&self, value: &str) -> DomainResult<StatusValue> {
        match self {
            StatusField::ReleaseStatus => {
                parse_for::<ReleaseStatus>(*self, value).map(StatusValue::Release)
            }
            StatusField::OverallAppOwnerSignOff
            | StatusField::TeamQaSignOff
            | StatusField::TeamAppOwnerSignOff => {
                parse_for::<SignOffStatus>(*self, value).map(StatusValue::SignOff)
            }
            StatusField::SonarQube | StatusField::NexusIq | StatusField::Checkmarx => {
                parse_for::<ScanStatus>(*self, value).map(StatusValue::Scan)
            }
            StatusField::UserStoryQaStatus => {
                parse_for::<QaStatus>(*self, value).map(StatusValue::Qa)
            }
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity(), self.name())
    }
}

/// A validated status value of any vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Release(ReleaseStatus),
    SignOff(SignOffStatus),
    Scan(ScanStatus),
    Qa(QaStatus),
}

impl StatusValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusValue::Release(v) => v.as_str(),
            StatusValue::SignOff(v) => v.as_str(),
            StatusValue::Scan(v) => v.as_str(),
            StatusValue::Qa(v) => v.as_str(),
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a status write given the entity kind and wire field name.
///
/// Unknown fields are `InvalidArgument`; values outside the field's
/// vocabulary are `InvalidStatus`.
pub fn validate(entity: EntityKind, field: &str, value: &str) -> DomainResult<StatusValue> {
    let field = StatusField::lookup(entity, field).ok_or_else(|| {
        DomainError::invalid_argument(field, format!("not a status field of {}", entity))
    })?;
    field.parse(value)
}

/// Typed validation for a field whose vocabulary is `T`
pub fn parse_for<T: StatusVocabulary>(field: StatusField, value: &str) -> DomainResult<T> {
    T::parse(value).ok_or_else(|| DomainError::InvalidStatus {
        entity: field.entity(),
        field: field.name().to_string(),
        value: value.to_string(),
    })
}

fn wire_values<T: StatusVocabulary>() -> Vec<&'static str> {
    T::VALUES.iter().map(|v| v.as_str()).collect()
}
