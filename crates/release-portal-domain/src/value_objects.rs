//! Value objects: entity identifiers and entity kinds

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four kinds of entity in a release hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Release,
    Team,
    Component,
    UserStory,
}

impl EntityKind {
    /// Human readable name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Release => "Release",
            EntityKind::Team => "Team",
            EntityKind::Component => "Component",
            EntityKind::UserStory => "UserStory",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an already generated identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Release identifier
    ReleaseId
);
entity_id!(
    /// Team identifier
    TeamId
);
entity_id!(
    /// Component identifier
    ComponentId
);
entity_id!(
    /// User story identifier
    UserStoryId
);
