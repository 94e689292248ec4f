use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A top-level documentation section, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Introduction,
    UserManagement,
    Entities,
    StoredProcedures,
    Storage,
    EdgeFunctions,
    Realtime,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Introduction,
        Section::UserManagement,
        Section::Entities,
        Section::StoredProcedures,
        Section::Storage,
        Section::EdgeFunctions,
        Section::Realtime,
    ];

    /// The stable key used in navigation paths and template categories.
    pub fn key(self) -> &'static str {
        match self {
            Section::Introduction => "introduction",
            Section::UserManagement => "user-management",
            Section::Entities => "entities",
            Section::StoredProcedures => "stored-procedures",
            Section::Storage => "storage",
            Section::EdgeFunctions => "edge-functions",
            Section::Realtime => "realtime",
        }
    }

    /// The label shown in the navigation menu.
    pub fn menu_name(self) -> &'static str {
        match self {
            Section::Introduction => "Connect",
            Section::UserManagement => "User Management",
            Section::Entities => "Tables & Views",
            Section::StoredProcedures => "Stored Procedures",
            Section::Storage => "Storage",
            Section::EdgeFunctions => "Edge Functions",
            Section::Realtime => "Realtime",
        }
    }

    /// The kind of resource listed under this section, if any.
    pub fn resource_kind(self) -> Option<ResourceKind> {
        match self {
            Section::Entities => Some(ResourceKind::Entity),
            Section::StoredProcedures => Some(ResourceKind::Rpc),
            Section::Storage => Some(ResourceKind::Bucket),
            Section::EdgeFunctions => Some(ResourceKind::EdgeFunction),
            Section::Introduction | Section::UserManagement | Section::Realtime => None,
        }
    }

    pub fn has_resources(self) -> bool {
        self.resource_kind().is_some()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

/// The closed set of resource kinds that get per-resource documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Entity,
    Rpc,
    Bucket,
    EdgeFunction,
}

impl ResourceKind {
    pub fn section(self) -> Section {
        match self {
            ResourceKind::Entity => Section::Entities,
            ResourceKind::Rpc => Section::StoredProcedures,
            ResourceKind::Bucket => Section::Storage,
            ResourceKind::EdgeFunction => Section::EdgeFunctions,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Entity => "table or view",
            ResourceKind::Rpc => "stored procedure",
            ResourceKind::Bucket => "bucket",
            ResourceKind::EdgeFunction => "edge function",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for section in Section::ALL {
            assert_eq!(section.key().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "tables".parse::<Section>().unwrap_err();
        assert!(matches!(err, Error::UnknownSection(ref s) if s == "tables"));
    }

    #[test]
    fn resource_kinds_map_back_to_their_section() {
        for section in Section::ALL {
            if let Some(kind) = section.resource_kind() {
                assert_eq!(kind.section(), section);
            }
        }
        assert!(!Section::Realtime.has_resources());
        assert!(Section::Storage.has_resources());
    }

    #[test]
    fn serde_uses_kebab_case_keys() {
        let json = serde_json::to_string(&Section::StoredProcedures).unwrap();
        assert_eq!(json, "\"stored-procedures\"");
    }
}
