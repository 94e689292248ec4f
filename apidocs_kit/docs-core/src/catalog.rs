//! # Resource Catalog Adapter
//!
//! Backend listings arrive in several shapes: `null`, arrays of plain names,
//! or arrays of objects carrying kind-specific metadata. [`normalize`] turns
//! all of them into [`ResourceCatalogEntry`] values, keeping backend order.

use crate::section::Section;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Object fields tried, in order, for an entry's name.
const NAME_FIELDS: [&str; 3] = ["name", "id", "slug"];

/// A normalized listing item. Entries are snapshots and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCatalogEntry {
    pub name: String,
    pub category: Section,
    /// Every field of the source object other than its name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

impl ResourceCatalogEntry {
    pub fn new(name: impl Into<String>, category: Section) -> Self {
        Self {
            name: name.into(),
            category,
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = (!extra.is_empty()).then_some(extra);
        self
    }

    pub fn extra_field(&self, field: &str) -> Option<&Value> {
        self.extra.as_ref().and_then(|extra| extra.get(field))
    }

    /// Whether a storage bucket is public. Unknown visibility counts as private.
    pub fn is_public(&self) -> bool {
        self.extra_field("public")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Argument names of a stored procedure, from `params` or `args`.
    ///
    /// Each item may be a plain string or an object with a `name` field.
    pub fn rpc_param_names(&self) -> Vec<String> {
        let params = self
            .extra_field("params")
            .or_else(|| self.extra_field("args"))
            .and_then(Value::as_array);
        params
            .map(|params| {
                params
                    .iter()
                    .filter_map(|param| match param {
                        Value::String(name) => Some(name.clone()),
                        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(String::from),
                        _ => None,
                    })
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Normalizes a raw backend listing for `category`.
///
/// `None` and `null` are empty listings. Items that are neither a non-empty
/// string nor an object with a string name are skipped.
pub fn normalize(raw: Option<&Value>, category: Section) -> Vec<ResourceCatalogEntry> {
    let items = match raw {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::warn!(%category, kind = value_kind(other), "listing is not an array, treating as empty");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| normalize_item(item, category))
        .collect()
}

fn normalize_item(item: &Value, category: Section) -> Option<ResourceCatalogEntry> {
    match item {
        Value::String(name) if !name.is_empty() => Some(ResourceCatalogEntry::new(name.clone(), category)),
        Value::Object(obj) => {
            let (field, name) = NAME_FIELDS.iter().find_map(|field| {
                obj.get(*field)
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .map(|name| (*field, name.to_string()))
            })?;
            let mut extra = obj.clone();
            extra.remove(field);
            Some(ResourceCatalogEntry::new(name, category).with_extra(extra))
        }
        _ => {
            tracing::debug!(%category, kind = value_kind(item), "skipping malformed listing item");
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Filters `entries` by a case-insensitive substring of the name and sorts
/// the matches by name. `None` means no filter and keeps the given order.
pub fn search(entries: &[ResourceCatalogEntry], query: Option<&str>) -> Vec<ResourceCatalogEntry> {
    let Some(query) = query else {
        return entries.to_vec();
    };
    let needle = query.to_lowercase();
    let mut matches: Vec<_> = entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    matches.sort_by(|a, b| a.name.cmp(&b.name));
    matches
}

/// Column metadata for a table or view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDetail {
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Argument metadata for a stored procedure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDetail {
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
}

/// Schema introspection for a single resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDetail {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDetail>,
    #[serde(default)]
    pub parameters: Vec<ParameterDetail>,
}

/// Every fetched section listing, as of the last fetch, plus the error of
/// each section whose last fetch failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    sections: BTreeMap<Section, Vec<ResourceCatalogEntry>>,
    errors: BTreeMap<Section, String>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the listing of `section` and clears its load error.
    pub fn insert(&mut self, section: Section, entries: Vec<ResourceCatalogEntry>) {
        self.errors.remove(&section);
        self.sections.insert(section, entries);
    }

    /// Records a failed fetch of `section`. Entries from an earlier
    /// successful fetch are kept.
    pub fn record_failure(&mut self, section: Section, message: impl Into<String>) {
        self.sections.entry(section).or_default();
        self.errors.insert(section, message.into());
    }

    /// Why the last fetch of `section` failed, if it did.
    pub fn load_error(&self, section: Section) -> Option<&str> {
        self.errors.get(&section).map(String::as_str)
    }

    pub fn entries(&self, section: Section) -> &[ResourceCatalogEntry] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, section: Section, name: &str) -> Option<&ResourceCatalogEntry> {
        self.entries(section).iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, section: Section, name: &str) -> bool {
        self.find(section, name).is_some()
    }

    pub fn names(&self, section: Section) -> impl Iterator<Item = &str> {
        self.entries(section).iter().map(|entry| entry.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_missing_listings_are_empty() {
        assert!(normalize(None, Section::Entities).is_empty());
        assert!(normalize(Some(&Value::Null), Section::Entities).is_empty());
        assert!(normalize(Some(&json!({"items": []})), Section::Entities).is_empty());
    }

    #[test]
    fn plain_names_keep_backend_order() {
        let raw = json!(["zeta", "alpha", "", "mid"]);
        let names: Vec<_> = normalize(Some(&raw), Section::Entities)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn objects_keep_metadata_in_extra() {
        let raw = json!([
            {"name": "avatars", "public": true},
            {"id": "invoices", "public": false},
            {"slug": "hello-world", "status": "ACTIVE"},
            {"public": true},
            42
        ]);
        let entries = normalize(Some(&raw), Section::Storage);
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_public());
        assert!(!entries[1].is_public());
        assert_eq!(entries[1].name, "invoices");
        assert_eq!(entries[2].extra_field("status"), Some(&json!("ACTIVE")));
        assert!(entries[2].extra_field("slug").is_none());
    }

    #[test]
    fn bare_name_object_has_no_extra() {
        let entries = normalize(Some(&json!([{"name": "users"}])), Section::Entities);
        assert_eq!(entries[0].extra, None);
    }

    #[test]
    fn rpc_params_accept_strings_and_objects() {
        let raw = json!([
            {"name": "add", "params": [{"name": "a", "format": "int4"}, "b", {"format": "x"}]},
            {"name": "now"}
        ]);
        let entries = normalize(Some(&raw), Section::StoredProcedures);
        assert_eq!(entries[0].rpc_param_names(), vec!["a", "b"]);
        assert!(entries[1].rpc_param_names().is_empty());
    }

    #[test]
    fn search_filters_and_sorts() {
        let raw = json!(["user_roles", "posts", "Users", "comments"]);
        let entries = normalize(Some(&raw), Section::Entities);

        let found: Vec<_> = search(&entries, Some("USER")).into_iter().map(|e| e.name).collect();
        assert_eq!(found, vec!["Users", "user_roles"]);

        let all: Vec<_> = search(&entries, None).into_iter().map(|e| e.name).collect();
        assert_eq!(all, vec!["user_roles", "posts", "Users", "comments"]);
    }

    #[test]
    fn snapshot_lookup_is_per_section() {
        let mut snapshot = CatalogSnapshot::new();
        snapshot.insert(Section::Entities, vec![ResourceCatalogEntry::new("users", Section::Entities)]);
        assert!(snapshot.contains(Section::Entities, "users"));
        assert!(!snapshot.contains(Section::Storage, "users"));
        assert!(snapshot.entries(Section::EdgeFunctions).is_empty());
    }

    #[test]
    fn failures_are_recorded_until_the_next_success() {
        let mut snapshot = CatalogSnapshot::new();
        snapshot.insert(Section::Entities, vec![ResourceCatalogEntry::new("users", Section::Entities)]);

        snapshot.record_failure(Section::Entities, "Fetch Error: boom");
        assert_eq!(snapshot.load_error(Section::Entities), Some("Fetch Error: boom"));
        assert!(snapshot.contains(Section::Entities, "users"));
        assert_eq!(snapshot.load_error(Section::Storage), None);

        snapshot.insert(Section::Entities, Vec::new());
        assert_eq!(snapshot.load_error(Section::Entities), None);
    }
}
