//! An in-memory [`CatalogSource`], loadable from a JSON snapshot:
//!
//! ```json
//! {
//!   "context": { "projectRef": "abcxyz", "endpointUrl": "https://abcxyz.supabase.co" },
//!   "listings": { "entities": ["users"], "storage": [{ "name": "avatars", "public": true }] },
//!   "schemas": { "users": { "columns": [{ "name": "id", "format": "uuid" }] } }
//! }
//! ```

use crate::catalog::{normalize, search, CatalogSnapshot, ResourceCatalogEntry, SchemaDetail};
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::section::Section;
use crate::source::{BoxFuture, CatalogSource, Page, PageQuery};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    context: ProjectContext,
    #[serde(default)]
    listings: BTreeMap<String, Value>,
    #[serde(default)]
    schemas: HashMap<String, SchemaDetail>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    context: ProjectContext,
    listings: BTreeMap<Section, Vec<ResourceCatalogEntry>>,
    schemas: HashMap<String, SchemaDetail>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: ProjectContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_listing(mut self, section: Section, entries: Vec<ResourceCatalogEntry>) -> Self {
        self.listings.insert(section, entries);
        self
    }

    /// Adds a listing in any raw backend shape, normalized on the way in.
    pub fn with_raw_listing(self, section: Section, raw: &Value) -> Self {
        let entries = normalize(Some(raw), section);
        self.with_listing(section, entries)
    }

    pub fn with_schema(mut self, resource: impl Into<String>, detail: SchemaDetail) -> Self {
        self.schemas.insert(resource.into(), detail);
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(content)?;
        let mut catalog = Self::new().with_context(raw.context);
        for (key, listing) in &raw.listings {
            let section: Section = key.parse()?;
            catalog = catalog.with_raw_listing(section, listing);
        }
        catalog.schemas = raw.schemas;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading catalog snapshot");
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Every listing, as a snapshot for content rendering.
    pub fn snapshot(&self) -> CatalogSnapshot {
        let mut snapshot = CatalogSnapshot::new();
        for (section, entries) in &self.listings {
            snapshot.insert(*section, entries.clone());
        }
        snapshot
    }

    fn entries(&self, section: Section) -> &[ResourceCatalogEntry] {
        self.listings.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    fn page(&self, category: Section, query: &PageQuery) -> Result<Page> {
        let offset = match query.cursor.as_deref() {
            None => 0,
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| Error::Fetch(format!("invalid page cursor: {}", cursor)))?,
        };
        let limit = query.limit.max(1);
        let matches = search(self.entries(category), query.search.as_deref());

        let end = offset.saturating_add(limit).min(matches.len());
        let items = matches.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        let next_cursor = (end < matches.len()).then(|| end.to_string());
        Ok(Page { items, next_cursor })
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_resource_listing<'a>(
        &'a self,
        category: Section,
        _project_ref: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ResourceCatalogEntry>>> {
        Box::pin(async move { Ok(self.entries(category).to_vec()) })
    }

    fn fetch_paginated_resource_listing<'a>(
        &'a self,
        category: Section,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<Page>> {
        Box::pin(async move { self.page(category, query) })
    }

    fn fetch_schema_detail<'a>(&'a self, resource: &'a str) -> BoxFuture<'a, Result<Option<SchemaDetail>>> {
        Box::pin(async move { Ok(self.schemas.get(resource).cloned()) })
    }

    fn resolve_project_context(&self) -> BoxFuture<'_, Result<ProjectContext>> {
        Box::pin(async move { Ok(self.context.clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SNAPSHOT: &str = r#"{
        "context": { "projectRef": "abcxyz", "endpointUrl": "https://abcxyz.supabase.co" },
        "listings": {
            "entities": ["users", "posts", "user_roles"],
            "storage": [{ "name": "avatars", "public": true }],
            "edge-functions": null
        },
        "schemas": { "users": { "description": "App users", "columns": [{ "name": "id", "format": "uuid", "required": true }] } }
    }"#;

    fn entities(count: usize) -> StaticCatalog {
        let names: Vec<_> = (0..count).map(|i| format!("table_{i:02}")).collect();
        StaticCatalog::new().with_raw_listing(Section::Entities, &json!(names))
    }

    #[tokio::test]
    async fn json_snapshot_loads_every_part() {
        let catalog = StaticCatalog::from_json_str(SNAPSHOT).unwrap();

        let context = catalog.resolve_project_context().await.unwrap();
        assert_eq!(context.project_ref(), Some("abcxyz"));

        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.names(Section::Entities).collect::<Vec<_>>(), ["users", "posts", "user_roles"]);
        assert!(snapshot.find(Section::Storage, "avatars").unwrap().is_public());
        assert!(snapshot.entries(Section::EdgeFunctions).is_empty());

        let users = catalog.fetch_schema_detail("users").await.unwrap().unwrap();
        assert_eq!(users.columns[0].format.as_deref(), Some("uuid"));
        assert!(catalog.fetch_schema_detail("posts").await.unwrap().is_none());
    }

    #[test]
    fn unknown_section_key_is_rejected() {
        let err = StaticCatalog::from_json_str(r#"{"listings": {"tables": []}}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownSection(_)));
    }

    #[tokio::test]
    async fn pages_walk_to_the_end() {
        let catalog = entities(5);
        let mut query = PageQuery {
            limit: 2,
            ..PageQuery::default()
        };
        let mut seen = Vec::new();
        loop {
            let page = catalog
                .fetch_paginated_resource_listing(Section::Entities, &query)
                .await
                .unwrap();
            seen.extend(page.items.into_iter().map(|e| e.name));
            match page.next_cursor {
                Some(cursor) => query.cursor = Some(cursor),
                None => break,
            }
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[4], "table_04");
    }

    #[tokio::test]
    async fn search_pages_are_filtered_and_sorted() {
        let catalog = StaticCatalog::from_json_str(SNAPSHOT).unwrap();
        let query = PageQuery {
            search: Some("user".into()),
            cursor: None,
            limit: 10,
        };
        let page = catalog
            .fetch_paginated_resource_listing(Section::Entities, &query)
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["user_roles", "users"]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn bad_cursor_is_a_fetch_error() {
        let query = PageQuery {
            cursor: Some("soon".into()),
            limit: 2,
            ..PageQuery::default()
        };
        let err = entities(3)
            .fetch_paginated_resource_listing(Section::Entities, &query)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn cursor_past_the_end_is_an_empty_last_page() {
        let query = PageQuery {
            cursor: Some(usize::MAX.to_string()),
            limit: 2,
            ..PageQuery::default()
        };
        let page = entities(3)
            .fetch_paginated_resource_listing(Section::Entities, &query)
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }
}
