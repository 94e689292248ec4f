use crate::catalog::{CatalogSnapshot, ResourceCatalogEntry, SchemaDetail};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One page request of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Opaque cursor returned with the previous page; `None` for the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<ResourceCatalogEntry>,
    /// `None` when this is the last page.
    pub next_cursor: Option<String>,
}

/// Where catalog data comes from. Implementations own transport concerns
/// such as timeouts and retries.
pub trait CatalogSource: Send + Sync {
    fn fetch_resource_listing<'a>(
        &'a self,
        category: Section,
        project_ref: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ResourceCatalogEntry>>>;

    fn fetch_paginated_resource_listing<'a>(
        &'a self,
        category: Section,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<Page>>;

    /// Schema detail of one resource; `Ok(None)` when the backend has none.
    fn fetch_schema_detail<'a>(&'a self, resource: &'a str) -> BoxFuture<'a, Result<Option<SchemaDetail>>>;

    fn resolve_project_context(&self) -> BoxFuture<'_, Result<ProjectContext>>;
}

/// Re-fetches the listing of `section` into `snapshot`. Returns false and
/// records the error when the fetch fails.
pub async fn refresh_section(
    source: &dyn CatalogSource,
    snapshot: &mut CatalogSnapshot,
    section: Section,
    project_ref: Option<&str>,
) -> bool {
    match source.fetch_resource_listing(section, project_ref).await {
        Ok(entries) => {
            tracing::debug!(%section, count = entries.len(), "loaded listing");
            snapshot.insert(section, entries);
            true
        }
        Err(e) => {
            tracing::warn!(%section, "failed to load listing: {}", e);
            snapshot.record_failure(section, e.to_string());
            false
        }
    }
}

/// Fetches the listing of every section that has resources.
///
/// A failed section is logged and recorded in the snapshot as a load error.
pub async fn load_snapshot(source: &dyn CatalogSource, project_ref: Option<&str>) -> CatalogSnapshot {
    let mut snapshot = CatalogSnapshot::new();
    for section in Section::ALL.into_iter().filter(|section| section.has_resources()) {
        refresh_section(source, &mut snapshot, section, project_ref).await;
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first entities listing, then serves `users`.
    #[derive(Default)]
    struct FlakySource {
        calls: AtomicUsize,
    }

    impl CatalogSource for FlakySource {
        fn fetch_resource_listing<'a>(
            &'a self,
            category: Section,
            _project_ref: Option<&'a str>,
        ) -> BoxFuture<'a, Result<Vec<ResourceCatalogEntry>>> {
            Box::pin(async move {
                if category != Section::Entities {
                    return Ok(Vec::new());
                }
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    return Err(Error::Fetch("boom".to_string()));
                }
                Ok(vec![ResourceCatalogEntry::new("users", category)])
            })
        }

        fn fetch_paginated_resource_listing<'a>(
            &'a self,
            _category: Section,
            _query: &'a PageQuery,
        ) -> BoxFuture<'a, Result<Page>> {
            Box::pin(async move { Ok(Page::default()) })
        }

        fn fetch_schema_detail<'a>(&'a self, _resource: &'a str) -> BoxFuture<'a, Result<Option<SchemaDetail>>> {
            Box::pin(async move { Ok(None) })
        }

        fn resolve_project_context(&self) -> BoxFuture<'_, Result<ProjectContext>> {
            Box::pin(async move { Ok(ProjectContext::default()) })
        }
    }

    #[tokio::test]
    async fn failed_listing_is_recorded_and_retried() {
        let source = FlakySource::default();
        let mut snapshot = load_snapshot(&source, None).await;
        assert_eq!(snapshot.load_error(Section::Entities), Some("Fetch Error: boom"));
        assert!(snapshot.entries(Section::Entities).is_empty());
        assert_eq!(snapshot.load_error(Section::Storage), None);

        assert!(refresh_section(&source, &mut snapshot, Section::Entities, None).await);
        assert_eq!(snapshot.load_error(Section::Entities), None);
        assert!(snapshot.contains(Section::Entities, "users"));
    }
}
