use crate::catalog::{normalize, ResourceCatalogEntry, SchemaDetail};
use crate::config::DocsConfig;
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::section::Section;
use crate::source::{BoxFuture, CatalogSource, Page, PageQuery};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    #[serde(default)]
    items: Value,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// A [`CatalogSource`] backed by a JSON catalog service.
///
/// Routes, relative to `{base_url}/projects/{ref}`:
/// - `GET /listings/{section}`
/// - `GET /listings/{section}/page?search=..&cursor=..&limit=..`
/// - `GET /schema/{resource}` (404 means no detail)
/// - `GET /context`
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    base_url: String,
    project_ref: Option<String>,
}

impl HttpCatalogSource {
    pub fn new(base_url: &str, project_ref: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_ref: project_ref.filter(|r| !r.is_empty()),
        })
    }

    pub fn from_config(config: &DocsConfig) -> Result<Self> {
        let base_url = config
            .api_url
            .as_deref()
            .ok_or_else(|| Error::Config("api_url is required for the HTTP catalog".to_string()))?;
        Self::new(base_url, config.project_ref.clone(), config.request_timeout())
    }

    fn project_url(&self, project_ref: Option<&str>, path: &str) -> Result<String> {
        let project_ref = project_ref
            .or(self.project_ref.as_deref())
            .ok_or_else(|| Error::Config("a project ref is required".to_string()))?;
        Ok(format!("{}/projects/{}/{}", self.base_url, project_ref, path))
    }

    /// The schema route of `resource`, with the name encoded as a single path
    /// segment.
    fn schema_url(&self, resource: &str) -> Result<String> {
        let mut url = Url::parse(&self.project_url(None, "schema")?)
            .map_err(|e| Error::Config(format!("invalid catalog URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("catalog URL cannot have path segments".to_string()))?
            .push(resource);
        Ok(url.to_string())
    }

    /// GETs `url` as JSON. A 404 is `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::debug!(%url, "fetching");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Fetch(format!("GET {} failed, status: {}", url, status)));
        }
        Ok(Some(response.json().await?))
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch_resource_listing<'a>(
        &'a self,
        category: Section,
        project_ref: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ResourceCatalogEntry>>> {
        Box::pin(async move {
            let url = self.project_url(project_ref, &format!("listings/{}", category.key()))?;
            let raw: Option<Value> = self.get_json(&url).await?;
            Ok(normalize(raw.as_ref(), category))
        })
    }

    fn fetch_paginated_resource_listing<'a>(
        &'a self,
        category: Section,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<Page>> {
        Box::pin(async move {
            let params = serde_urlencoded::to_string(query)?;
            let url = self.project_url(None, &format!("listings/{}/page?{}", category.key(), params))?;
            let Some(raw) = self.get_json::<RawPage>(&url).await? else {
                return Ok(Page::default());
            };
            Ok(Page {
                items: normalize(Some(&raw.items), category),
                next_cursor: raw.next_cursor,
            })
        })
    }

    fn fetch_schema_detail<'a>(&'a self, resource: &'a str) -> BoxFuture<'a, Result<Option<SchemaDetail>>> {
        Box::pin(async move {
            let url = self.schema_url(resource)?;
            self.get_json(&url).await
        })
    }

    fn resolve_project_context(&self) -> BoxFuture<'_, Result<ProjectContext>> {
        Box::pin(async move {
            let url = self.project_url(None, "context")?;
            let mut context: ProjectContext = self.get_json(&url).await?.unwrap_or_default();
            if context.project_ref().is_none() {
                context.project_ref = self.project_ref.clone();
            }
            Ok(context)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_urls_use_configured_ref() {
        let source = HttpCatalogSource::new("http://localhost:8080/", Some("abcxyz".into()), Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.project_url(None, "listings/entities").unwrap(),
            "http://localhost:8080/projects/abcxyz/listings/entities"
        );
        assert_eq!(
            source.project_url(Some("other"), "context").unwrap(),
            "http://localhost:8080/projects/other/context"
        );
    }

    #[test]
    fn schema_route_encodes_the_resource_name() {
        let source = HttpCatalogSource::new("http://localhost:8080", Some("abcxyz".into()), Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.schema_url("users").unwrap(),
            "http://localhost:8080/projects/abcxyz/schema/users"
        );
        assert_eq!(
            source.schema_url("a b/c?d").unwrap(),
            "http://localhost:8080/projects/abcxyz/schema/a%20b%2Fc%3Fd"
        );
    }

    #[test]
    fn missing_ref_is_a_config_error() {
        let source = HttpCatalogSource::new("http://localhost:8080", Some(String::new()), Duration::from_secs(5)).unwrap();
        assert!(matches!(source.project_url(None, "context"), Err(Error::Config(_))));
    }

    #[test]
    fn from_config_requires_api_url() {
        assert!(matches!(HttpCatalogSource::from_config(&DocsConfig::default()), Err(Error::Config(_))));
    }

    #[test]
    fn page_query_encodes_only_present_fields() {
        let query = PageQuery {
            search: Some("user roles".into()),
            cursor: None,
            limit: 20,
        };
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "search=user+roles&limit=20");
    }
}
