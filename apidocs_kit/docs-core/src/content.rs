//! # Section Content Renderer
//!
//! Maps the active [`NavigationState`] to exactly one [`ContentVariant`].
//! The section picks the category and the resource segment picks list or
//! detail. A detail page whose resource is not in the current catalog
//! snapshot renders as empty content.

use crate::catalog::{CatalogSnapshot, ResourceCatalogEntry, SchemaDetail};
use crate::context::ProjectContext;
use crate::navigation::{ContentKind, NavigationState};
use crate::renderer::{render_doc, RenderedDoc};
use crate::section::{ResourceKind, Section};
use crate::template::resource_docs::shown_for_bucket;
use crate::template::{builtin, keys, KeyRole, SnippetParams, SnippetTemplate, TemplateRegistry};
use serde::Serialize;

/// A section landing page: its docs plus the section's resource listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionPage {
    pub section: Section,
    pub title: &'static str,
    pub docs: Vec<RenderedDoc>,
    pub resources: Vec<ResourceCatalogEntry>,
    /// Set when the last fetch of this section's listing failed.
    pub load_error: Option<String>,
}

/// The detail page of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePage {
    pub kind: ResourceKind,
    pub entry: ResourceCatalogEntry,
    pub schema: Option<SchemaDetail>,
    pub docs: Vec<RenderedDoc>,
}

/// A detail variant's payload. `page` is `None` when the selected resource
/// is not in the catalog; `load_error` says whether that is because the
/// section's listing failed to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailPage {
    pub page: Option<ResourcePage>,
    pub load_error: Option<String>,
}

/// What the content panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "page", rename_all = "kebab-case")]
pub enum ContentVariant {
    Introduction(SectionPage),
    UserManagement(SectionPage),
    EntitiesList(SectionPage),
    EntityDetail(DetailPage),
    RpcList(SectionPage),
    RpcDetail(DetailPage),
    StorageList(SectionPage),
    BucketDetail(DetailPage),
    EdgeFunctionsList(SectionPage),
    EdgeFunctionDetail(DetailPage),
    Realtime(SectionPage),
}

impl ContentVariant {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentVariant::Introduction(_) => ContentKind::Introduction,
            ContentVariant::UserManagement(_) => ContentKind::UserManagement,
            ContentVariant::EntitiesList(_) => ContentKind::EntitiesList,
            ContentVariant::EntityDetail(_) => ContentKind::EntityDetail,
            ContentVariant::RpcList(_) => ContentKind::RpcList,
            ContentVariant::RpcDetail(_) => ContentKind::RpcDetail,
            ContentVariant::StorageList(_) => ContentKind::StorageList,
            ContentVariant::BucketDetail(_) => ContentKind::BucketDetail,
            ContentVariant::EdgeFunctionsList(_) => ContentKind::EdgeFunctionsList,
            ContentVariant::EdgeFunctionDetail(_) => ContentKind::EdgeFunctionDetail,
            ContentVariant::Realtime(_) => ContentKind::Realtime,
        }
    }

    pub fn section_page(&self) -> Option<&SectionPage> {
        match self {
            ContentVariant::Introduction(page)
            | ContentVariant::UserManagement(page)
            | ContentVariant::EntitiesList(page)
            | ContentVariant::RpcList(page)
            | ContentVariant::StorageList(page)
            | ContentVariant::EdgeFunctionsList(page)
            | ContentVariant::Realtime(page) => Some(page),
            _ => None,
        }
    }

    pub fn resource_page(&self) -> Option<&ResourcePage> {
        match self {
            ContentVariant::EntityDetail(page)
            | ContentVariant::RpcDetail(page)
            | ContentVariant::BucketDetail(page)
            | ContentVariant::EdgeFunctionDetail(page) => page.page.as_ref(),
            _ => None,
        }
    }

    /// The failed listing fetch behind this content, if any.
    pub fn load_error(&self) -> Option<&str> {
        match self {
            ContentVariant::EntityDetail(detail)
            | ContentVariant::RpcDetail(detail)
            | ContentVariant::BucketDetail(detail)
            | ContentVariant::EdgeFunctionDetail(detail) => detail.load_error.as_deref(),
            other => other.section_page().and_then(|page| page.load_error.as_deref()),
        }
    }

    /// True for a detail variant whose resource was not found.
    pub fn is_empty(&self) -> bool {
        self.kind().is_detail() && self.resource_page().is_none()
    }
}

/// Renders content against a template registry.
pub struct ContentRenderer<'a> {
    registry: &'a TemplateRegistry,
}

impl Default for ContentRenderer<'static> {
    fn default() -> Self {
        Self::new(builtin())
    }
}

impl<'a> ContentRenderer<'a> {
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self { registry }
    }

    /// The content for the current path. `detail` is the schema detail of
    /// the selected resource, when the host has fetched it.
    pub fn get_active_content(
        &self,
        nav: &NavigationState,
        ctx: &ProjectContext,
        catalog: &CatalogSnapshot,
        detail: Option<&SchemaDetail>,
    ) -> ContentVariant {
        let section = nav.section();
        let kind = nav.content_kind();

        if !kind.is_detail() {
            let page = self.section_page(section, nav, ctx, catalog);
            return match kind {
                ContentKind::Introduction => ContentVariant::Introduction(page),
                ContentKind::UserManagement => ContentVariant::UserManagement(page),
                ContentKind::EntitiesList => ContentVariant::EntitiesList(page),
                ContentKind::RpcList => ContentVariant::RpcList(page),
                ContentKind::StorageList => ContentVariant::StorageList(page),
                ContentKind::EdgeFunctionsList => ContentVariant::EdgeFunctionsList(page),
                _ => ContentVariant::Realtime(page),
            };
        }

        let page = nav
            .path()
            .resource()
            .and_then(|name| self.resource_page(section, name, nav, ctx, catalog, detail));
        let detail_page = DetailPage {
            page,
            load_error: catalog.load_error(section).map(String::from),
        };
        match kind {
            ContentKind::EntityDetail => ContentVariant::EntityDetail(detail_page),
            ContentKind::RpcDetail => ContentVariant::RpcDetail(detail_page),
            ContentKind::BucketDetail => ContentVariant::BucketDetail(detail_page),
            _ => ContentVariant::EdgeFunctionDetail(detail_page),
        }
    }

    fn section_page(
        &self,
        section: Section,
        nav: &NavigationState,
        ctx: &ProjectContext,
        catalog: &CatalogSnapshot,
    ) -> SectionPage {
        let base = base_params(ctx);
        let docs = self
            .registry
            .by_category(section)
            .into_iter()
            .map(|template| {
                let params = with_api_key(base.clone(), template, ctx, nav.show_api_key());
                render_doc(template, nav.language(), &params, ctx.project_ref())
            })
            .collect();

        SectionPage {
            section,
            title: section.menu_name(),
            docs,
            resources: catalog.entries(section).to_vec(),
            load_error: catalog.load_error(section).map(String::from),
        }
    }

    fn resource_page(
        &self,
        section: Section,
        name: &str,
        nav: &NavigationState,
        ctx: &ProjectContext,
        catalog: &CatalogSnapshot,
        detail: Option<&SchemaDetail>,
    ) -> Option<ResourcePage> {
        let kind = section.resource_kind()?;
        let Some(entry) = catalog.find(section, name) else {
            tracing::debug!(%section, resource = name, "resource not in catalog, rendering nothing");
            return None;
        };

        let mut base = base_params(ctx);
        base.insert(keys::RESOURCE_ID, entry.name.as_str());
        if kind == ResourceKind::Rpc {
            base.insert_list(keys::RPC_PARAMS, rpc_params(entry, detail));
        }

        let docs = self
            .registry
            .resource_templates(section)
            .into_iter()
            .filter(|template| kind != ResourceKind::Bucket || shown_for_bucket(template.key(), entry.is_public()))
            .map(|template| {
                let params = with_api_key(base.clone(), template, ctx, nav.show_api_key());
                render_doc(template, nav.language(), &params, ctx.project_ref())
            })
            .collect();

        Some(ResourcePage {
            kind,
            entry: entry.clone(),
            schema: detail.cloned(),
            docs,
        })
    }
}

/// Renders the active content with the built-in templates.
pub fn get_active_content(
    nav: &NavigationState,
    ctx: &ProjectContext,
    catalog: &CatalogSnapshot,
    detail: Option<&SchemaDetail>,
) -> ContentVariant {
    ContentRenderer::default().get_active_content(nav, ctx, catalog, detail)
}

fn base_params(ctx: &ProjectContext) -> SnippetParams {
    let mut params = SnippetParams::new();
    if let Some(endpoint) = ctx.endpoint() {
        params.insert(keys::ENDPOINT, endpoint);
    }
    params
}

fn with_api_key(
    mut params: SnippetParams,
    template: &dyn SnippetTemplate,
    ctx: &ProjectContext,
    show: bool,
) -> SnippetParams {
    let key = match template.key_role() {
        KeyRole::Service => ctx.service_key(show),
        KeyRole::Anon => ctx.client_key(show),
    };
    params.insert(keys::APIKEY, key);
    params
}

/// Schema parameters win over the names carried by the listing entry.
fn rpc_params(entry: &ResourceCatalogEntry, detail: Option<&SchemaDetail>) -> Vec<String> {
    match detail {
        Some(detail) if !detail.parameters.is_empty() => {
            detail.parameters.iter().map(|p| p.name.clone()).collect()
        }
        _ => entry.rpc_param_names(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalize, ParameterDetail};
    use crate::context::HIDDEN_KEY_PLACEHOLDER;
    use crate::language::OutputLanguage;
    use crate::template::resource_docs::{CREATE_SIGNED_URL, RETRIEVE_PUBLIC_URL};
    use serde_json::json;

    fn ctx() -> ProjectContext {
        ProjectContext {
            project_ref: Some("abcxyz".into()),
            api_key_anon: Some("anon-live".into()),
            api_key_service: Some("service-live".into()),
            endpoint_url: Some("https://abcxyz.supabase.co/".into()),
        }
    }

    fn catalog() -> CatalogSnapshot {
        let mut snapshot = CatalogSnapshot::new();
        snapshot.insert(Section::Entities, normalize(Some(&json!(["users", "posts"])), Section::Entities));
        snapshot.insert(
            Section::Storage,
            normalize(
                Some(&json!([{"name": "avatars", "public": true}, {"name": "invoices", "public": false}])),
                Section::Storage,
            ),
        );
        snapshot.insert(
            Section::StoredProcedures,
            normalize(Some(&json!([{"name": "add", "params": ["a", "b"]}])), Section::StoredProcedures),
        );
        snapshot
    }

    fn doc_keys(variant: &ContentVariant) -> Vec<String> {
        variant
            .resource_page()
            .map(|page| page.docs.iter().map(|doc| doc.key.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn stale_resource_renders_empty() {
        let mut nav = NavigationState::default();
        nav.select_resource(Section::Entities, "dropped_table");
        let content = get_active_content(&nav, &ctx(), &catalog(), None);
        assert_eq!(content, ContentVariant::EntityDetail(DetailPage::default()));
        assert!(content.is_empty());
        assert_eq!(content.load_error(), None);
    }

    #[test]
    fn every_path_maps_to_its_variant() {
        let catalog = catalog();
        for section in Section::ALL {
            let mut nav = NavigationState::default();
            nav.select_section(section);
            let content = get_active_content(&nav, &ctx(), &catalog, None);
            assert_eq!(content.kind(), nav.content_kind());
            assert!(!content.is_empty());
            assert!(content.section_page().is_some());
        }
    }

    #[test]
    fn entity_detail_renders_read_rows() {
        let mut nav = NavigationState::default();
        nav.select_resource(Section::Entities, "users");
        let content = get_active_content(&nav, &ctx(), &catalog(), None);
        let page = content.resource_page().unwrap();

        assert_eq!(page.kind, ResourceKind::Entity);
        let read_rows = &page.docs[0];
        assert_eq!(read_rows.key, "read-rows");
        assert!(read_rows.snippets[0].source.contains(".from('users')"));
    }

    #[test]
    fn bucket_menu_filtered_by_visibility() {
        let mut nav = NavigationState::default();

        nav.select_resource(Section::Storage, "avatars");
        let public = doc_keys(&get_active_content(&nav, &ctx(), &catalog(), None));
        assert!(public.iter().any(|k| k == RETRIEVE_PUBLIC_URL));
        assert!(!public.iter().any(|k| k == CREATE_SIGNED_URL));

        nav.select_resource(Section::Storage, "invoices");
        let private = doc_keys(&get_active_content(&nav, &ctx(), &catalog(), None));
        assert!(private.iter().any(|k| k == CREATE_SIGNED_URL));
        assert!(!private.iter().any(|k| k == RETRIEVE_PUBLIC_URL));
    }

    #[test]
    fn keys_hidden_until_revealed() {
        let mut nav = NavigationState::default();
        nav.set_output_language(OutputLanguage::Bash);
        nav.select_section(Section::Introduction);

        let hidden = get_active_content(&nav, &ctx(), &catalog(), None);
        let docs = &hidden.section_page().unwrap().docs;
        assert_eq!(docs[1].snippets[0].source, HIDDEN_KEY_PLACEHOLDER);
        assert_eq!(docs[2].snippets[0].source, HIDDEN_KEY_PLACEHOLDER);

        nav.toggle_api_key();
        let shown = get_active_content(&nav, &ctx(), &catalog(), None);
        let docs = &shown.section_page().unwrap().docs;
        assert_eq!(docs[1].snippets[0].source, "anon-live");
        assert_eq!(docs[2].snippets[0].source, "service-live");
    }

    #[test]
    fn rpc_params_prefer_schema_detail() {
        let mut nav = NavigationState::default();
        nav.set_output_language(OutputLanguage::Bash);
        nav.select_resource(Section::StoredProcedures, "add");

        let from_listing = get_active_content(&nav, &ctx(), &catalog(), None);
        let source = &from_listing.resource_page().unwrap().docs[0].snippets[0].source;
        assert!(source.contains("\"a\": \"value\", \"b\": \"value\""));
        assert!(source.contains("'https://abcxyz.supabase.co/rest/v1/rpc/add'"));

        let detail = SchemaDetail {
            parameters: vec![ParameterDetail {
                name: "x".into(),
                format: Some("int4".into()),
            }],
            ..SchemaDetail::default()
        };
        let from_schema = get_active_content(&nav, &ctx(), &catalog(), Some(&detail));
        let page = from_schema.resource_page().unwrap();
        assert!(page.docs[0].snippets[0].source.contains("-d '{ \"x\": \"value\" }'"));
        assert_eq!(page.schema.as_ref(), Some(&detail));
    }

    #[test]
    fn missing_endpoint_renders_undefined() {
        let mut nav = NavigationState::default();
        nav.set_output_language(OutputLanguage::Bash);
        nav.select_resource(Section::Entities, "users");
        let content = get_active_content(&nav, &ProjectContext::default(), &catalog(), None);
        let source = &content.resource_page().unwrap().docs[0].snippets[0].source;
        assert!(source.starts_with("curl 'undefined/rest/v1/users?select=*'"));
        assert!(source.contains(HIDDEN_KEY_PLACEHOLDER));
    }

    #[test]
    fn failed_listing_is_carried_on_the_page() {
        let mut catalog = catalog();
        catalog.record_failure(Section::Entities, "Fetch Error: boom");
        let mut nav = NavigationState::default();
        nav.select_section(Section::Entities);

        let content = get_active_content(&nav, &ctx(), &catalog, None);
        let page = content.section_page().unwrap();
        assert_eq!(page.load_error.as_deref(), Some("Fetch Error: boom"));
        assert_eq!(page.resources.len(), 2);

        nav.select_section(Section::Storage);
        let content = get_active_content(&nav, &ctx(), &catalog, None);
        assert_eq!(content.section_page().unwrap().load_error, None);
    }

    #[test]
    fn failed_listing_is_carried_on_the_detail_page() {
        let mut catalog = CatalogSnapshot::new();
        catalog.record_failure(Section::Entities, "Fetch Error: boom");
        let mut nav = NavigationState::default();
        nav.select_resource(Section::Entities, "users");

        let content = get_active_content(&nav, &ctx(), &catalog, None);
        assert!(content.is_empty());
        assert_eq!(content.load_error(), Some("Fetch Error: boom"));
    }
}
