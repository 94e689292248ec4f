//! # Snippet templates
//!
//! A template documents one operation: a title, an optional markdown
//! description and code samples per [`OutputLanguage`]. Section-level docs
//! ([`SectionDoc`]) render at most one sample; per-resource operations
//! ([`ResourceDoc`]) can expand into several labelled samples.

pub mod registry;
pub mod resource_docs;
pub mod section_docs;

use crate::language::OutputLanguage;
use crate::section::Section;
use std::borrow::Cow;
use std::collections::BTreeMap;

pub use registry::{builtin, TemplateRegistry};

/// Rendered in place of a parameter the caller did not supply.
pub const MISSING_VALUE: &str = "undefined";

/// Well-known parameter keys.
pub mod keys {
    pub const RESOURCE_ID: &str = "resourceId";
    pub const ENDPOINT: &str = "endpoint";
    pub const APIKEY: &str = "apikey";
    pub const RPC_PARAMS: &str = "rpcParams";
    pub const SHOW_BEARER: &str = "showBearer";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

/// Named values a template substitutes into its samples.
///
/// Lookups never fail: a missing text renders as [`MISSING_VALUE`] and a
/// missing list is empty, so partially loaded schema data still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetParams {
    values: BTreeMap<String, ParamValue>,
}

impl SnippetParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_list(mut self, key: &str, values: Vec<String>) -> Self {
        self.insert_list(key, values);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), ParamValue::Text(value.into()));
    }

    pub fn insert_list(&mut self, key: &str, values: Vec<String>) {
        self.values.insert(key.to_string(), ParamValue::List(values));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The text value of `key`. Lists are joined with `", "`.
    pub fn text(&self, key: &str) -> Cow<'_, str> {
        match self.values.get(key) {
            Some(ParamValue::Text(value)) => Cow::Borrowed(value.as_str()),
            Some(ParamValue::List(values)) => Cow::Owned(values.join(", ")),
            None => Cow::Borrowed(MISSING_VALUE),
        }
    }

    /// The list value of `key`. A text value is a one-item list.
    pub fn list(&self, key: &str) -> &[String] {
        match self.values.get(key) {
            Some(ParamValue::List(values)) => values,
            Some(ParamValue::Text(value)) => std::slice::from_ref(value),
            None => &[],
        }
    }

    /// A boolean flag; anything but `"false"` counts as set.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(ParamValue::Text(value)) => value != "false",
            _ => default,
        }
    }
}

/// One code sample produced by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    pub key: String,
    pub title: Option<String>,
    pub source: String,
}

/// Where a template shows up in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateScope {
    /// Shown on a section's landing page.
    Section,
    /// Shown on the detail page of each resource in the section.
    Resource,
}

/// Which project key a template's samples should embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRole {
    #[default]
    Anon,
    Service,
}

/// A documented operation with per-language renderers.
pub trait SnippetTemplate: Send + Sync {
    fn key(&self) -> &'static str;
    fn category(&self) -> Section;
    fn scope(&self) -> TemplateScope;
    fn title(&self) -> &'static str;
    fn description(&self) -> Option<&'static str>;

    fn docs_url(&self) -> Option<&'static str> {
        None
    }

    fn key_role(&self) -> KeyRole {
        KeyRole::Anon
    }

    /// Renders the samples for `language`, or `None` when this template has
    /// no sample in that language.
    fn render_for(&self, language: OutputLanguage, params: &SnippetParams) -> Option<Vec<CodeSample>>;
}

pub type RenderFn = fn(&SnippetParams) -> String;

/// A section-level doc with at most one sample per language.
#[derive(Debug, Clone, Copy)]
pub struct SectionDoc {
    pub key: &'static str,
    pub category: Section,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub key_role: KeyRole,
    pub js: Option<RenderFn>,
    pub bash: Option<RenderFn>,
}

impl SnippetTemplate for SectionDoc {
    fn key(&self) -> &'static str {
        self.key
    }

    fn category(&self) -> Section {
        self.category
    }

    fn scope(&self) -> TemplateScope {
        TemplateScope::Section
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn description(&self) -> Option<&'static str> {
        self.description
    }

    fn key_role(&self) -> KeyRole {
        self.key_role
    }

    fn render_for(&self, language: OutputLanguage, params: &SnippetParams) -> Option<Vec<CodeSample>> {
        let render = match language {
            OutputLanguage::Js => self.js,
            OutputLanguage::Bash => self.bash,
        }?;
        Some(vec![CodeSample {
            key: self.key.to_string(),
            title: None,
            source: render(params),
        }])
    }
}

/// One labelled variant of a resource operation, in every language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSample {
    pub key: &'static str,
    pub title: Option<&'static str>,
    pub js: String,
    pub bash: String,
}

/// A per-resource operation, e.g. "Read rows" for a table.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDoc {
    pub key: &'static str,
    pub category: Section,
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub docs_url: &'static str,
    pub code: fn(&SnippetParams) -> Vec<OperationSample>,
}

impl SnippetTemplate for ResourceDoc {
    fn key(&self) -> &'static str {
        self.key
    }

    fn category(&self) -> Section {
        self.category
    }

    fn scope(&self) -> TemplateScope {
        TemplateScope::Resource
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn description(&self) -> Option<&'static str> {
        self.description
    }

    fn docs_url(&self) -> Option<&'static str> {
        Some(self.docs_url)
    }

    fn render_for(&self, language: OutputLanguage, params: &SnippetParams) -> Option<Vec<CodeSample>> {
        let samples = (self.code)(params)
            .into_iter()
            .map(|sample| CodeSample {
                key: sample.key.to_string(),
                title: sample.title.map(String::from),
                source: match language {
                    OutputLanguage::Js => sample.js,
                    OutputLanguage::Bash => sample.bash,
                },
            })
            .collect();
        Some(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_render_leniently() {
        let params = SnippetParams::new().with(keys::ENDPOINT, "https://x.supabase.co");
        assert_eq!(params.text(keys::ENDPOINT), "https://x.supabase.co");
        assert_eq!(params.text(keys::APIKEY), MISSING_VALUE);
        assert!(params.list(keys::RPC_PARAMS).is_empty());
        assert!(params.flag(keys::SHOW_BEARER, true));
    }

    #[test]
    fn list_and_text_views_convert() {
        let params = SnippetParams::new()
            .with_list(keys::RPC_PARAMS, vec!["a".into(), "b".into()])
            .with(keys::RESOURCE_ID, "users")
            .with(keys::SHOW_BEARER, "false");
        assert_eq!(params.text(keys::RPC_PARAMS), "a, b");
        assert_eq!(params.list(keys::RESOURCE_ID), ["users".to_string()]);
        assert!(!params.flag(keys::SHOW_BEARER, true));
    }
}
