use super::{resource_docs, section_docs, SnippetTemplate, TemplateScope};
use crate::section::Section;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// The built-in templates, populated on first use and read-only afterwards.
static BUILTIN: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::with_builtin);

pub fn builtin() -> &'static TemplateRegistry {
    &BUILTIN
}

/// Keyed storage of snippet templates. Iteration follows registration order.
#[derive(Default)]
pub struct TemplateRegistry {
    templates: Vec<Arc<dyn SnippetTemplate>>,
    index: HashMap<&'static str, usize>,
}

impl TemplateRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in section doc and resource
    /// template.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for doc in section_docs::section_docs() {
            registry.register(Arc::new(doc));
        }
        for doc in resource_docs::resource_docs() {
            registry.register(Arc::new(doc));
        }
        tracing::debug!(templates = registry.len(), "registered built-in templates");
        registry
    }

    /// Adds `template`, replacing and returning any template with the same
    /// key. A replacement keeps the position of the template it replaces.
    pub fn register(&mut self, template: Arc<dyn SnippetTemplate>) -> Option<Arc<dyn SnippetTemplate>> {
        let key = template.key();
        match self.index.get(key) {
            Some(&position) => {
                tracing::warn!(key, "replacing registered template");
                Some(std::mem::replace(&mut self.templates[position], template))
            }
            None => {
                self.index.insert(key, self.templates.len());
                self.templates.push(template);
                None
            }
        }
    }

    pub fn lookup(&self, key: &str) -> Option<&dyn SnippetTemplate> {
        self.index
            .get(key)
            .map(|&position| self.templates[position].as_ref())
    }

    /// Section-level docs of `section`, in order.
    pub fn by_category(&self, section: Section) -> Vec<&dyn SnippetTemplate> {
        self.filtered(section, TemplateScope::Section)
    }

    /// Per-resource operation templates of `section`, in order.
    pub fn resource_templates(&self, section: Section) -> Vec<&dyn SnippetTemplate> {
        self.filtered(section, TemplateScope::Resource)
    }

    fn filtered(&self, section: Section, scope: TemplateScope) -> Vec<&dyn SnippetTemplate> {
        self.templates
            .iter()
            .map(|template| template.as_ref())
            .filter(|template| template.category() == section && template.scope() == scope)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
