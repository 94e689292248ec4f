//! # Snippet Renderer
//!
//! Turns a template plus parameters into display-ready samples. Rendering is
//! a pure function of its inputs and never fails: unsupported languages get
//! a placeholder sample and missing parameters render as `undefined`.

use crate::language::OutputLanguage;
use crate::template::{SnippetParams, SnippetTemplate};
use serde::Serialize;

/// Token replaced by the project ref in sources and descriptions.
pub const PROJECT_REF_TOKEN: &str = "[ref]";
/// Substituted for [`PROJECT_REF_TOKEN`] when the ref is unknown.
pub const PROJECT_REF_FALLBACK: &str = "_";
pub const NO_EXAMPLE: &str = "No example for this language";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSnippet {
    pub key: String,
    pub title: Option<String>,
    pub language: OutputLanguage,
    pub source: String,
    /// Set when the template has no sample for `language`.
    pub is_placeholder: bool,
}

/// A template rendered with its metadata, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDoc {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub docs_url: Option<String>,
    pub snippets: Vec<RenderedSnippet>,
}

/// Replaces every `[ref]` in `text` with `project_ref`, or with `_` when the
/// ref is unknown.
pub fn substitute_project_ref(text: &str, project_ref: Option<&str>) -> String {
    let replacement = project_ref
        .filter(|r| !r.is_empty())
        .unwrap_or(PROJECT_REF_FALLBACK);
    text.replace(PROJECT_REF_TOKEN, replacement)
}

pub fn render(
    template: &dyn SnippetTemplate,
    language: OutputLanguage,
    params: &SnippetParams,
    project_ref: Option<&str>,
) -> Vec<RenderedSnippet> {
    match template.render_for(language, params) {
        Some(samples) => samples
            .into_iter()
            .map(|sample| RenderedSnippet {
                key: sample.key,
                title: sample.title,
                language,
                source: substitute_project_ref(&sample.source, project_ref),
                is_placeholder: false,
            })
            .collect(),
        None => {
            tracing::trace!(template = template.key(), %language, "no sample for language");
            vec![RenderedSnippet {
                key: template.key().to_string(),
                title: None,
                language,
                source: NO_EXAMPLE.to_string(),
                is_placeholder: true,
            }]
        }
    }
}

/// Renders `template` along with its title, description and docs link.
pub fn render_doc(
    template: &dyn SnippetTemplate,
    language: OutputLanguage,
    params: &SnippetParams,
    project_ref: Option<&str>,
) -> RenderedDoc {
    RenderedDoc {
        key: template.key().to_string(),
        title: template.title().to_string(),
        description: template
            .description()
            .map(|description| substitute_project_ref(description, project_ref)),
        docs_url: template.docs_url().map(String::from),
        snippets: render(template, language, params, project_ref),
    }
}

impl RenderedDoc {
    /// Whether every snippet is a placeholder, i.e. the doc is prose only.
    pub fn is_prose_only(&self) -> bool {
        self.snippets.iter().all(|snippet| snippet.is_placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;
    use crate::template::{builtin, keys, resource_docs};

    fn params() -> SnippetParams {
        SnippetParams::new()
            .with(keys::RESOURCE_ID, "users")
            .with(keys::ENDPOINT, "https://abcxyz.supabase.co")
            .with(keys::APIKEY, "SUPABASE_KEY")
    }

    #[test]
    fn read_rows_for_users_with_known_ref() {
        let template = builtin().lookup(resource_docs::READ_ROWS).unwrap();
        let snippets = render(template, OutputLanguage::Js, &params(), Some("abcxyz"));
        assert_eq!(snippets.len(), 4);
        for snippet in &snippets {
            assert!(snippet.source.contains(".from('users')"));
            assert!(snippet.source.contains(".select("));
            assert!(!snippet.source.contains(PROJECT_REF_TOKEN));
        }
    }

    #[test]
    fn snippet_count_matches_variants_or_one_placeholder() {
        for section in Section::ALL {
            let registry = builtin();
            let templates = registry
                .by_category(section)
                .into_iter()
                .chain(registry.resource_templates(section));
            for template in templates {
                for language in OutputLanguage::ALL {
                    let snippets = render(template, language, &params(), None);
                    match template.render_for(language, &params()) {
                        Some(samples) => {
                            assert_eq!(snippets.len(), samples.len());
                            assert!(snippets.iter().all(|s| !s.is_placeholder));
                        }
                        None => {
                            assert_eq!(snippets.len(), 1);
                            assert!(snippets[0].is_placeholder);
                            assert_eq!(snippets[0].source, NO_EXAMPLE);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unknown_ref_falls_back_in_source_and_description() {
        let template = builtin().lookup("deploy-edge-function").unwrap();
        let doc = render_doc(template, OutputLanguage::Bash, &params(), None);
        assert_eq!(
            doc.snippets[0].source,
            "supabase functions deploy hello-world --project-ref _"
        );

        let pre_req = builtin().lookup("edge-function-pre-req").unwrap();
        let doc = render_doc(pre_req, OutputLanguage::Js, &params(), Some(""));
        assert!(doc.is_prose_only());
        let description = doc.description.as_deref().unwrap();
        assert!(description.contains("supabase link --project-ref _"));
    }

    #[test]
    fn every_ref_occurrence_is_replaced() {
        assert_eq!(
            substitute_project_ref("/project/[ref]/a and /project/[ref]/b", Some("abcxyz")),
            "/project/abcxyz/a and /project/abcxyz/b"
        );
    }
}
