use serde::{Deserialize, Serialize};

/// Substituted for API keys while keys are hidden, or when none is known.
pub const HIDDEN_KEY_PLACEHOLDER: &str = "SUPABASE_KEY";

/// Live project values substituted into rendered snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    #[serde(default)]
    pub project_ref: Option<String>,
    #[serde(default)]
    pub api_key_anon: Option<String>,
    #[serde(default)]
    pub api_key_service: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl ProjectContext {
    /// The project ref, if known and non-empty.
    pub fn project_ref(&self) -> Option<&str> {
        self.project_ref.as_deref().filter(|r| !r.is_empty())
    }

    /// The anon key when `visible`, otherwise the placeholder.
    pub fn client_key(&self, visible: bool) -> &str {
        reveal(self.api_key_anon.as_deref(), visible)
    }

    /// The service-role key when `visible`, otherwise the placeholder.
    pub fn service_key(&self, visible: bool) -> &str {
        reveal(self.api_key_service.as_deref(), visible)
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}

fn reveal(key: Option<&str>, visible: bool) -> &str {
    match key {
        Some(key) if visible && !key.is_empty() => key,
        _ => HIDDEN_KEY_PLACEHOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ProjectContext {
        ProjectContext {
            project_ref: Some("abcxyz".into()),
            api_key_anon: Some("anon-key".into()),
            api_key_service: Some("service-key".into()),
            endpoint_url: Some("https://abcxyz.supabase.co/".into()),
        }
    }

    #[test]
    fn keys_are_masked_unless_visible() {
        let ctx = context();
        assert_eq!(ctx.client_key(false), HIDDEN_KEY_PLACEHOLDER);
        assert_eq!(ctx.client_key(true), "anon-key");
        assert_eq!(ctx.service_key(true), "service-key");
        assert_eq!(ProjectContext::default().client_key(true), HIDDEN_KEY_PLACEHOLDER);
    }

    #[test]
    fn endpoint_drops_trailing_slash() {
        assert_eq!(context().endpoint(), Some("https://abcxyz.supabase.co"));
    }

    #[test]
    fn deserializes_camel_case() {
        let ctx: ProjectContext =
            serde_json::from_str(r#"{"projectRef":"p1","endpointUrl":"https://p1.example"}"#).unwrap();
        assert_eq!(ctx.project_ref(), Some("p1"));
        assert_eq!(ctx.api_key_anon, None);
    }
}
