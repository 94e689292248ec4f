use crate::error::Result;
use crate::language::OutputLanguage;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Runtime settings for the docs panel, read from a TOML file.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Base URL of the catalog service.
    pub api_url: Option<String>,
    pub project_ref: Option<String>,
    /// Quiet interval before a picker search is sent.
    pub debounce_ms: u64,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub default_section: Section,
    pub default_language: OutputLanguage,
    pub show_api_keys: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            project_ref: None,
            debounce_ms: 400,
            page_size: 20,
            request_timeout_secs: 30,
            default_section: Section::Introduction,
            default_language: OutputLanguage::Js,
            show_api_keys: false,
        }
    }
}

impl DocsConfig {
    /// Loads the config at `path`, falling back to the defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocsConfig::load(&dir.path().join("apidocs.toml")).unwrap();
        assert_eq!(config, DocsConfig::default());
        assert_eq!(config.debounce(), Duration::from_millis(400));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "project_ref = \"abcxyz\"\ndefault_section = \"storage\"\ndefault_language = \"bash\"\ndebounce_ms = 150"
        )
        .unwrap();

        let config = DocsConfig::load(file.path()).unwrap();
        assert_eq!(config.project_ref.as_deref(), Some("abcxyz"));
        assert_eq!(config.default_section, Section::Storage);
        assert_eq!(config.default_language, OutputLanguage::Bash);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.page_size, 20);
        assert!(!config.show_api_keys);
    }

    #[test]
    fn invalid_section_is_an_error() {
        assert!(DocsConfig::from_toml_str("default_section = \"tables\"").is_err());
    }
}
