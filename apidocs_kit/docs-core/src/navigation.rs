//! # Navigation State Machine
//!
//! Holds the path the docs panel is showing, the active output language and
//! whether live API keys are revealed. All mutation goes through the
//! transition methods on [`NavigationState`].

use crate::config::DocsConfig;
use crate::error::{Error, Result};
use crate::language::OutputLanguage;
use crate::preferences::{PreferenceStore, LANGUAGE_KEY, SHOW_KEYS_KEY};
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A one or two segment address: `[section]` or `[section, resource]`.
///
/// Serializes as the segment array, e.g. `["entities", "users"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct NavigationPath {
    section: Section,
    resource: Option<String>,
}

impl NavigationPath {
    pub fn root(section: Section) -> Self {
        Self {
            section,
            resource: None,
        }
    }

    pub fn detail(section: Section, resource: impl Into<String>) -> Self {
        Self {
            section,
            resource: Some(resource.into()),
        }
    }

    /// Parses `["section"]` or `["section", "resource"]`.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Result<Self> {
        match segments {
            [section] => Ok(Self::root(section.as_ref().parse()?)),
            [section, resource] => Ok(Self::detail(section.as_ref().parse()?, resource.as_ref())),
            _ => Err(Error::InvalidPath(format!(
                "expected 1 or 2 segments, got {}",
                segments.len()
            ))),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn state(&self) -> NavState {
        if self.resource.is_some() {
            NavState::Detail
        } else {
            NavState::Root
        }
    }

    pub fn segments(&self) -> Vec<String> {
        let mut segments = vec![self.section.key().to_string()];
        segments.extend(self.resource.clone());
        segments
    }
}

impl From<NavigationPath> for Vec<String> {
    fn from(path: NavigationPath) -> Self {
        path.segments()
    }
}

impl TryFrom<Vec<String>> for NavigationPath {
    type Error = Error;

    fn try_from(segments: Vec<String>) -> Result<Self> {
        NavigationPath::from_segments(segments.as_slice())
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource {
            Some(resource) => write!(f, "{}/{}", self.section, resource),
            None => write!(f, "{}", self.section),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Root,
    Detail,
}

/// Which menu the navigation column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLevel {
    /// The top-level section menu.
    Sections,
    /// The resource list of a section, with a way back to the sections.
    Resources(Section),
}

/// The content variant the panel paints for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Introduction,
    UserManagement,
    EntitiesList,
    EntityDetail,
    RpcList,
    RpcDetail,
    StorageList,
    BucketDetail,
    EdgeFunctionsList,
    EdgeFunctionDetail,
    Realtime,
}

impl ContentKind {
    /// The section segment picks the category, the resource segment picks
    /// list or detail. Sections without resources ignore the resource segment.
    pub fn for_path(path: &NavigationPath) -> Self {
        let detail = path.resource().is_some();
        match (path.section(), detail) {
            (Section::Introduction, _) => ContentKind::Introduction,
            (Section::UserManagement, _) => ContentKind::UserManagement,
            (Section::Realtime, _) => ContentKind::Realtime,
            (Section::Entities, false) => ContentKind::EntitiesList,
            (Section::Entities, true) => ContentKind::EntityDetail,
            (Section::StoredProcedures, false) => ContentKind::RpcList,
            (Section::StoredProcedures, true) => ContentKind::RpcDetail,
            (Section::Storage, false) => ContentKind::StorageList,
            (Section::Storage, true) => ContentKind::BucketDetail,
            (Section::EdgeFunctions, false) => ContentKind::EdgeFunctionsList,
            (Section::EdgeFunctions, true) => ContentKind::EdgeFunctionDetail,
        }
    }

    pub fn is_detail(self) -> bool {
        matches!(
            self,
            ContentKind::EntityDetail
                | ContentKind::RpcDetail
                | ContentKind::BucketDetail
                | ContentKind::EdgeFunctionDetail
        )
    }
}

/// The injectable navigation state container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    path: NavigationPath,
    language: OutputLanguage,
    show_api_key: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Section::default(), OutputLanguage::default())
    }
}

impl NavigationState {
    pub fn new(section: Section, language: OutputLanguage) -> Self {
        Self {
            path: NavigationPath::root(section),
            language,
            show_api_key: false,
        }
    }

    pub fn from_config(config: &DocsConfig) -> Self {
        let mut state = Self::new(config.default_section, config.default_language);
        state.show_api_key = config.show_api_keys;
        state
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn section(&self) -> Section {
        self.path.section()
    }

    pub fn language(&self) -> OutputLanguage {
        self.language
    }

    pub fn show_api_key(&self) -> bool {
        self.show_api_key
    }

    // --- Transitions ---

    /// Moves to `[section]`, dropping any selected resource.
    pub fn select_section(&mut self, section: Section) {
        tracing::debug!(from = %self.path, to = %section, "select section");
        self.path = NavigationPath::root(section);
    }

    /// Moves to `[section, resource]`.
    ///
    /// The new path replaces the old one even when `section` is not the
    /// active section. Whether `resource` exists is decided when content is
    /// rendered, not here.
    pub fn select_resource(&mut self, section: Section, resource: impl Into<String>) {
        let next = NavigationPath::detail(section, resource);
        if section != self.path.section() {
            tracing::debug!(from = %self.path, to = %next, "resource selected outside the active section");
        } else {
            tracing::debug!(from = %self.path, to = %next, "select resource");
        }
        self.path = next;
    }

    /// Returns to `[section]` of the current path.
    pub fn back(&mut self) {
        self.path = NavigationPath::root(self.path.section());
    }

    pub fn set_output_language(&mut self, language: OutputLanguage) {
        self.language = language;
    }

    pub fn set_show_api_key(&mut self, show: bool) {
        self.show_api_key = show;
    }

    pub fn toggle_api_key(&mut self) {
        self.show_api_key = !self.show_api_key;
    }

    // --- Derived views ---

    pub fn content_kind(&self) -> ContentKind {
        ContentKind::for_path(&self.path)
    }

    pub fn nav_level(&self) -> NavLevel {
        let section = self.path.section();
        if section.has_resources() {
            NavLevel::Resources(section)
        } else {
            NavLevel::Sections
        }
    }

    // --- Preferences ---

    /// Applies the stored language and key visibility, ignoring values that
    /// no longer parse.
    pub fn restore_preferences(&mut self, store: &dyn PreferenceStore) -> Result<()> {
        if let Some(language) = store.get(LANGUAGE_KEY)? {
            match language.parse() {
                Ok(language) => self.language = language,
                Err(e) => tracing::warn!("ignoring stored language preference: {}", e),
            }
        }
        if let Some(show) = store.get(SHOW_KEYS_KEY)? {
            self.show_api_key = show == "true";
        }
        Ok(())
    }

    pub fn persist_preferences(&self, store: &dyn PreferenceStore) -> Result<()> {
        store.set(LANGUAGE_KEY, self.language.key())?;
        store.set(SHOW_KEYS_KEY, if self.show_api_key { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::InMemoryPreferences;

    #[test]
    fn select_back_round_trip() {
        for section in Section::ALL {
            let mut nav = NavigationState::default();
            nav.select_section(section);
            let root = nav.path().clone();

            nav.select_resource(section, "anything");
            assert_eq!(nav.path().state(), NavState::Detail);

            nav.back();
            assert_eq!(nav.path(), &root);
            assert_eq!(nav.path().segments(), vec![section.key().to_string()]);
        }
    }

    #[test]
    fn select_section_resets_resource() {
        let mut nav = NavigationState::default();
        nav.select_resource(Section::Entities, "users");
        nav.select_section(Section::Entities);
        assert_eq!(nav.path().resource(), None);
    }

    #[test]
    fn mismatched_section_is_last_write_wins() {
        let mut nav = NavigationState::default();
        nav.select_section(Section::Entities);
        nav.select_resource(Section::Storage, "avatars");
        assert_eq!(nav.path(), &NavigationPath::detail(Section::Storage, "avatars"));
        assert_eq!(nav.content_kind(), ContentKind::BucketDetail);
    }

    #[test]
    fn setting_language_twice_is_idempotent() {
        let mut nav = NavigationState::default();
        nav.select_resource(Section::Entities, "users");

        nav.set_output_language(OutputLanguage::Bash);
        let once = nav.clone();
        nav.set_output_language(OutputLanguage::Bash);
        assert_eq!(nav, once);
        assert_eq!(nav.path(), &NavigationPath::detail(Section::Entities, "users"));
    }

    #[test]
    fn nav_level_follows_section_kind() {
        let mut nav = NavigationState::default();
        assert_eq!(nav.nav_level(), NavLevel::Sections);
        nav.select_section(Section::EdgeFunctions);
        assert_eq!(nav.nav_level(), NavLevel::Resources(Section::EdgeFunctions));
        nav.select_section(Section::Realtime);
        assert_eq!(nav.nav_level(), NavLevel::Sections);
    }

    #[test]
    fn resource_on_resourceless_section_keeps_single_variant() {
        let path = NavigationPath::detail(Section::Realtime, "ignored");
        assert_eq!(ContentKind::for_path(&path), ContentKind::Realtime);
    }

    #[test]
    fn path_serializes_as_segments() {
        let path = NavigationPath::detail(Section::Entities, "users");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["entities","users"]"#);
        let back: NavigationPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);

        assert!(serde_json::from_str::<NavigationPath>(r#"[]"#).is_err());
        assert!(serde_json::from_str::<NavigationPath>(r#"["nope"]"#).is_err());
        assert!(serde_json::from_str::<NavigationPath>(r#"["storage","a","b"]"#).is_err());
    }

    #[test]
    fn preferences_survive_a_new_state() {
        let store = InMemoryPreferences::new();
        let mut nav = NavigationState::default();
        nav.set_output_language(OutputLanguage::Bash);
        nav.toggle_api_key();
        nav.persist_preferences(&store).unwrap();

        let mut restored = NavigationState::default();
        restored.restore_preferences(&store).unwrap();
        assert_eq!(restored.language(), OutputLanguage::Bash);
        assert!(restored.show_api_key());
    }

    #[test]
    fn unparsable_language_preference_is_ignored() {
        let store = InMemoryPreferences::new();
        store.set(LANGUAGE_KEY, "cobol").unwrap();
        let mut nav = NavigationState::default();
        nav.restore_preferences(&store).unwrap();
        assert_eq!(nav.language(), OutputLanguage::Js);
    }
}
