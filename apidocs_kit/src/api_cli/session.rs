use crate::api_cli::commands::ReplCommand;
use crate::api_cli::display;
use crate::api_cli::error::{Error, Result};
use docs_core::{
    get_active_content, load_snapshot, refresh_section, CatalogSnapshot, CatalogSource, ContentVariant, DocsConfig,
    NavigationState, OutputLanguage, PreferenceStore, ProjectContext, ResourcePicker, SchemaDetail, Section,
};
use std::time::Instant;

/// Everything one browsing session needs: the catalog source, the fetched
/// snapshot and the navigation and picker state driven by REPL commands.
pub struct DocsSession {
    source: Box<dyn CatalogSource>,
    config: DocsConfig,
    context: ProjectContext,
    catalog: CatalogSnapshot,
    nav: NavigationState,
    picker: ResourcePicker,
    schema: Option<SchemaDetail>,
    preferences: Box<dyn PreferenceStore>,
}

impl DocsSession {
    /// Resolves the project context and loads every section listing.
    ///
    /// Fetch failures leave the affected data empty; the session still starts.
    pub async fn connect(
        source: Box<dyn CatalogSource>,
        config: DocsConfig,
        preferences: Box<dyn PreferenceStore>,
    ) -> Result<Self> {
        let mut context = match source.resolve_project_context().await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!("could not resolve project context: {}", e);
                ProjectContext::default()
            }
        };
        if context.project_ref().is_none() {
            context.project_ref = config.project_ref.clone();
        }

        let catalog = load_snapshot(source.as_ref(), context.project_ref()).await;

        let mut nav = NavigationState::from_config(&config);
        nav.restore_preferences(preferences.as_ref())?;
        let picker = ResourcePicker::from_config(nav.section(), &config);

        tracing::info!(project_ref = ?context.project_ref(), "session ready");
        Ok(Self {
            source,
            config,
            context,
            catalog,
            nav,
            picker,
            schema: None,
            preferences,
        })
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn picker(&self) -> &ResourcePicker {
        &self.picker
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    pub fn content(&self) -> ContentVariant {
        get_active_content(&self.nav, &self.context, &self.catalog, self.schema.as_ref())
    }

    /// Resource names of the active section, for completion.
    pub fn resource_names(&self) -> Vec<String> {
        self.catalog.names(self.nav.section()).map(String::from).collect()
    }

    /// Names currently listed by the picker, for completion.
    pub fn picker_names(&self) -> Vec<String> {
        if !self.picker.is_open() {
            return Vec::new();
        }
        self.picker.items().iter().map(|entry| entry.name.clone()).collect()
    }

    /// Applies the output language and key visibility given on the command
    /// line, after stored preferences.
    pub fn apply_overrides(&mut self, language: Option<OutputLanguage>, show_keys: bool) -> Result<()> {
        if let Some(language) = language {
            self.nav.set_output_language(language);
        }
        if show_keys {
            self.nav.set_show_api_key(true);
        }
        Ok(self.nav.persist_preferences(self.preferences.as_ref())?)
    }

    /// Navigates to `[section]` or `[section, resource]` and renders it.
    ///
    /// Entering a section re-fetches its listing, as does opening a resource
    /// of a section whose last fetch failed.
    pub async fn render_path(&mut self, section: Section, resource: Option<&str>) -> String {
        let entering = resource.is_none() || section != self.nav.section();
        if section.has_resources() && (entering || self.catalog.load_error(section).is_some()) {
            self.refresh_listing(section).await;
        }
        match resource {
            Some(resource) => self.nav.select_resource(section, resource),
            None => self.nav.select_section(section),
        }
        self.picker.set_category(section);
        self.refresh_schema().await;
        display::content(&self.content())
    }

    /// Runs one REPL command and returns what to print.
    pub async fn execute(&mut self, command: ReplCommand) -> Result<String> {
        match command {
            ReplCommand::Sections => Ok(display::sections(&self.nav)),
            ReplCommand::Go { section } => {
                let section: Section = section.parse()?;
                Ok(self.render_path(section, None).await)
            }
            ReplCommand::Open { resource } => {
                let section = self.nav.section();
                if !section.has_resources() {
                    return Err(Error::Usage(format!("{} has no resources to open", section)));
                }
                Ok(self.render_path(section, Some(&resource)).await)
            }
            ReplCommand::Back => {
                self.nav.back();
                self.schema = None;
                Ok(display::content(&self.content()))
            }
            ReplCommand::Lang { language } => {
                let language: OutputLanguage = language.parse()?;
                self.nav.set_output_language(language);
                self.nav.persist_preferences(self.preferences.as_ref())?;
                Ok(format!("Code samples now in {}", language.label()))
            }
            ReplCommand::Keys { visibility } => {
                self.nav.set_show_api_key(visibility == "show");
                self.nav.persist_preferences(self.preferences.as_ref())?;
                let state = if self.nav.show_api_key() { "shown" } else { "hidden" };
                Ok(format!("API keys {}", state))
            }
            ReplCommand::Search { query } => self.search(query.join(" ")).await,
            ReplCommand::More => {
                if !self.picker.is_open() {
                    return Err(Error::Usage("no active search, run `search` first".to_string()));
                }
                if !self.picker.load_next_page(self.source.as_ref(), true).await {
                    return Ok("No more results".to_string());
                }
                Ok(display::picker(&self.picker))
            }
            ReplCommand::Pick { name } => {
                if !self.picker.is_open() {
                    return Err(Error::Usage("no active search, run `search` first".to_string()));
                }
                if !self.picker.items().iter().any(|entry| entry.name == name) {
                    return Err(Error::Usage(format!("'{}' is not in the search results", name)));
                }
                self.picker.select(&name, &mut self.nav);
                self.refresh_schema().await;
                Ok(display::content(&self.content()))
            }
            ReplCommand::Show => Ok(display::content(&self.content())),
            ReplCommand::Refresh => {
                let section = self.nav.section();
                if !section.has_resources() {
                    return Err(Error::Usage(format!("{} has no resources to refresh", section)));
                }
                self.refresh_listing(section).await;
                self.refresh_schema().await;
                Ok(display::content(&self.content()))
            }
            ReplCommand::Path => Ok(self.nav.path().to_string()),
        }
    }

    /// Opens the picker on the active section, waits out the debounce
    /// interval and loads the first page.
    async fn search(&mut self, query: String) -> Result<String> {
        let section = self.nav.section();
        if !section.has_resources() {
            return Err(Error::Usage(format!("{} has no resources to search", section)));
        }
        self.picker.set_category(section);
        self.picker.open();
        self.picker.set_raw_query(query, Instant::now());

        tokio::time::sleep(self.config.debounce()).await;
        self.picker.poll(Instant::now());
        if self.picker.needs_first_page() {
            self.picker.load_first_page(self.source.as_ref()).await;
        }
        Ok(display::picker(&self.picker))
    }

    async fn refresh_listing(&mut self, section: Section) {
        refresh_section(self.source.as_ref(), &mut self.catalog, section, self.context.project_ref()).await;
    }

    /// Fetches the schema detail of the selected resource. Failures are
    /// logged and leave the detail empty.
    async fn refresh_schema(&mut self) {
        self.schema = None;
        let Some(resource) = self.nav.path().resource() else {
            return;
        };
        if !matches!(self.nav.section(), Section::Entities | Section::StoredProcedures) {
            return;
        }
        match self.source.fetch_schema_detail(resource).await {
            Ok(detail) => self.schema = detail,
            Err(e) => tracing::warn!(resource, "could not load schema detail: {}", e),
        }
    }
}
