//! API docs CLI module for apidocs_kit
//!
//! This module provides the one-shot renderer and the interactive REPL.

pub mod commands;
pub mod display;
pub mod error;
pub mod repl;
pub mod session;

// Re-export the main run functions
pub use lib::run;
pub use lib::run_with_args;

pub use error::Result;
pub use session::DocsSession;

// Internal module that contains the main lib.rs content
mod lib {
    use crate::api_cli::display;
    use crate::api_cli::error::Result;
    use crate::api_cli::session::DocsSession;
    use clap::{CommandFactory, Parser, Subcommand};
    use docs_core::{CatalogSource, DocsConfig, InMemoryPreferences, OutputLanguage, Section, StaticCatalog};
    use std::path::PathBuf;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    /// Browse a project's API reference docs from the terminal.
    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    struct Cli {
        /// The base URL of the catalog service.
        /// Can also be set via the `API_URL` environment variable.
        #[arg(short, long, global = true, env = "API_URL")]
        url: Option<String>,

        /// The project ref the docs are rendered for.
        #[arg(short, long, global = true, env = "PROJECT_REF")]
        project_ref: Option<String>,

        /// Read the catalog from a JSON snapshot instead of the service.
        #[arg(short, long, global = true)]
        snapshot: Option<PathBuf>,

        /// Path to the TOML config file. Missing files use the defaults.
        #[arg(short, long, global = true, env = "APIDOCS_CONFIG", default_value = "apidocs.toml")]
        config: PathBuf,

        /// Language of code samples: js or bash.
        #[arg(short, long, global = true)]
        lang: Option<String>,

        /// Show live API keys in code samples.
        #[arg(long, global = true)]
        show_keys: bool,

        /// If no command is provided, starts an interactive REPL session.
        #[command(subcommand)]
        command: Option<DocsCommand>,
    }

    #[derive(Subcommand, Debug)]
    enum DocsCommand {
        /// Render one page and exit, e.g. `render entities users`.
        Render { section: String, resource: Option<String> },
        /// List the documentation sections.
        Sections,
    }

    fn init_tracing() {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "apidocs_kit=info,docs_core=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }

    /// The main entry point for the `apidocs-cli` binary.
    #[tokio::main]
    pub async fn run() -> Result<()> {
        init_tracing();
        let cli = Cli::parse();
        execute(cli).await
    }

    /// Run the CLI with specific arguments.
    pub async fn run_with_args(args: Vec<String>) -> Result<()> {
        let mut full_args = vec!["apidocs-cli".to_string()];
        full_args.extend(args);

        let cli = Cli::try_parse_from(full_args)?;
        execute(cli).await
    }

    async fn execute(cli: Cli) -> Result<()> {
        // --- 1. Config, with command-line values taking precedence ---
        let mut config = DocsConfig::load(&cli.config)?;
        if cli.url.is_some() {
            config.api_url = cli.url.clone();
        }
        if cli.project_ref.is_some() {
            config.project_ref = cli.project_ref.clone();
        }
        let language: Option<OutputLanguage> = cli.lang.as_deref().map(str::parse).transpose()?;

        // --- 2. Catalog source ---
        let source: Box<dyn CatalogSource> = match (&cli.snapshot, &config.api_url) {
            (Some(path), _) => Box::new(StaticCatalog::from_path(path)?),
            (None, Some(_)) => Box::new(docs_core::HttpCatalogSource::from_config(&config)?),
            (None, None) => {
                Cli::command().print_help()?;
                eprintln!("\n\nError: Missing --snapshot <FILE>, or --url <URL> / the API_URL environment variable.");
                return Ok(());
            }
        };

        // --- 3. Session and dispatch ---
        let mut session = DocsSession::connect(source, config, Box::new(InMemoryPreferences::new())).await?;
        session.apply_overrides(language, cli.show_keys)?;

        match cli.command {
            Some(DocsCommand::Render { section, resource }) => {
                let section: Section = section.parse()?;
                println!("{}", session.render_path(section, resource.as_deref()).await);
            }
            Some(DocsCommand::Sections) => {
                println!("{}", display::sections(session.nav()));
            }
            None => {
                crate::api_cli::repl::start_repl(&mut session).await?;
            }
        }

        Ok(())
    }
}
