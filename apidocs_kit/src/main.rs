//! # apidocs-cli
//!
//! Renders a project's API reference docs in the terminal, either one page
//! at a time (`apidocs-cli render entities users`) or as an interactive REPL.

use anyhow::{Context, Result};

fn main() -> Result<()> {
    apidocs_kit::api_cli::run().context("apidocs-cli failed")?;
    Ok(())
}
