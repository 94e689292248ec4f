use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Docs(#[from] docs_core::Error),

    #[error("CLI error: {0}")]
    CliError(#[from] clap::error::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// A command that cannot run in the current state, e.g. `more` without
    /// an active search.
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
