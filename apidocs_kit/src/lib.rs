//! # API Docs Kit - An interactive API reference for project dashboards
//!
//! `apidocs_kit` puts the `docs-core` engine behind a terminal front end. It
//! browses the reference docs of one project, the way a dashboard's API
//! panel does, against a live catalog service or an offline JSON snapshot.
//!
//! ## Core Features:
//!
//! - **Section and resource navigation**: `go`, `open` and `back` move
//!   through the sections and their tables, procedures, buckets and edge
//!   functions.
//!
//! - **Code samples**: every page renders its JavaScript or Bash samples with
//!   the project's endpoint, ref and (optionally revealed) API keys.
//!
//! - **Resource search**: a debounced, paginated picker over the resources of
//!   the active section.
//!

pub use docs_core;

pub mod api_cli;
pub mod repl;
