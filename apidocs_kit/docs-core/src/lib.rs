// Copyright 2024 The Forgejo Authors. All rights reserved.
// SPDX-License-Identifier: MIT

//! # docs-core
//!
//! The engine behind a project's API reference panel: where the reader is
//! ([`navigation`]), which resources exist ([`catalog`], [`source`]), how the
//! reader finds one ([`picker`]) and what code samples they see
//! ([`template`], [`renderer`], [`content`]).

pub mod catalog;
#[cfg(feature = "client-native")]
pub mod client;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod language;
pub mod navigation;
pub mod picker;
pub mod preferences;
pub mod renderer;
pub mod section;
pub mod source;
pub mod static_catalog;
pub mod template;

// --- Re-exports ---

pub use catalog::{normalize, search, CatalogSnapshot, ResourceCatalogEntry, SchemaDetail};
#[cfg(feature = "client-native")]
pub use client::HttpCatalogSource;
pub use config::DocsConfig;
pub use content::{get_active_content, ContentRenderer, ContentVariant, DetailPage, ResourcePage, SectionPage};
pub use context::ProjectContext;
pub use error::{Error, Result};
pub use language::OutputLanguage;
pub use navigation::{ContentKind, NavLevel, NavState, NavigationPath, NavigationState};
pub use picker::{FetchTicket, PickerStatus, ResourcePicker};
pub use preferences::{InMemoryPreferences, PreferenceStore};
pub use renderer::{render, render_doc, RenderedDoc, RenderedSnippet};
pub use section::{ResourceKind, Section};
pub use source::{load_snapshot, refresh_section, BoxFuture, CatalogSource, Page, PageQuery};
pub use static_catalog::StaticCatalog;
pub use template::{SnippetParams, SnippetTemplate, TemplateRegistry};
