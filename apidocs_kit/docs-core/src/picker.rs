//! # Resource Picker
//!
//! A searchable, paginated list of the resources of one section. The picker
//! is a plain state machine: the host injects time through [`Instant`]
//! values and drives fetches with [`FetchTicket`]s, so debouncing and
//! staleness are deterministic.
//!
//! 1. `set_raw_query` records keystrokes; `poll` promotes the raw query to
//!    the debounced query once the input has been quiet for the interval.
//! 2. `begin_first_page` / `begin_next_page` hand out tickets.
//! 3. `complete` applies a response if its ticket is still current.

use crate::catalog::ResourceCatalogEntry;
use crate::config::DocsConfig;
use crate::error::{Error, Result};
use crate::navigation::NavigationState;
use crate::section::Section;
use crate::source::{CatalogSource, Page, PageQuery};
use std::time::{Duration, Instant};

/// The raw and debounced search text of an open picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerQueryState {
    raw_query: String,
    /// `None` means "no filter", which is distinct from an empty filter.
    debounced_query: Option<String>,
    last_input: Option<Instant>,
}

impl PickerQueryState {
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn debounced_query(&self) -> Option<&str> {
        self.debounced_query.as_deref()
    }

    /// Whether input is waiting for the quiet interval to pass.
    pub fn is_settling(&self) -> bool {
        self.last_input.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStatus {
    /// No query; the unfiltered first page is loaded or loading.
    Idle,
    /// A debounced query is set; its first page is loading or its results
    /// are shown.
    Searching,
    /// A follow-up page is in flight.
    LoadingMore,
    /// The last loaded page matched nothing.
    Empty,
}

/// Identifies one page request. A response is applied only while its ticket
/// is the one in flight and its query is still the debounced query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: Option<String>,
    pub cursor: Option<String>,
}

impl FetchTicket {
    pub fn page_query(&self, limit: usize) -> PageQuery {
        PageQuery {
            search: self.query.clone(),
            cursor: self.cursor.clone(),
            limit,
        }
    }
}

#[derive(Debug)]
pub struct ResourcePicker {
    category: Section,
    debounce: Duration,
    page_size: usize,
    open: bool,
    query: PickerQueryState,
    items: Vec<ResourceCatalogEntry>,
    /// The query `items` were loaded for; `None` until a first page lands.
    results_query: Option<Option<String>>,
    next_cursor: Option<String>,
    in_flight: Option<FetchTicket>,
    next_seq: u64,
    last_error: Option<Error>,
}

impl ResourcePicker {
    pub fn new(category: Section, debounce: Duration, page_size: usize) -> Self {
        Self {
            category,
            debounce,
            page_size: page_size.max(1),
            open: false,
            query: PickerQueryState::default(),
            items: Vec::new(),
            results_query: None,
            next_cursor: None,
            in_flight: None,
            next_seq: 0,
            last_error: None,
        }
    }

    pub fn from_config(category: Section, config: &DocsConfig) -> Self {
        Self::new(category, config.debounce(), config.page_size)
    }

    // --- Accessors ---

    pub fn category(&self) -> Section {
        self.category
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &PickerQueryState {
        &self.query
    }

    /// The visible results. While a new first page is in flight these are
    /// still the results of the previous query.
    pub fn items(&self) -> &[ResourceCatalogEntry] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn status(&self) -> PickerStatus {
        let filtered = self.query.debounced_query.is_some();
        match &self.in_flight {
            Some(ticket) if ticket.cursor.is_some() => PickerStatus::LoadingMore,
            Some(_) if filtered => PickerStatus::Searching,
            Some(_) => PickerStatus::Idle,
            None if self.results_query.is_some() && self.items.is_empty() => PickerStatus::Empty,
            None if filtered => PickerStatus::Searching,
            None => PickerStatus::Idle,
        }
    }

    /// Whether a page request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the visible results belong to the current debounced query.
    pub fn is_current(&self) -> bool {
        self.results_query.as_ref() == Some(&self.query.debounced_query)
    }

    /// Whether the host should issue a first page for the current query.
    pub fn needs_first_page(&self) -> bool {
        self.open && self.in_flight.is_none() && !self.is_current()
    }

    // --- Lifecycle ---

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the picker and discards its query, results and pending fetch.
    pub fn close(&mut self) {
        let category = self.category;
        *self = Self::new(category, self.debounce, self.page_size);
    }

    /// Switches the picker to `category`, resetting it when the category
    /// changes.
    pub fn set_category(&mut self, category: Section) {
        if category != self.category {
            let open = self.open;
            *self = Self::new(category, self.debounce, self.page_size);
            self.open = open;
        }
    }

    // --- Query ---

    pub fn set_raw_query(&mut self, raw: impl Into<String>, now: Instant) {
        self.query.raw_query = raw.into();
        self.query.last_input = Some(now);
    }

    /// Promotes the raw query once it has been quiet for the debounce
    /// interval. Returns true when the debounced query changed; any fetch
    /// in flight for the old query is superseded.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last_input) = self.query.last_input else {
            return false;
        };
        if now.saturating_duration_since(last_input) < self.debounce {
            return false;
        }
        self.query.last_input = None;

        let next = (!self.query.raw_query.is_empty()).then(|| self.query.raw_query.clone());
        if next == self.query.debounced_query {
            return false;
        }
        tracing::debug!(category = %self.category, query = ?next, "debounced query changed");
        self.query.debounced_query = next;
        self.in_flight = None;
        true
    }

    // --- Fetching ---

    fn issue(&mut self, cursor: Option<String>) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            query: self.query.debounced_query.clone(),
            cursor,
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// A ticket for the first page of the current query. Supersedes any
    /// fetch in flight.
    pub fn begin_first_page(&mut self) -> FetchTicket {
        self.issue(None)
    }

    /// A ticket for the next page, issued only when the sentinel is visible,
    /// a next page exists and no fetch is in flight.
    pub fn begin_next_page(&mut self, sentinel_visible: bool) -> Option<FetchTicket> {
        if !sentinel_visible || self.in_flight.is_some() || !self.is_current() {
            return None;
        }
        let cursor = self.next_cursor.clone()?;
        Some(self.issue(Some(cursor)))
    }

    /// Applies the response for `ticket`. Returns false when the ticket is
    /// stale and the response was discarded.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Page>) -> bool {
        if self.in_flight.as_ref() != Some(&ticket) || ticket.query != self.query.debounced_query {
            tracing::debug!(seq = ticket.seq, query = ?ticket.query, "discarding stale page");
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                if ticket.cursor.is_none() {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }
                self.next_cursor = page.next_cursor;
                self.results_query = Some(ticket.query);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(category = %self.category, "picker fetch failed: {}", e);
                self.last_error = Some(e);
            }
        }
        true
    }

    /// Fetches and applies the first page of the current query.
    pub async fn load_first_page(&mut self, source: &dyn CatalogSource) -> bool {
        let ticket = self.begin_first_page();
        let query = ticket.page_query(self.page_size);
        let result = source
            .fetch_paginated_resource_listing(self.category, &query)
            .await;
        self.complete(ticket, result)
    }

    /// Fetches and applies the next page, if one may be requested.
    pub async fn load_next_page(&mut self, source: &dyn CatalogSource, sentinel_visible: bool) -> bool {
        let Some(ticket) = self.begin_next_page(sentinel_visible) else {
            return false;
        };
        let query = ticket.page_query(self.page_size);
        let result = source
            .fetch_paginated_resource_listing(self.category, &query)
            .await;
        self.complete(ticket, result)
    }

    // --- Selection ---

    /// Navigates to `name` and closes the picker as one step.
    pub fn select(&mut self, name: &str, nav: &mut NavigationState) {
        nav.select_resource(self.category, name);
        self.close();
    }
}
