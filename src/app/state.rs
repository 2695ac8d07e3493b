//! Event list state management and view computation.
//!
//! This module defines [`EventListState`], the central state container for the event
//! list, along with the methods that apply filter changes, track pagination and
//! recompute the visible list. It is the single source of truth for everything the
//! list screen shows.
//!
//! # Architecture
//!
//! `EventListState` separates core data (the accumulated events fetched so far)
//! from derived state (the filtered, sorted visible events). Derived state is
//! recomputed by [`EventListState::apply_filters`] after every change to either
//! input, so readers never observe a stale list.
//!
//! # State Components
//!
//! - **Events**: Accumulated collection across all loaded pages, in server order
//! - **Visible Events**: Subset after filtering and sorting
//! - **Filters**: Current [`FilterState`] snapshot
//! - **Pagination**: Current page, server "has more" indicator, in-flight requests
//! - **Loading Flags**: `loading` for page 1, `loading_more` for later pages
//! - **Error**: Last user-facing load error, if any
//!
//! Pagination transitions live in [`crate::app::handler`]; this module only holds
//! the data and the pure recomputation.

use crate::app::filters::{visible_events, FilterAction, FilterState};
use crate::app::modes::{LoadKind, SortMode};
use crate::domain::Event;
use chrono::{Local, NaiveDate};

/// Number of events requested per backend call.
pub const PAGE_SIZE: u32 = 10;

/// Message stored in [`EventListState::error`] when a page fails to load.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load events. Please try again.";

/// A page request the state machine is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,

    /// Whether the response is appended to, or replaces, the accumulated events.
    pub append: bool,
}

impl PageRequest {
    #[must_use]
    pub const fn kind(self) -> LoadKind {
        LoadKind::for_page(self.page)
    }
}

/// Central event list state container.
///
/// Mutated by the event handler in response to filter changes and page results.
/// `visible_events` is kept in sync with `events` and `filters` by
/// [`apply_filters`](Self::apply_filters).
#[derive(Debug, Clone, PartialEq)]
pub struct EventListState {
    /// Accumulated events across every loaded page, in server order.
    pub events: Vec<Event>,

    /// Filtered and sorted subset of `events`.
    pub visible_events: Vec<Event>,

    /// Current filter selection.
    pub filters: FilterState,

    /// Last page applied to `events` (0 before the first successful load).
    pub current_page: u32,

    /// Server indicator that another page exists.
    pub has_more: bool,

    /// A page 1 request is in flight.
    pub loading: bool,

    /// A request for page 2 or later is in flight.
    pub loading_more: bool,

    /// User-facing message for the last failed load.
    pub error: Option<String>,

    /// Latest outstanding replacing request, if any.
    pub(crate) pending_replace: Option<PageRequest>,

    /// Outstanding appending request, if any.
    pub(crate) pending_append: Option<PageRequest>,

    /// Day used for the past-events cutoff; `None` means the local clock.
    today_override: Option<NaiveDate>,
}

impl Default for EventListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventListState {
    /// Creates an empty state with default filters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            visible_events: Vec::new(),
            filters: FilterState::default(),
            current_page: 0,
            has_more: false,
            loading: false,
            loading_more: false,
            error: None,
            pending_replace: None,
            pending_append: None,
            today_override: None,
        }
    }

    /// Pins "today" to a fixed day instead of the local clock.
    ///
    /// Used by tests and by callers that render historical snapshots.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today_override = Some(today);
        self.apply_filters();
        self
    }

    /// The local calendar day the filters are evaluated against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Whether the presentation layer should offer "load more".
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.has_more && !self.loading
    }

    /// Whether any request is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.loading || self.loading_more
    }

    /// Recomputes `visible_events` from `events` and `filters`.
    ///
    /// # Tracing
    ///
    /// Creates a debug-level span with the accumulated count and sort mode.
    pub fn apply_filters(&mut self) {
        let _span = tracing::debug_span!(
            "apply_filters",
            total_events = self.events.len(),
            sort_by = %self.filters.sort_by
        )
        .entered();

        self.visible_events = visible_events(&self.events, &self.filters, self.today());

        tracing::debug!(
            visible_count = self.visible_events.len(),
            "filters applied"
        );
    }

    /// Applies a single filter change and recomputes the visible list.
    pub fn dispatch(&mut self, action: FilterAction) {
        tracing::trace!(action = ?action, "filter action");
        self.filters.apply(action);
        self.apply_filters();
    }

    pub fn set_search_text(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetSearchText(value.into()));
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetCity(value.into()));
    }

    pub fn set_date_from(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetDateFrom(value.into()));
    }

    pub fn set_date_to(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetDateTo(value.into()));
    }

    pub fn set_price_min(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetPriceMin(value.into()));
    }

    pub fn set_price_max(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetPriceMax(value.into()));
    }

    pub fn set_attire(&mut self, value: impl Into<String>) {
        self.dispatch(FilterAction::SetAttire(value.into()));
    }

    pub fn set_show_past(&mut self, value: bool) {
        self.dispatch(FilterAction::SetShowPast(value));
    }

    pub fn set_sort_by(&mut self, value: SortMode) {
        self.dispatch(FilterAction::SetSortBy(value));
    }

    /// Resets every filter field to its default in one update.
    pub fn clear_filters(&mut self) {
        self.dispatch(FilterAction::Clear);
    }
}
