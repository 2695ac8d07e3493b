//! View model types representing renderable list state.
//!
//! This module defines immutable view models computed from [`EventListState`],
//! following the MVVM pattern. View models contain pre-formatted display strings
//! and no business logic.
//!
//! # Architecture
//!
//! View models are created via [`EventListView::from_state`] and consumed by the
//! renderer.

use crate::app::EventListState;
use crate::domain::Event;

/// Complete list view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListView {
    /// Rows to display, in visible order.
    pub rows: Vec<EventRow>,

    /// Title line with counts and sort mode.
    pub header: HeaderInfo,

    /// Pagination status line.
    pub footer: FooterInfo,

    /// User-facing load error, shown above the table.
    pub error_banner: Option<String>,

    /// Shown instead of the table when nothing is visible.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    /// `dd/mm/yyyy`, or the raw text when unparseable.
    pub date: String,
    /// `HH:MM` or `HH:MM-HH:MM`; empty when unknown.
    pub time: String,
    pub location: String,
    pub price: String,
    pub attire: String,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub status: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No events found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

impl EventListView {
    /// Computes the view model for the current list state.
    #[must_use]
    pub fn from_state(state: &EventListState) -> Self {
        let rows: Vec<EventRow> = state.visible_events.iter().map(EventRow::from).collect();

        let filter_note = if state.filters.is_unfiltered() {
            ""
        } else {
            ", filtered"
        };
        let header = HeaderInfo {
            title: format!(
                " Events ({} of {}) sorted by {}{filter_note} ",
                rows.len(),
                state.events.len(),
                state.filters.sort_by
            ),
        };

        let status = if state.loading {
            "Loading events...".to_string()
        } else if state.loading_more {
            "Loading more events...".to_string()
        } else if state.can_load_more() {
            format!("Page {}. More events available.", state.current_page)
        } else if state.current_page > 0 {
            format!("Page {}. End of list.", state.current_page)
        } else {
            String::new()
        };

        let empty_state = (rows.is_empty() && !state.is_busy()).then(|| {
            if state.events.is_empty() {
                EmptyState {
                    message: "No events found".to_string(),
                    subtitle: "There is nothing scheduled yet.".to_string(),
                }
            } else {
                EmptyState {
                    message: "No events match your filters".to_string(),
                    subtitle: format!(
                        "Clear the filters to see all {} loaded events.",
                        state.events.len()
                    ),
                }
            }
        });

        Self {
            rows,
            header,
            footer: FooterInfo { status },
            error_banner: state.error.clone(),
            empty_state,
        }
    }
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        let start = event.start_time.as_ref().map(|t| t.display());
        let end = event.end_time.as_ref().map(|t| t.display());
        let time = match (start, end) {
            (Some(start), Some(end)) => format!("{start}-{end}"),
            (Some(start), None) => start,
            (None, _) => String::new(),
        };

        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.display_date(),
            time,
            location: event.location.clone(),
            price: event.display_price(),
            attire: event.attire.clone().unwrap_or_default(),
        }
    }
}
