//! List event handling and state transition logic.
//!
//! This module implements the event handler that processes filter changes, page
//! requests and page results, translating them into state changes and action
//! sequences. It is the only place pagination state changes.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the presentation layer or from completed fetches
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `EventListState` fields and methods
//! 4. Actions are collected and returned for execution
//!
//! # Pagination Rules
//!
//! - Page 1 raises `loading`, later pages raise `loading_more`; both drop once the
//!   request settles
//! - A replacing result swaps the accumulated events wholesale
//! - An appending result is applied only if it is the outstanding append and is
//!   for `current_page + 1`; anything else is a stale response and is dropped
//! - A failure keeps the accumulated events and overwrites the error message
//!
//! # Example
//!
//! ```rust
//! use eventboard::app::{handle_event, Action, EventListState, ListEvent};
//!
//! let mut state = EventListState::new();
//! let (_, actions) = handle_event(&mut state, ListEvent::LoadPage { page: 1, append: false })?;
//! assert!(state.loading);
//! assert!(matches!(actions.as_slice(), [Action::FetchPage(_)]));
//! # Ok::<(), eventboard::EventBoardError>(())
//! ```

use crate::api::EventPage;
use crate::app::filters::FilterAction;
use crate::app::modes::LoadKind;
use crate::app::state::{PageRequest, LOAD_ERROR_MESSAGE};
use crate::app::{Action, EventListState};
use crate::domain::error::{EventBoardError, Result};

/// Events triggered by the user or by completed backend requests.
///
/// Each event represents a discrete occurrence that may cause state changes and
/// action emissions. The handler processes these sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Requests a page. `append == false` replaces the accumulated events.
    LoadPage {
        /// 1-based page number.
        page: u32,
        /// Whether the result is appended.
        append: bool,
    },

    /// Requests the page after the current one, appended.
    ///
    /// Ignored when the server reported no more pages or a load-more is already
    /// outstanding.
    LoadMore,

    /// Changes one filter field, or clears them all.
    Filter(FilterAction),

    /// Reports a successful fetch.
    PageLoaded {
        /// The request this result answers.
        request: PageRequest,
        /// Page contents.
        page: EventPage,
    },

    /// Reports a failed fetch.
    PageFailed {
        /// The request this failure answers.
        request: PageRequest,
        /// Underlying cause, for logs only.
        reason: String,
    },
}

impl ListEvent {
    /// Short label used in tracing spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadPage { .. } => "load_page",
            Self::LoadMore => "load_more",
            Self::Filter(_) => "filter",
            Self::PageLoaded { .. } => "page_loaded",
            Self::PageFailed { .. } => "page_failed",
        }
    }
}

/// Processes an event, mutates state, and returns whether the view changed plus the
/// actions to execute.
///
/// # Errors
///
/// Returns [`EventBoardError::InvalidRequest`] for page number 0.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut EventListState, event: ListEvent) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        ListEvent::LoadPage { page, append } => start_load(state, PageRequest { page, append }),
        ListEvent::LoadMore => {
            if !state.has_more || state.loading_more {
                tracing::debug!(
                    has_more = state.has_more,
                    loading_more = state.loading_more,
                    "load more ignored"
                );
                return Ok((false, vec![]));
            }
            let Some(page) = state.current_page.checked_add(1) else {
                tracing::debug!(current_page = state.current_page, "no page after the last one");
                return Ok((false, vec![]));
            };
            start_load(state, PageRequest { page, append: true })
        }
        ListEvent::Filter(action) => {
            state.dispatch(action);
            Ok((true, vec![]))
        }
        ListEvent::PageLoaded { request, page } => Ok((apply_page(state, request, page), vec![])),
        ListEvent::PageFailed { request, reason } => {
            if !settle(state, request) {
                tracing::debug!(page = request.page, "dropping failure for superseded request");
                return Ok((false, vec![]));
            }

            tracing::warn!(
                page = request.page,
                append = request.append,
                reason = %reason,
                "page load failed"
            );
            state.error = Some(LOAD_ERROR_MESSAGE.to_string());
            Ok((true, vec![]))
        }
    }
}

fn start_load(state: &mut EventListState, request: PageRequest) -> Result<(bool, Vec<Action>)> {
    if request.page == 0 {
        return Err(EventBoardError::InvalidRequest(
            "page numbers start at 1".to_string(),
        ));
    }

    tracing::debug!(page = request.page, append = request.append, "page requested");

    if request.append {
        state.pending_append = Some(request);
    } else {
        state.pending_replace = Some(request);
    }
    state.error = None;
    refresh_loading_flags(state);

    Ok((true, vec![Action::FetchPage(request)]))
}

fn apply_page(state: &mut EventListState, request: PageRequest, page: EventPage) -> bool {
    if !settle(state, request) {
        tracing::debug!(page = request.page, "dropping response for superseded request");
        return false;
    }

    if request.append {
        let expected = state.current_page.checked_add(1);
        if expected != Some(request.page) {
            tracing::debug!(page = request.page, expected, "dropping out-of-order page");
            return true;
        }
        state.events.extend(page.events);
    } else {
        state.events = page.events;
        // an in-flight append was computed against the list being replaced
        state.pending_append = None;
        refresh_loading_flags(state);
    }

    state.current_page = request.page;
    state.has_more = page.has_more;
    state.error = None;
    state.apply_filters();

    tracing::debug!(
        current_page = state.current_page,
        accumulated = state.events.len(),
        has_more = state.has_more,
        "page applied"
    );
    true
}

/// Clears the pending slot `request` occupies. Returns `false` if it was not the
/// outstanding request for that slot.
fn settle(state: &mut EventListState, request: PageRequest) -> bool {
    let slot = if request.append {
        &mut state.pending_append
    } else {
        &mut state.pending_replace
    };

    if *slot != Some(request) {
        return false;
    }
    *slot = None;
    refresh_loading_flags(state);
    true
}

fn refresh_loading_flags(state: &mut EventListState) {
    let pending = [state.pending_replace, state.pending_append];
    state.loading = pending
        .iter()
        .flatten()
        .any(|request| request.kind() == LoadKind::Initial);
    state.loading_more = pending
        .iter()
        .flatten()
        .any(|request| request.kind() == LoadKind::More);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Event;
    use chrono::NaiveDate;

    fn state() -> EventListState {
        EventListState::new().with_today(NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"))
    }

    fn events(prefix: &str, count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| Event::new(format!("{prefix}{i}"), format!("Event {prefix}{i}"), "2025-03-01"))
            .collect()
    }

    fn request(page: u32, append: bool) -> PageRequest {
        PageRequest { page, append }
    }

    fn load(state: &mut EventListState, page: u32, append: bool) -> PageRequest {
        let (_, actions) =
            handle_event(state, ListEvent::LoadPage { page, append }).expect("valid page");
        match actions.as_slice() {
            [Action::FetchPage(request)] => *request,
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    fn deliver(
        state: &mut EventListState,
        request: PageRequest,
        events: Vec<Event>,
        has_more: bool,
    ) -> bool {
        let (changed, actions) = handle_event(
            state,
            ListEvent::PageLoaded {
                request,
                page: EventPage::new(events, has_more),
            },
        )
        .expect("page result");
        assert!(actions.is_empty());
        changed
    }

    #[test]
    fn initial_load_raises_loading_only() {
        let mut state = state();
        let request = load(&mut state, 1, false);
        assert!(state.loading);
        assert!(!state.loading_more);

        deliver(&mut state, request, events("a", 10), true);
        assert!(!state.loading);
        assert!(!state.loading_more);
        assert_eq!(state.current_page, 1);
        assert!(state.has_more);
        assert_eq!(state.visible_events.len(), 10);
    }

    #[test]
    fn later_pages_raise_loading_more_only() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 10), true);

        handle_event(&mut state, ListEvent::LoadMore).expect("load more");
        assert!(!state.loading);
        assert!(state.loading_more);
    }

    #[test]
    fn reloading_first_page_replaces_instead_of_duplicating() {
        let mut state = state();
        for _ in 0..2 {
            let request = load(&mut state, 1, false);
            deliver(&mut state, request, events("a", 10), true);
        }
        assert_eq!(state.events.len(), 10);
    }

    #[test]
    fn append_keeps_existing_order() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 3), true);
        let before = state.events.clone();

        let (_, actions) = handle_event(&mut state, ListEvent::LoadMore).expect("load more");
        assert_eq!(actions, vec![Action::FetchPage(request(2, true))]);
        deliver(&mut state, request(2, true), events("b", 2), false);

        assert_eq!(&state.events[..3], before.as_slice());
        assert_eq!(state.events[3].id, "b0");
        assert_eq!(state.current_page, 2);
        assert!(!state.has_more);
        assert!(!state.can_load_more());
    }

    #[test]
    fn load_more_is_noop_while_loading_more() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 10), true);
        handle_event(&mut state, ListEvent::LoadMore).expect("load more");
        let snapshot = state.clone();

        let (changed, actions) = handle_event(&mut state, ListEvent::LoadMore).expect("load more");
        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn load_more_is_noop_without_more_pages() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 4), false);

        let (_, actions) = handle_event(&mut state, ListEvent::LoadMore).expect("load more");
        assert!(actions.is_empty());
    }

    #[test]
    fn failure_keeps_events_and_overwrites_error() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 10), true);

        for _ in 0..2 {
            let request = load(&mut state, 2, true);
            handle_event(
                &mut state,
                ListEvent::PageFailed {
                    request,
                    reason: "connection refused".to_string(),
                },
            )
            .expect("failure handled");
        }

        assert_eq!(state.events.len(), 10);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
        assert!(!state.loading);
        assert!(!state.loading_more);
    }

    #[test]
    fn successful_retry_clears_error() {
        let mut state = state();
        let request = load(&mut state, 1, false);
        handle_event(
            &mut state,
            ListEvent::PageFailed {
                request,
                reason: "timeout".to_string(),
            },
        )
        .expect("failure handled");
        assert!(state.error.is_some());

        let retry = load(&mut state, 1, false);
        assert!(state.error.is_none());
        deliver(&mut state, retry, events("a", 1), false);
        assert!(state.error.is_none());
    }

    #[test]
    fn stale_append_response_is_dropped() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 10), true);

        let second = load(&mut state, 2, true);
        // a reload of page 1 supersedes the in-flight append
        let reload = load(&mut state, 1, false);
        deliver(&mut state, reload, events("r", 10), true);

        let changed = deliver(&mut state, second, events("b", 10), true);
        assert!(!changed);
        assert_eq!(state.events.len(), 10);
        assert_eq!(state.events[0].id, "r0");
        assert!(!state.loading_more);
    }

    #[test]
    fn append_for_wrong_page_is_dropped() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 10), true);

        let skipped = load(&mut state, 3, true);
        deliver(&mut state, skipped, events("c", 10), true);
        assert_eq!(state.events.len(), 10);
        assert_eq!(state.current_page, 1);
        assert!(!state.loading_more);
    }

    #[test]
    fn page_zero_is_rejected() {
        let mut state = state();
        let result = handle_event(&mut state, ListEvent::LoadPage { page: 0, append: false });
        assert!(matches!(result, Err(EventBoardError::InvalidRequest(_))));
        assert!(!state.loading);
    }

    #[test]
    fn load_more_after_last_page_number_is_noop() {
        let mut state = state();
        let last = load(&mut state, u32::MAX, false);
        deliver(&mut state, last, events("a", 10), true);
        assert!(state.can_load_more());

        let (changed, actions) = handle_event(&mut state, ListEvent::LoadMore).expect("load more");
        assert!(!changed);
        assert!(actions.is_empty());
        assert!(!state.loading_more);
        assert_eq!(state.current_page, u32::MAX);
    }

    #[test]
    fn filter_events_recompute_visible_list() {
        let mut state = state();
        let first = load(&mut state, 1, false);
        deliver(&mut state, first, events("a", 10), false);

        let (changed, _) = handle_event(
            &mut state,
            ListEvent::Filter(FilterAction::SetSearchText("event a3".to_string())),
        )
        .expect("filter");
        assert!(changed);
        assert_eq!(state.visible_events.len(), 1);
        assert_eq!(state.events.len(), 10);
    }
}
