//! Async driver for the event list.
//!
//! [`EventListViewModel`] owns an [`EventListState`] and an [`EventSource`]. It feeds
//! list events to [`handle_event`], executes the returned actions against the source,
//! and feeds each outcome back as a new event until the queue drains. Fetch failures
//! never escape: they become the state's user-facing error.
//!
//! # Example
//!
//! ```no_run
//! use eventboard::api::{HttpEventSource, Session};
//! use eventboard::app::{EventListViewModel, SortMode};
//! use std::time::Duration;
//!
//! # async fn run() -> eventboard::Result<()> {
//! let timeout = Duration::from_secs(10);
//! let source = HttpEventSource::new("http://localhost:3000", Session::anonymous(), timeout)?;
//! let mut list = EventListViewModel::new(source);
//! list.activate().await?;
//! list.set_sort_by(SortMode::Cheapest);
//! list.load_more().await?;
//! for event in list.visible_events() {
//!     println!("{} {}", event.display_date(), event.title);
//! }
//! # Ok(())
//! # }
//! ```

use crate::api::EventSource;
use crate::app::filters::{FilterAction, FilterState};
use crate::app::handler::{handle_event, ListEvent};
use crate::app::modes::SortMode;
use crate::app::state::PAGE_SIZE;
use crate::app::{Action, EventListState};
use crate::domain::error::Result;
use crate::domain::Event;
use std::collections::VecDeque;

/// Event list view-model backed by an [`EventSource`].
#[derive(Debug)]
pub struct EventListViewModel<S> {
    source: S,
    state: EventListState,
}

impl<S: EventSource> EventListViewModel<S> {
    /// Creates a view-model with empty state and default filters.
    pub fn new(source: S) -> Self {
        Self::with_state(source, EventListState::new())
    }

    /// Creates a view-model around existing state.
    pub const fn with_state(source: S, state: EventListState) -> Self {
        Self { source, state }
    }

    /// Loads the first page, replacing anything accumulated.
    ///
    /// # Errors
    ///
    /// Never fails for a valid page; fetch failures are stored in
    /// [`error`](Self::error).
    pub async fn activate(&mut self) -> Result<bool> {
        self.load_page(1, false).await
    }

    /// Fetches `page` and either replaces or appends the accumulated events.
    ///
    /// Returns whether the visible state changed.
    ///
    /// # Errors
    ///
    /// Returns an error only for page number 0; fetch failures are stored in
    /// [`error`](Self::error).
    pub async fn load_page(&mut self, page: u32, append: bool) -> Result<bool> {
        self.process(ListEvent::LoadPage { page, append }).await
    }

    /// Appends the next page, unless the server reported none or one is already
    /// loading.
    ///
    /// # Errors
    ///
    /// Fetch failures are stored in [`error`](Self::error), not returned.
    pub async fn load_more(&mut self) -> Result<bool> {
        self.process(ListEvent::LoadMore).await
    }

    async fn process(&mut self, event: ListEvent) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut changed = false;

        while let Some(event) = queue.pop_front() {
            let (render, actions) = handle_event(&mut self.state, event)?;
            changed |= render;

            for action in actions {
                queue.push_back(self.execute(action).await);
            }
        }

        Ok(changed)
    }

    async fn execute(&self, action: Action) -> ListEvent {
        match action {
            Action::FetchPage(request) => {
                match self.source.fetch_page(request.page, PAGE_SIZE).await {
                    Ok(page) => ListEvent::PageLoaded { request, page },
                    Err(e) => ListEvent::PageFailed {
                        request,
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Applies one filter change.
    pub fn dispatch(&mut self, action: FilterAction) {
        self.state.dispatch(action);
    }

    pub fn set_search_text(&mut self, value: impl Into<String>) {
        self.state.set_search_text(value);
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.state.set_city(value);
    }

    pub fn set_date_from(&mut self, value: impl Into<String>) {
        self.state.set_date_from(value);
    }

    pub fn set_date_to(&mut self, value: impl Into<String>) {
        self.state.set_date_to(value);
    }

    pub fn set_price_min(&mut self, value: impl Into<String>) {
        self.state.set_price_min(value);
    }

    pub fn set_price_max(&mut self, value: impl Into<String>) {
        self.state.set_price_max(value);
    }

    pub fn set_attire(&mut self, value: impl Into<String>) {
        self.state.set_attire(value);
    }

    pub fn set_show_past(&mut self, value: bool) {
        self.state.set_show_past(value);
    }

    pub fn set_sort_by(&mut self, value: SortMode) {
        self.state.set_sort_by(value);
    }

    pub fn clear_filters(&mut self) {
        self.state.clear_filters();
    }

    #[must_use]
    pub fn visible_events(&self) -> &[Event] {
        &self.state.visible_events
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.state.loading
    }

    #[must_use]
    pub const fn loading_more(&self) -> bool {
        self.state.loading_more
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.state.can_load_more()
    }

    #[must_use]
    pub const fn state(&self) -> &EventListState {
        &self.state
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EventDraft, EventPage};
    use crate::app::state::LOAD_ERROR_MESSAGE;
    use crate::domain::EventBoardError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Serves a fixed list of events in pages; pages listed in `failing` error out.
    struct FakeSource {
        events: Vec<Event>,
        failing: Mutex<Vec<u32>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn with_events(count: usize) -> Self {
            let events = (0..count)
                .map(|i| Event::new(format!("e{i}"), format!("Event {i}"), "2025-03-01"))
                .collect();
            Self {
                events,
                failing: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn fail_page(self, page: u32) -> Self {
            self.failing.lock().expect("lock").push(page);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventSource for FakeSource {
        async fn fetch_page(&self, page: u32, limit: u32) -> Result<EventPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().expect("lock").contains(&page) {
                return Err(EventBoardError::Status {
                    status: 500,
                    url: "fake".to_string(),
                });
            }

            let start = ((page - 1) * limit) as usize;
            let end = (start + limit as usize).min(self.events.len());
            let events = self.events.get(start..end).unwrap_or_default().to_vec();
            Ok(EventPage::new(events, end < self.events.len()))
        }

        async fn fetch_event(&self, id: &str) -> Result<Event> {
            self.events
                .iter()
                .find(|event| event.id == id)
                .cloned()
                .ok_or_else(|| EventBoardError::Status {
                    status: 404,
                    url: id.to_string(),
                })
        }

        async fn create_event(&self, _draft: &EventDraft) -> Result<Event> {
            Err(EventBoardError::InvalidRequest("read only".to_string()))
        }

        async fn update_event(&self, _id: &str, _draft: &EventDraft) -> Result<Event> {
            Err(EventBoardError::InvalidRequest("read only".to_string()))
        }
    }

    fn view_model(source: FakeSource) -> EventListViewModel<FakeSource> {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
        EventListViewModel::with_state(source, EventListState::new().with_today(today))
    }

    #[tokio::test]
    async fn activate_loads_first_page() {
        let mut list = view_model(FakeSource::with_events(25));
        assert!(list.activate().await.expect("activate"));

        assert_eq!(list.visible_events().len(), 10);
        assert!(!list.loading());
        assert!(list.can_load_more());
        assert_eq!(list.source().calls(), 1);
    }

    #[tokio::test]
    async fn load_more_walks_pages_until_exhausted() {
        let mut list = view_model(FakeSource::with_events(25));
        list.activate().await.expect("activate");
        list.load_more().await.expect("page 2");
        list.load_more().await.expect("page 3");
        assert_eq!(list.state().events.len(), 25);
        assert!(!list.can_load_more());

        list.load_more().await.expect("no page 4");
        assert_eq!(list.source().calls(), 3);
        assert_eq!(list.state().current_page, 3);
    }

    #[tokio::test]
    async fn reactivating_replaces_accumulated_events() {
        let mut list = view_model(FakeSource::with_events(25));
        list.activate().await.expect("first");
        list.activate().await.expect("second");
        assert_eq!(list.state().events.len(), 10);
    }

    #[tokio::test]
    async fn load_more_while_loading_more_issues_no_fetch() {
        let mut state = EventListState::new();
        state.has_more = true;
        state.loading_more = true;
        let mut list = EventListViewModel::with_state(FakeSource::with_events(25), state);

        let changed = list.load_more().await.expect("load more");
        assert!(!changed);
        assert_eq!(list.source().calls(), 0);
        assert!(list.state().events.is_empty());
    }

    #[tokio::test]
    async fn failed_page_keeps_loaded_events() {
        let mut list = view_model(FakeSource::with_events(25).fail_page(2));
        list.activate().await.expect("activate");
        list.load_more().await.expect("failure is absorbed");

        assert_eq!(list.state().events.len(), 10);
        assert_eq!(list.error(), Some(LOAD_ERROR_MESSAGE));
        assert!(!list.loading_more());
        assert!(list.can_load_more());
    }

    #[tokio::test]
    async fn filters_apply_to_accumulated_pages() {
        let mut list = view_model(FakeSource::with_events(15));
        list.activate().await.expect("activate");
        list.load_more().await.expect("page 2");

        list.set_search_text("event 1");
        let ids: Vec<&str> = list.visible_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e10", "e11", "e12", "e13", "e14"]);

        list.clear_filters();
        assert_eq!(list.visible_events().len(), 15);
        assert_eq!(list.filters(), &FilterState::default());
    }
}
