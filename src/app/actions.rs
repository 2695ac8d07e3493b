//! Actions representing side effects to be executed by the view-model runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing a list event. Actions bridge pure
//! state transitions and effectful operations such as backend requests.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The
//! [`EventListViewModel`](crate::app::EventListViewModel) executes them in sequence
//! and feeds their outcome back to the handler as new events.

use crate::app::state::PageRequest;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fetches one page from the backend.
    ///
    /// The outcome must be reported back as
    /// [`ListEvent::PageLoaded`](crate::app::ListEvent::PageLoaded) or
    /// [`ListEvent::PageFailed`](crate::app::ListEvent::PageFailed) carrying the
    /// same request, so stale responses can be recognized.
    FetchPage(PageRequest),
}
