//! Application layer coordinating list state, events, and actions.
//!
//! This module holds the event list view-model: its state container, the pure
//! transition function, and the async driver that executes backend requests.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → ListEvent → handle_event → State Mutations → Actions → EventSource
//!                              ↑                                          ↓
//!                              └──────── PageLoaded / PageFailed ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filters`]: Filter state, filter actions and the filter/sort pipeline
//! - [`handler`]: Event processing and pagination transitions
//! - [`modes`]: Sort and load mode types
//! - [`state`]: Central list state container
//! - [`viewmodel`]: Async driver over an [`EventSource`](crate::api::EventSource)

pub mod actions;
pub mod filters;
pub mod handler;
pub mod modes;
pub mod state;
pub mod viewmodel;

pub use actions::Action;
pub use filters::{visible_events, FilterAction, FilterState};
pub use handler::{handle_event, ListEvent};
pub use modes::{LoadKind, SortMode};
pub use state::{EventListState, PageRequest, LOAD_ERROR_MESSAGE, PAGE_SIZE};
pub use viewmodel::EventListViewModel;
