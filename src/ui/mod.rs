//! Presentation layer for the event list.
//!
//! This module turns list state into display-ready view models and renders them as
//! plain text.
//!
//! ```text
//! EventListState → EventListView::from_state → EventListView → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable list state
//! - [`renderer`]: Text rendering of list and detail views

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_event_details};
pub use viewmodel::{EmptyState, EventListView, EventRow, FooterInfo, HeaderInfo};
