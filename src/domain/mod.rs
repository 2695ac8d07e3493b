//! Domain layer for the event board.
//!
//! This module contains the core domain types, independent of the HTTP backend or
//! the presentation layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`event`]: Event model and lenient date/price parsing

pub mod error;
pub mod event;

pub use error::{EventBoardError, Result};
pub use event::{parse_calendar_date, parse_price, Event, Organizer, TimeValue};
