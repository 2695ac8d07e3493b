//! Events backend contract.
//!
//! This module holds everything that talks to the REST backend: the wire types, the
//! [`EventSource`] trait the view-model depends on, its `reqwest` implementation, and
//! the explicit [`Session`] carrying request credentials.
//!
//! # Architecture
//!
//! - `messages`: Request/response bodies with lenient decoding
//! - `client`: [`EventSource`] trait and [`HttpEventSource`]
//! - `session`: Injected authentication context

pub mod client;
pub mod messages;
pub mod session;

pub use client::{EventSource, HttpEventSource};
pub use messages::{EventDraft, EventPage, PageQuery};
pub use session::Session;
