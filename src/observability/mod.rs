//! Structured logging and optional span export.
//!
//! Every layer of the crate emits `tracing` spans and events. This module wires them
//! to a subscriber at startup:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                            → OpenTelemetryLayer → FileSpanExporter → JSON lines
//! ```
//!
//! # Configuration
//!
//! The level filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! Span export is enabled only when `trace_file` is set.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with JSON-lines file export

mod init;
mod tracer;

pub use init::init_tracing;
