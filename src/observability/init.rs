//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "eventboard";

/// Installs the global tracing subscriber.
///
/// Log lines go to stderr so command output on stdout stays clean. When
/// `config.trace_file` is set, finished spans are also appended to that file, one
/// JSON object per line.
///
/// Calling this more than once is harmless: only the first subscriber is installed.
///
/// # Errors
///
/// Returns [`EventBoardError::Io`](crate::EventBoardError::Io) when the trace file
/// cannot be opened for appending.
///
/// # Example
///
/// ```rust
/// use eventboard::observability::init_tracing;
/// use eventboard::Config;
///
/// init_tracing(&Config::default())?;
/// tracing::debug!("tracing is now active");
/// # Ok::<(), eventboard::EventBoardError>(())
/// ```
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let otel_layer = match &config.trace_file {
        Some(path) => {
            let resource = Resource::new(vec![opentelemetry::KeyValue::new(
                "service.name",
                SERVICE_NAME,
            )]);
            let provider = tracer::create_tracer_provider(path, resource)?;
            let tracer = provider.tracer(SERVICE_NAME);
            let _ = opentelemetry::global::set_tracer_provider(provider);
            Some(OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    Ok(())
}
