//! Tracer provider with JSON-lines file export.
//!
//! [`FileSpanExporter`] writes every finished span as one compact JSON object per
//! line, appending to the configured trace file.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::Value;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Appends spans to a file as JSON lines.
#[derive(Debug)]
struct FileSpanExporter {
    file: File,
    resource: Resource,
    is_shutdown: bool,
}

impl FileSpanExporter {
    fn open(path: &Path, resource: Resource) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file,
            resource,
            is_shutdown: false,
        })
    }

    fn write_batch(&mut self, batch: &[SpanData]) -> io::Result<()> {
        let service = self
            .resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map(|v| v.to_string())
            .unwrap_or_default();

        for span in batch {
            let line = format_span(span, &service);
            writeln!(self.file, "{line}")?;
        }
        self.file.flush()
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self
            .write_batch(&batch)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
        let _ = self.file.flush();
    }

    fn set_resource(&mut self, res: &Resource) {
        self.resource = res.clone();
    }
}

/// One span as a flat JSON object.
fn format_span(span: &SpanData, service: &str) -> JsonValue {
    let attributes: Map<String, JsonValue> = span
        .attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            let fields: Map<String, JsonValue> = event
                .attributes
                .iter()
                .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
                .collect();
            json!({
                "name": event.name,
                "timeUnixNano": unix_nanos(event.timestamp),
                "attributes": fields,
            })
        })
        .collect();

    let parent = if span.parent_span_id == SpanId::INVALID {
        JsonValue::Null
    } else {
        json!(format!("{:016x}", span.parent_span_id))
    };

    let (status, message) = match &span.status {
        Status::Unset => ("unset", String::new()),
        Status::Ok => ("ok", String::new()),
        Status::Error { description } => ("error", description.to_string()),
    };

    let duration_us = span
        .end_time
        .duration_since(span.start_time)
        .map(|d| d.as_micros())
        .unwrap_or_default();

    json!({
        "service": service,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "startTimeUnixNano": unix_nanos(span.start_time),
        "durationMicros": duration_us.to_string(),
        "attributes": attributes,
        "events": events,
        "status": status,
        "statusMessage": message,
    })
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

/// Creates a tracer provider that exports every span to `path` as it ends.
///
/// # Errors
///
/// Fails when the file or its parent directory cannot be created.
pub fn create_tracer_provider(path: &Path, resource: Resource) -> io::Result<TracerProvider> {
    let exporter = FileSpanExporter::open(path, resource.clone())?;

    Ok(TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span, Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_are_written_as_json_lines() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("traces").join("spans.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "eventboard-test")]);

        let provider = create_tracer_provider(&path, resource).expect("provider");
        let tracer = provider.tracer("test");
        let mut span = tracer.start("fetch_page");
        span.set_attribute(KeyValue::new("page", 2_i64));
        span.end();
        drop(tracer);
        drop(provider);

        let contents = std::fs::read_to_string(&path).expect("trace file");
        let line = contents.lines().next().expect("one span");
        let value: JsonValue = serde_json::from_str(line).expect("json line");
        assert_eq!(value["name"], "fetch_page");
        assert_eq!(value["attributes"]["page"], 2);
        assert_eq!(value["service"], "eventboard-test");
        assert!(value["parentSpanId"].is_null());
    }
}
