//! JSON Event Sink
//!
//! Outputs resolve events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::domain::ports::{ResolveEvent, ResolveEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: Value) {
        if let Value::Object(fields) = &mut event {
            fields.insert(
                "ts".to_string(),
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON body of an event, without the timestamp
pub fn event_json(event: &ResolveEvent) -> Value {
    match event {
        ResolveEvent::Started {
            lockfile,
            release_count,
        } => json!({
            "event": "start",
            "lockfile": lockfile.display().to_string(),
            "release_count": release_count,
        }),

        ResolveEvent::Classified {
            publishable,
            candidates,
        } => json!({
            "event": "classified",
            "publishable": publishable,
            "candidates": candidates,
        }),

        ResolveEvent::AllCompiled => json!({ "event": "all_compiled" }),

        ResolveEvent::CacheSearchStarted { candidates } => json!({
            "event": "cache_search",
            "candidates": candidates,
        }),

        ResolveEvent::CacheHit { release, source_id } => json!({
            "event": "cache_hit",
            "release": release.to_string(),
            "source": source_id,
        }),

        ResolveEvent::CacheMiss { release } => json!({
            "event": "cache_miss",
            "release": release.to_string(),
        }),

        ResolveEvent::CompilationNeeded { count } => json!({
            "event": "compilation_needed",
            "count": count,
        }),

        ResolveEvent::SessionCreated { deployment } => json!({
            "event": "session_created",
            "deployment": deployment,
        }),

        ResolveEvent::ReleaseUploaded { release } => json!({
            "event": "release_uploaded",
            "release": release.to_string(),
        }),

        ResolveEvent::StemcellUploaded { stemcell } => json!({
            "event": "stemcell_uploaded",
            "stemcell": stemcell.to_string(),
        }),

        ResolveEvent::Deployed { deployment } => json!({
            "event": "deployed",
            "deployment": deployment,
        }),

        ResolveEvent::ReleaseExported { release, path } => json!({
            "event": "release_exported",
            "release": release.to_string(),
            "path": path.display().to_string(),
        }),

        ResolveEvent::DeploymentDeleted { deployment } => json!({
            "event": "deployment_deleted",
            "deployment": deployment,
        }),

        ResolveEvent::Warning { message } => json!({
            "event": "warning",
            "message": message,
        }),

        ResolveEvent::ReleasePublished {
            release,
            source_id,
            remote_path,
        } => json!({
            "event": "release_published",
            "release": release.to_string(),
            "target": source_id,
            "remote_path": remote_path,
        }),

        ResolveEvent::Completed { lockfile, updated } => json!({
            "event": "complete",
            "status": "success",
            "lockfile": lockfile.display().to_string(),
            "updated": updated,
        }),
    }
}

impl ResolveEventSink for JsonEventSink {
    fn on_event(&self, event: ResolveEvent) {
        self.write_event(event_json(&event));
    }
}
