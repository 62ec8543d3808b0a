//! Resolve Event Port
//!
//! Provides an observable interface for the resolution pipeline.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::value_objects::{ReleaseId, Stemcell};

/// Event emitted while resolving releases
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveEvent {
    /// Lockfile loaded
    Started { lockfile: PathBuf, release_count: usize },

    /// Lock entries split into publishable and build candidates
    Classified { publishable: usize, candidates: usize },

    /// Every lock entry already points at a publishable source
    AllCompiled,

    /// Searching publishable sources for pre-compiled releases
    CacheSearchStarted { candidates: usize },

    CacheHit { release: ReleaseId, source_id: String },

    CacheMiss { release: ReleaseId },

    /// Releases that must be compiled remotely
    CompilationNeeded { count: usize },

    SessionCreated { deployment: String },

    ReleaseUploaded { release: ReleaseId },

    StemcellUploaded { stemcell: Stemcell },

    Deployed { deployment: String },

    ReleaseExported { release: ReleaseId, path: PathBuf },

    DeploymentDeleted { deployment: String },

    /// Non-fatal problem, e.g. best-effort clean-up failed
    Warning { message: String },

    ReleasePublished {
        release: ReleaseId,
        source_id: String,
        remote_path: String,
    },

    /// Lockfile rewritten
    Completed { lockfile: PathBuf, updated: usize },
}

/// Trait for receiving resolve events
///
/// Implementations can be:
/// - ConsoleEventSink: human readable lines on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait ResolveEventSink {
    /// Handle a resolve event
    fn on_event(&self, event: ResolveEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ResolveEventSink for NoopEventSink {
    fn on_event(&self, _event: ResolveEvent) {}
}
