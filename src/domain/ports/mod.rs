//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compilation_platform;
pub mod lockfile_repository;
pub mod release_source;
pub mod release_uploader;
pub mod resolve_events;

pub use compilation_platform::{
    CompilationPlatform, ExportedRelease, PlatformError, PlatformResult,
};
pub use lockfile_repository::{LockfileError, LockfileRepository, LockfileResult};
pub use release_source::{ReleaseSource, SourceError, SourceResult};
pub use release_uploader::{ReleaseUploader, StoreError, StoreResult};
pub use resolve_events::{NoopEventSink, ResolveEvent, ResolveEventSink};
