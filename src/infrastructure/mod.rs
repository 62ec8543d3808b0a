//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic local file writes
//! - `repositories/` - Lockfile persistence
//! - `sources/` - Release sources and upload targets
//! - `platform/` - Compilation platform (BOSH CLI)
//! - `events/` - Console and JSON event sinks

pub mod events;
pub mod fs;
pub mod platform;
pub mod repositories;
pub mod sources;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use platform::BoshCliPlatform;
pub use repositories::TomlLockfileRepository;
pub use sources::{build_registry, build_uploader, DirectoryReleaseSource};
