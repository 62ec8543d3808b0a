//! annealer - resolves built releases into stemcell-compiled releases
//!
//! Reads a lockfile of releases, serves what it can from publishable caches,
//! compiles the rest on one ephemeral deployment, publishes the results and
//! rewrites the lockfile so every entry points at a compiled artifact.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{Interrupt, ResolveOptions, ResolveSummary, ResolveUseCase};
pub use config::{Annealfile, Config};
pub use error::{ErrorKind, ResolveError, ResolveResult};
