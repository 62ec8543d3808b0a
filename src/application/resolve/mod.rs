//! Resolve Use Case
//!
//! Turns the built releases of a lockfile into releases compiled for its
//! stemcell: from a publishable cache where possible, otherwise by compiling
//! them on an ephemeral deployment.

mod cache;
mod interrupt;
mod options;
mod publish;
mod result;
mod session;
mod use_case;

pub use cache::{resolve_from_cache, CacheOutcome};
pub use interrupt::Interrupt;
pub use options::ResolveOptions;
pub use publish::publish;
pub use result::{Resolution, ResolveSummary};
pub use session::{CompilationSession, CompiledBatch, SessionState};
pub use use_case::ResolveUseCase;
