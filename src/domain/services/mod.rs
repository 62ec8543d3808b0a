//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod classifier;
mod reconciler;
mod source_registry;
mod verifier;
mod workload;

pub use classifier::{classify, find_build_candidates, Classification};
pub use reconciler::reconcile;
pub use source_registry::SourceRegistry;
pub use verifier::verify;
pub use workload::{render_compilation_manifest, CompilationManifest};
