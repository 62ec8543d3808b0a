//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ResolveUseCase` - Orchestrates the resolve flow (load, classify, fetch or compile,
//!   publish, update lockfile)

pub mod resolve;

pub use resolve::{
    CompilationSession, CompiledBatch, Interrupt, Resolution, ResolveOptions, ResolveSummary,
    ResolveUseCase, SessionState,
};
