//! Domain Layer
//!
//! The core of annealer - release resolution logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Lockfile, requirements and artifact locators
//! - `value_objects/` - Immutable value types (ReleaseId, Stemcell, Digest)
//! - `services/` - Classification, verification, reconciliation, manifest rendering
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
