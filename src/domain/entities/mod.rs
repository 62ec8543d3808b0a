//! Domain Entities
//!
//! - `Lockfile` / `LockEntry` - the persisted record of resolved releases
//! - `Requirement`, `RemoteRelease`, `LocalRelease`, `ResolvedRelease` - what flows
//!   through the resolution pipeline

mod lockfile;
mod requirement;

pub use lockfile::{LockEntry, Lockfile};
pub use requirement::{LocalRelease, RemoteRelease, Requirement, ResolvedRelease};
