//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod lockfile;

pub use lockfile::{parse_lockfile, render_lockfile, TomlLockfileRepository};
