//! LockfileRepository port - abstraction for lockfile persistence
//!
//! This trait allows the domain layer to load/save lockfiles
//! without knowing about TOML serialization details.

use std::path::Path;

use thiserror::Error;

use crate::domain::entities::Lockfile;

/// Result type for lockfile operations
pub type LockfileResult<T> = Result<T, LockfileError>;

/// Lockfile operation errors
#[derive(Debug, Error)]
pub enum LockfileError {
    #[error("Invalid lockfile format: {0}")]
    InvalidFormat(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstract repository for lockfile persistence
pub trait LockfileRepository {
    /// Load lockfile from path
    fn load(&self, path: &Path) -> LockfileResult<Lockfile>;

    /// Replace the lockfile at path as a whole
    ///
    /// Implementations must render fully before touching the file, so a
    /// failed save leaves the previous contents intact.
    fn save(&self, lockfile: &Lockfile, path: &Path) -> LockfileResult<()>;
}
