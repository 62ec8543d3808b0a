//! ReleaseUploader port - the destination store for compiled releases

use std::io::Read;

use thiserror::Error;

use crate::domain::entities::{RemoteRelease, Requirement};

/// Result type for upload operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// A store compiled releases are published to
///
/// Overwrite semantics are the store's business. Callers make exactly one
/// `upload` attempt per release.
pub trait ReleaseUploader {
    fn id(&self) -> &str;

    /// Upload the release bytes under a key derived from `requirement`
    fn upload(&self, requirement: &Requirement, content: &mut dyn Read)
        -> StoreResult<RemoteRelease>;
}
