//! ReleaseSource port - where release tarballs come from
//!
//! A source is either publishable (it holds releases already compiled for a
//! stemcell) or built-only (it holds raw releases that still need compiling).

use std::path::Path;

use thiserror::Error;

use crate::domain::entities::{LocalRelease, RemoteRelease, Requirement};

/// Result type for release source operations
pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("release not found at '{0}'")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// A configured origin of release tarballs
pub trait ReleaseSource {
    /// Identifier referenced by lock entries
    fn id(&self) -> &str;

    /// Whether releases found here are already compiled and trusted
    fn publishable(&self) -> bool;

    /// Look for a release matching all four requirement fields exactly
    fn find_matching(&self, requirement: &Requirement) -> SourceResult<Option<RemoteRelease>>;

    /// Download a release into `releases_dir`, digesting its bytes on the way
    fn download(&self, releases_dir: &Path, remote: &RemoteRelease) -> SourceResult<LocalRelease>;
}
