//! Error types for annealer
//!
//! Uses `thiserror` for library errors. Every variant reports an [`ErrorKind`]
//! and, where one applies, the release it concerns, so callers can tell an
//! integrity failure from a transport failure without matching on strings.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::{LockfileError, PlatformError, SourceError, StoreError};
use crate::domain::value_objects::{ReleaseId, Stemcell};

/// Result type alias for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Coarse classification of a [`ResolveError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inconsistent manifest or configuration
    Configuration,
    /// Upload, download or remote call failed
    Transport,
    /// Digest mismatch or unverifiable digest
    Integrity,
    /// The compilation deployment could not be removed
    Cleanup,
    /// The run was interrupted between stages
    Interrupted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::Integrity => "integrity",
            ErrorKind::Cleanup => "cleanup",
            ErrorKind::Interrupted => "interrupted",
        };
        f.write_str(name)
    }
}

/// Main error type for the resolution pipeline
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A lock entry references a release source that is not configured
    #[error("release '{release}' references unknown release source '{source_id}'")]
    UnknownSource { release: ReleaseId, source_id: String },

    /// The upload target id does not name a configured release source
    #[error("upload target '{target_id}' is not a configured release source")]
    UnknownUploadTarget { target_id: String },

    /// The stemcell tarball is not the one the lockfile asks for
    #[error("stemcell {actual} does not match the lockfile's stemcell criteria {expected}")]
    StemcellMismatch { expected: Stemcell, actual: Stemcell },

    /// A lock entry whose compiled file name would leave its directory
    #[error("release '{release}' cannot name a compiled tarball: name, version and stemcell must not contain path separators")]
    UnsafeReleaseName { release: ReleaseId },

    /// A resolved release has no lock entry
    #[error("no release named '{}' exists in the lockfile", .release.name)]
    MissingLockEntry { release: ReleaseId },

    /// More than one lock entry shares a name
    #[error("release '{name}' appears more than once in the lockfile")]
    DuplicateLockEntry { name: String },

    /// A resolved release disagrees with the locked version
    #[error("release '{}' is locked at version {locked_version} but {} was resolved", .release.name, .release.version)]
    VersionMismatch {
        release: ReleaseId,
        locked_version: String,
    },

    /// A release source failed
    #[error("{action} {release}")]
    Source {
        release: ReleaseId,
        action: &'static str,
        #[source]
        source: SourceError,
    },

    /// The upload target failed
    #[error("uploading compiled release {release} failed")]
    Store {
        release: ReleaseId,
        #[source]
        source: StoreError,
    },

    /// The compilation platform failed
    #[error("{action}")]
    Platform {
        release: Option<ReleaseId>,
        action: String,
        #[source]
        source: PlatformError,
    },

    /// Local file handling failed
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        release: Option<ReleaseId>,
        #[source]
        source: std::io::Error,
    },

    /// Loading or saving the lockfile failed
    #[error("lockfile {}", .path.display())]
    Lockfile {
        path: PathBuf,
        #[source]
        source: LockfileError,
    },

    /// The exported artifact does not match its declared digest
    #[error("compiled release {release} has an incorrect digest: declared {declared}, computed {computed}")]
    DigestMismatch {
        release: ReleaseId,
        declared: String,
        computed: String,
    },

    /// The declared digest cannot be used for verification
    #[error("cannot verify compiled release {release}: declared digest '{declared}' {reason}")]
    MalformedDigest {
        release: ReleaseId,
        declared: String,
        reason: String,
    },

    /// Deleting the compilation deployment failed
    #[error("deleting compilation deployment '{deployment}' failed{}", preceding_note(.preceding))]
    Teardown {
        deployment: String,
        #[source]
        source: PlatformError,
        preceding: Option<Box<ResolveError>>,
    },

    /// The run was interrupted by the user
    #[error("interrupted before {stage}")]
    Interrupted { stage: &'static str },
}

fn preceding_note(preceding: &Option<Box<ResolveError>>) -> String {
    match preceding {
        Some(err) => format!(" after an earlier failure: {err}"),
        None => String::new(),
    }
}

impl ResolveError {
    /// The taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::UnknownSource { .. }
            | ResolveError::UnknownUploadTarget { .. }
            | ResolveError::StemcellMismatch { .. }
            | ResolveError::MissingLockEntry { .. }
            | ResolveError::DuplicateLockEntry { .. }
            | ResolveError::UnsafeReleaseName { .. }
            | ResolveError::VersionMismatch { .. } => ErrorKind::Configuration,
            ResolveError::Source { .. }
            | ResolveError::Store { .. }
            | ResolveError::Platform { .. }
            | ResolveError::Io { .. }
            | ResolveError::Lockfile { .. } => ErrorKind::Transport,
            ResolveError::DigestMismatch { .. } | ResolveError::MalformedDigest { .. } => {
                ErrorKind::Integrity
            }
            ResolveError::Teardown { .. } => ErrorKind::Cleanup,
            ResolveError::Interrupted { .. } => ErrorKind::Interrupted,
        }
    }

    /// The release this error concerns, if any
    pub fn release(&self) -> Option<&ReleaseId> {
        match self {
            ResolveError::UnknownSource { release, .. }
            | ResolveError::MissingLockEntry { release }
            | ResolveError::UnsafeReleaseName { release }
            | ResolveError::VersionMismatch { release, .. }
            | ResolveError::Source { release, .. }
            | ResolveError::Store { release, .. }
            | ResolveError::DigestMismatch { release, .. }
            | ResolveError::MalformedDigest { release, .. } => Some(release),
            ResolveError::Platform { release, .. } | ResolveError::Io { release, .. } => {
                release.as_ref()
            }
            ResolveError::Teardown { preceding, .. } => {
                preceding.as_deref().and_then(ResolveError::release)
            }
            ResolveError::UnknownUploadTarget { .. }
            | ResolveError::StemcellMismatch { .. }
            | ResolveError::DuplicateLockEntry { .. }
            | ResolveError::Lockfile { .. }
            | ResolveError::Interrupted { .. } => None,
        }
    }

    /// The error that was already in flight when teardown failed
    pub fn preceding(&self) -> Option<&ResolveError> {
        match self {
            ResolveError::Teardown { preceding, .. } => preceding.as_deref(),
            _ => None,
        }
    }
}
