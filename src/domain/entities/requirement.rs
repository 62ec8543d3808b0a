//! Requirement and artifact locator entities

use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::{Digest, ReleaseId, Stemcell};

/// A release that must be available compiled against a stemcell
///
/// Two requirements are equivalent iff all four fields are equal; this is
/// the key used for cache lookups and for naming uploads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub release: ReleaseId,
    pub stemcell: Stemcell,
}

impl Requirement {
    pub fn new(release: ReleaseId, stemcell: Stemcell) -> Self {
        Self { release, stemcell }
    }

    /// Conventional file name of the compiled tarball
    pub fn compiled_file_name(&self) -> String {
        format!(
            "{}-{}-{}-{}.tgz",
            self.release.name, self.release.version, self.stemcell.os, self.stemcell.version
        )
    }

    /// Whether [`Self::compiled_file_name`] is a single plain path component
    pub fn has_plain_file_name(&self) -> bool {
        let file_name = self.compiled_file_name();
        let mut components = Path::new(&file_name).components();
        matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none()
            && !file_name.contains('\\')
    }
}

/// Locates a release inside a named source or store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub release: ReleaseId,
    pub source_id: String,
    pub remote_path: String,
}

impl RemoteRelease {
    pub fn new(
        release: ReleaseId,
        source_id: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            release,
            source_id: source_id.into(),
            remote_path: remote_path.into(),
        }
    }
}

/// A release tarball on local disk together with the digest of its bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRelease {
    pub release: ReleaseId,
    pub local_path: PathBuf,
    pub digest: Digest,
    /// SHA-1 of the same bytes, computed only for exports
    pub sha1: Option<String>,
}

/// Where a release now lives and the digest it was verified against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub remote: RemoteRelease,
    pub digest: Digest,
}

impl ResolvedRelease {
    pub fn release(&self) -> &ReleaseId {
        &self.remote.release
    }
}
