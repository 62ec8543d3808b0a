//! Publishing compiled releases to the upload target

use std::fs::File;

use crate::domain::entities::{LocalRelease, Requirement, ResolvedRelease};
use crate::domain::ports::ReleaseUploader;
use crate::error::{ResolveError, ResolveResult};

/// Upload a verified release exactly once and report where it landed
pub fn publish(
    uploader: &dyn ReleaseUploader,
    requirement: &Requirement,
    local: &LocalRelease,
) -> ResolveResult<ResolvedRelease> {
    let mut file = File::open(&local.local_path).map_err(|source| ResolveError::Io {
        path: local.local_path.clone(),
        release: Some(local.release.clone()),
        source,
    })?;

    let remote = uploader
        .upload(requirement, &mut file)
        .map_err(|source| ResolveError::Store {
            release: local.release.clone(),
            source,
        })?;

    Ok(ResolvedRelease {
        remote,
        digest: local.digest.clone(),
    })
}
