//! Lockfile reconciliation
//!
//! Folds resolved releases into a copy of the lockfile. Only entries named by
//! a resolved release change; everything else is carried over untouched.

use crate::domain::entities::{Lockfile, ResolvedRelease};
use crate::error::{ResolveError, ResolveResult};

pub fn reconcile(lockfile: &Lockfile, resolved: &[ResolvedRelease]) -> ResolveResult<Lockfile> {
    let duplicates = lockfile.duplicate_names();
    let mut updated = lockfile.clone();

    for release in resolved {
        let id = release.release();
        if duplicates.contains(&id.name.as_str()) {
            return Err(ResolveError::DuplicateLockEntry {
                name: id.name.clone(),
            });
        }

        let entry = updated
            .get_mut(&id.name)
            .ok_or_else(|| ResolveError::MissingLockEntry {
                release: id.clone(),
            })?;

        if entry.version() != id.version {
            return Err(ResolveError::VersionMismatch {
                release: id.clone(),
                locked_version: entry.version().to_string(),
            });
        }

        entry.relocate(
            release.remote.source_id.as_str(),
            release.remote.remote_path.as_str(),
            release.digest.hex(),
        );
    }

    Ok(updated)
}
