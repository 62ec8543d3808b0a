//! Requirement classification
//!
//! Splits lock entries into those already served by a publishable source
//! and the built releases that still need a compiled counterpart. A lockfile
//! that names a release twice is rejected here, before any remote work.

use crate::domain::entities::{Lockfile, RemoteRelease, Requirement};
use crate::domain::services::SourceRegistry;
use crate::domain::value_objects::ReleaseId;
use crate::error::{ResolveError, ResolveResult};

/// Disjoint partition of a lockfile, both halves in lockfile order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub publishable: Vec<ReleaseId>,
    pub candidates: Vec<RemoteRelease>,
}

impl Classification {
    pub fn is_fully_compiled(&self) -> bool {
        self.candidates.is_empty()
    }
}

pub fn classify(lockfile: &Lockfile, registry: &SourceRegistry) -> ResolveResult<Classification> {
    if let Some(name) = lockfile.duplicate_names().first() {
        return Err(ResolveError::DuplicateLockEntry {
            name: name.to_string(),
        });
    }

    let mut classification = Classification::default();

    for entry in lockfile.releases() {
        let source = registry.find_by_id(entry.remote_source()).ok_or_else(|| {
            ResolveError::UnknownSource {
                release: entry.release_id(),
                source_id: entry.remote_source().to_string(),
            }
        })?;

        if source.publishable() {
            classification.publishable.push(entry.release_id());
        } else {
            let requirement =
                Requirement::new(entry.release_id(), lockfile.stemcell_criteria().clone());
            if !requirement.has_plain_file_name() {
                return Err(ResolveError::UnsafeReleaseName {
                    release: entry.release_id(),
                });
            }
            classification.candidates.push(RemoteRelease::new(
                entry.release_id(),
                entry.remote_source(),
                entry.remote_path(),
            ));
        }
    }

    Ok(classification)
}

/// Build candidates paired with the lockfile's stemcell criteria
pub fn find_build_candidates(
    lockfile: &Lockfile,
    registry: &SourceRegistry,
) -> ResolveResult<Vec<Requirement>> {
    let classification = classify(lockfile, registry)?;
    Ok(classification
        .candidates
        .into_iter()
        .map(|remote| Requirement::new(remote.release, lockfile.stemcell_criteria().clone()))
        .collect())
}
