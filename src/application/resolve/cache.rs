//! Cache resolution
//!
//! Looks for each build candidate in the publishable sources before anything
//! is compiled. A declared hit that then fails to download is fatal; it is
//! never quietly turned into a build.

use std::path::Path;

use crate::domain::entities::{RemoteRelease, Requirement, ResolvedRelease};
use crate::domain::ports::{ResolveEvent, ResolveEventSink};
use crate::domain::services::SourceRegistry;
use crate::domain::value_objects::Stemcell;
use crate::error::{ResolveError, ResolveResult};

use super::Interrupt;

/// Cache hits and the candidates that still need compiling, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheOutcome {
    pub resolved: Vec<ResolvedRelease>,
    pub remaining: Vec<RemoteRelease>,
}

pub fn resolve_from_cache(
    registry: &SourceRegistry,
    candidates: Vec<RemoteRelease>,
    stemcell: &Stemcell,
    releases_dir: &Path,
    events: &dyn ResolveEventSink,
    interrupt: &Interrupt,
) -> ResolveResult<CacheOutcome> {
    events.on_event(ResolveEvent::CacheSearchStarted {
        candidates: candidates.len(),
    });

    let mut outcome = CacheOutcome::default();
    for candidate in candidates {
        interrupt.check("searching for pre-compiled releases")?;

        let requirement = Requirement::new(candidate.release.clone(), stemcell.clone());
        let found = registry
            .find_compiled(&requirement)
            .map_err(|source| ResolveError::Source {
                release: candidate.release.clone(),
                action: "error searching for a pre-compiled release of",
                source,
            })?;

        let Some(remote) = found else {
            events.on_event(ResolveEvent::CacheMiss {
                release: candidate.release.clone(),
            });
            outcome.remaining.push(candidate);
            continue;
        };

        let local = registry
            .download(releases_dir, &remote)
            .map_err(|source| ResolveError::Source {
                release: candidate.release.clone(),
                action: "error downloading pre-compiled release",
                source,
            })?;

        events.on_event(ResolveEvent::CacheHit {
            release: candidate.release.clone(),
            source_id: remote.source_id.clone(),
        });
        outcome.resolved.push(ResolvedRelease {
            remote,
            digest: local.digest,
        });
    }

    Ok(outcome)
}
