//! Artifact verification
//!
//! Compares a digest we computed over exported bytes with the digest the
//! platform declared for them. When several algorithms are declared, the
//! strongest one we also computed is checked. There is no retry: a mismatch
//! means a broken transport or a tampered channel.

use crate::domain::entities::LocalRelease;
use crate::domain::value_objects::{DeclaredDigest, DigestAlgorithm};
use crate::error::{ResolveError, ResolveResult};

pub fn verify(local: &LocalRelease, declared: &str) -> ResolveResult<()> {
    let malformed = |reason: String| ResolveError::MalformedDigest {
        release: local.release.clone(),
        declared: declared.to_string(),
        reason,
    };

    let parsed = DeclaredDigest::parse(declared).map_err(|err| malformed(err.to_string()))?;

    let computed = computed_algorithms(local);
    let (algorithm, expected) = parsed
        .strongest_of(&computed)
        .ok_or_else(|| malformed("declares no sha256 or sha1 member we can check".to_string()))?;

    let actual = match algorithm {
        DigestAlgorithm::Sha1 => local.sha1.as_deref().unwrap_or_default(),
        _ => local.digest.hex(),
    };

    if expected != actual {
        return Err(ResolveError::DigestMismatch {
            release: local.release.clone(),
            declared: format!("{}:{expected}", algorithm.name()),
            computed: format!("{}:{actual}", algorithm.name()),
        });
    }
    Ok(())
}

fn computed_algorithms(local: &LocalRelease) -> Vec<DigestAlgorithm> {
    let mut algorithms = vec![DigestAlgorithm::Sha256];
    if local.sha1.is_some() {
        algorithms.push(DigestAlgorithm::Sha1);
    }
    algorithms
}
