//! Resolve Result
//!
//! Result types for resolve operations.

use crate::domain::entities::{Lockfile, ResolvedRelease};
use crate::domain::value_objects::ReleaseId;

/// Releases resolved by one pass of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub from_cache: Vec<ResolvedRelease>,
    pub compiled: Vec<ResolvedRelease>,
}

impl Resolution {
    /// Cache hits first, then compiled releases
    pub fn all(&self) -> impl Iterator<Item = &ResolvedRelease> {
        self.from_cache.iter().chain(self.compiled.iter())
    }

    pub fn len(&self) -> usize {
        self.from_cache.len() + self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct ResolveSummary {
    /// Entries whose source was already publishable
    pub publishable: Vec<ReleaseId>,
    pub resolution: Resolution,
    /// The lockfile as it stands after the run
    pub lockfile: Lockfile,
    /// Whether the lockfile was rewritten
    pub lockfile_written: bool,
}
