//! Registry of configured release sources
//!
//! Sources are kept in registration order. That order is the cache
//! precedence: when several publishable sources hold a matching release,
//! the one registered first wins.

use std::path::Path;

use crate::domain::entities::{LocalRelease, RemoteRelease, Requirement};
use crate::domain::ports::{ReleaseSource, SourceError, SourceResult};

#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Box<dyn ReleaseSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; it ranks after every source registered before it
    pub fn register(&mut self, source: Box<dyn ReleaseSource>) {
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Box<dyn ReleaseSource>) -> Self {
        self.register(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&dyn ReleaseSource> {
        self.sources
            .iter()
            .find(|source| source.id() == id)
            .map(|source| source.as_ref())
    }

    /// Publishable sources, in registration order
    pub fn publishable(&self) -> impl Iterator<Item = &dyn ReleaseSource> {
        self.sources
            .iter()
            .filter(|source| source.publishable())
            .map(|source| source.as_ref())
    }

    /// First publishable source holding an exact match wins
    pub fn find_compiled(&self, requirement: &Requirement) -> SourceResult<Option<RemoteRelease>> {
        for source in self.publishable() {
            if let Some(remote) = source.find_matching(requirement)? {
                return Ok(Some(remote));
            }
        }
        Ok(None)
    }

    /// Download from whichever source `remote` names
    pub fn download(&self, releases_dir: &Path, remote: &RemoteRelease) -> SourceResult<LocalRelease> {
        let source = self.find_by_id(&remote.source_id).ok_or_else(|| {
            SourceError::Other(format!("release source '{}' is not configured", remote.source_id))
        })?;
        source.download(releases_dir, remote)
    }
}
