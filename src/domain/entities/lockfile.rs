//! Lockfile entity - records where each release was resolved from
//!
//! It's a pure data structure - I/O operations are handled by LockfileRepository.
//! Entry order is significant to downstream consumers and is never changed.

use std::collections::BTreeSet;

use crate::domain::value_objects::{ReleaseId, Stemcell};

/// Lock entry for a single release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    name: String,
    version: String,
    remote_source: String,
    remote_path: String,
    /// Hex SHA-256 of the release tarball
    digest: String,
}

impl LockEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        remote_source: impl Into<String>,
        remote_path: impl Into<String>,
        digest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            remote_source: remote_source.into(),
            remote_path: remote_path.into(),
            digest: digest.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn remote_source(&self) -> &str {
        &self.remote_source
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn release_id(&self) -> ReleaseId {
        ReleaseId::new(&self.name, &self.version)
    }

    /// Point this entry at a new location; name and version stay fixed
    pub fn relocate(
        &mut self,
        remote_source: impl Into<String>,
        remote_path: impl Into<String>,
        digest: impl Into<String>,
    ) {
        self.remote_source = remote_source.into();
        self.remote_path = remote_path.into();
        self.digest = digest.into();
    }
}

/// The lock manifest: one stemcell target and an ordered list of releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    stemcell_criteria: Stemcell,
    releases: Vec<LockEntry>,
}

impl Lockfile {
    pub fn new(stemcell_criteria: Stemcell) -> Self {
        Self {
            stemcell_criteria,
            releases: Vec::new(),
        }
    }

    pub fn with_releases(stemcell_criteria: Stemcell, releases: Vec<LockEntry>) -> Self {
        Self {
            stemcell_criteria,
            releases,
        }
    }

    pub fn stemcell_criteria(&self) -> &Stemcell {
        &self.stemcell_criteria
    }

    pub fn releases(&self) -> &[LockEntry] {
        &self.releases
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn push(&mut self, entry: LockEntry) {
        self.releases.push(entry);
    }

    /// Get an entry by release name
    pub fn get(&self, name: &str) -> Option<&LockEntry> {
        self.releases.iter().find(|entry| entry.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut LockEntry> {
        self.releases.iter_mut().find(|entry| entry.name == name)
    }

    /// Names that occur more than once, in first-seen order
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut duplicates = Vec::new();
        for entry in &self.releases {
            let name = entry.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}
