//! TOML Lockfile Repository
//!
//! Implements the LockfileRepository port using TOML format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{LockEntry, Lockfile};
use crate::domain::ports::lockfile_repository::{LockfileError, LockfileRepository};
use crate::domain::value_objects::Stemcell;
use crate::infrastructure::fs::LocalFs;

/// TOML-based lockfile repository
///
/// Stores the lockfile (conventionally `Annealfile.lock`) as TOML.
pub struct TomlLockfileRepository {
    fs: LocalFs,
}

impl TomlLockfileRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlLockfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlStemcell {
    os: String,
    version: String,
}

/// TOML representation of a release entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlRelease {
    name: String,
    version: String,
    remote_source: String,
    remote_path: String,
    #[serde(default)]
    digest: String,
}

/// TOML representation of the lockfile
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlLockfile {
    stemcell_criteria: TomlStemcell,
    #[serde(default)]
    releases: Vec<TomlRelease>,
}

/// Parse lockfile TOML into the domain entity
pub fn parse_lockfile(content: &str) -> Result<Lockfile, LockfileError> {
    let parsed: TomlLockfile =
        toml::from_str(content).map_err(|e| LockfileError::InvalidFormat(e.to_string()))?;

    let releases = parsed
        .releases
        .into_iter()
        .map(|r| LockEntry::new(r.name, r.version, r.remote_source, r.remote_path, r.digest))
        .collect();

    Ok(Lockfile::with_releases(
        Stemcell::new(parsed.stemcell_criteria.os, parsed.stemcell_criteria.version),
        releases,
    ))
}

/// Render the domain entity as lockfile TOML, preserving entry order
pub fn render_lockfile(lockfile: &Lockfile) -> Result<String, LockfileError> {
    let criteria = lockfile.stemcell_criteria();
    let toml_lockfile = TomlLockfile {
        stemcell_criteria: TomlStemcell {
            os: criteria.os.clone(),
            version: criteria.version.clone(),
        },
        releases: lockfile
            .releases()
            .iter()
            .map(|entry| TomlRelease {
                name: entry.name().to_string(),
                version: entry.version().to_string(),
                remote_source: entry.remote_source().to_string(),
                remote_path: entry.remote_path().to_string(),
                digest: entry.digest().to_string(),
            })
            .collect(),
    };

    toml::to_string_pretty(&toml_lockfile).map_err(|e| LockfileError::InvalidFormat(e.to_string()))
}

impl LockfileRepository for TomlLockfileRepository {
    fn load(&self, path: &Path) -> Result<Lockfile, LockfileError> {
        let content = std::fs::read_to_string(path)?;
        parse_lockfile(&content)
    }

    fn save(&self, lockfile: &Lockfile, path: &Path) -> Result<(), LockfileError> {
        let content = render_lockfile(lockfile)?;
        self.fs.write_atomic(path, content.as_bytes())?;
        Ok(())
    }
}
