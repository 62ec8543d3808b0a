//! Resolve Options

use std::path::PathBuf;

/// Options for the resolve use case
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Lockfile to read and, on success, rewrite
    pub lockfile_path: PathBuf,
    /// Stemcell tarball uploaded when anything needs compiling
    pub stemcell_file: PathBuf,
    /// Directory releases are downloaded and exported into
    pub releases_dir: PathBuf,
}

impl ResolveOptions {
    pub fn new(lockfile_path: impl Into<PathBuf>, stemcell_file: impl Into<PathBuf>) -> Self {
        Self {
            lockfile_path: lockfile_path.into(),
            stemcell_file: stemcell_file.into(),
            releases_dir: PathBuf::from("releases"),
        }
    }

    pub fn with_releases_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.releases_dir = dir.into();
        self
    }
}
