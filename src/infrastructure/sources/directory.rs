//! Directory release source
//!
//! A local directory that holds release tarballs. It can serve built
//! releases, act as a cache of compiled ones, and receive uploads.
//!
//! Compiled releases sit at the top level as
//! `<name>-<version>-<os>-<os_version>.tgz`. Built releases are addressed by
//! the lock entry's `remote_path`, relative to the directory.

use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use crate::domain::entities::{LocalRelease, RemoteRelease, Requirement};
use crate::domain::ports::{
    ReleaseSource, ReleaseUploader, SourceError, SourceResult, StoreError, StoreResult,
};
use crate::infrastructure::fs::LocalFs;

#[derive(Debug, Clone)]
pub struct DirectoryReleaseSource {
    id: String,
    root: PathBuf,
    publishable: bool,
    fs: LocalFs,
}

impl DirectoryReleaseSource {
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>, publishable: bool) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            publishable,
            fs: LocalFs::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a remote path inside the directory; escaping it is refused
    fn locate(&self, remote_path: &str) -> SourceResult<PathBuf> {
        let relative = Path::new(remote_path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || remote_path.is_empty() {
            return Err(SourceError::Other(format!(
                "remote path '{remote_path}' is not inside release source '{}'",
                self.id
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl ReleaseSource for DirectoryReleaseSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn publishable(&self) -> bool {
        self.publishable
    }

    fn find_matching(&self, requirement: &Requirement) -> SourceResult<Option<RemoteRelease>> {
        let file_name = requirement.compiled_file_name();
        let found = self.root.join(&file_name).is_file();
        Ok(found.then(|| RemoteRelease::new(requirement.release.clone(), &self.id, file_name)))
    }

    fn download(&self, releases_dir: &Path, remote: &RemoteRelease) -> SourceResult<LocalRelease> {
        let from = self.locate(&remote.remote_path)?;
        let file_name = from
            .file_name()
            .ok_or_else(|| SourceError::NotFound(remote.remote_path.clone()))?;
        let local_path = releases_dir.join(file_name);

        let digest = self.fs.copy_hashed(&from, &local_path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(from.display().to_string())
            } else {
                SourceError::Io(err)
            }
        })?;

        Ok(LocalRelease {
            release: remote.release.clone(),
            local_path,
            digest,
            sha1: None,
        })
    }
}

impl ReleaseUploader for DirectoryReleaseSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn upload(
        &self,
        requirement: &Requirement,
        content: &mut dyn Read,
    ) -> StoreResult<RemoteRelease> {
        if !self.root.is_dir() {
            return Err(StoreError::Rejected(format!(
                "upload target directory {} does not exist",
                self.root.display()
            )));
        }
        let file_name = requirement.compiled_file_name();
        let destination = self
            .locate(&file_name)
            .map_err(|err| StoreError::Rejected(err.to_string()))?;
        self.fs.stream_atomic(&destination, content)?;
        Ok(RemoteRelease::new(requirement.release.clone(), &self.id, file_name))
    }
}
