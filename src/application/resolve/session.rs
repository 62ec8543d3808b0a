//! Compilation session
//!
//! One ephemeral deployment per run, driven through
//!
//! ```text
//! Created → ReleasesUploaded → StemcellUploaded → Deployed → Exported → TornDown
//! ```
//!
//! with every state able to fall straight through to `TornDown` on error.
//! [`CompilationSession::run`] owns the lifecycle: whatever the body returns,
//! the deployment is deleted before control goes back to the caller.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::entities::{LocalRelease, RemoteRelease, Requirement};
use crate::domain::ports::{
    CompilationPlatform, PlatformError, PlatformResult, ResolveEvent, ResolveEventSink,
};
use crate::domain::services::{render_compilation_manifest, verify, SourceRegistry};
use crate::domain::value_objects::{HashingWriter, ReleaseId, Stemcell};
use crate::error::{ResolveError, ResolveResult};

use super::Interrupt;

const DEPLOYMENT_PREFIX: &str = "compile-built-releases";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    ReleasesUploaded,
    StemcellUploaded,
    Deployed,
    Exported,
    TornDown,
}

/// Releases exported from a session, verified against their declared digests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBatch {
    pub stemcell: Stemcell,
    pub releases: Vec<LocalRelease>,
}

pub struct CompilationSession<'a> {
    platform: &'a dyn CompilationPlatform,
    events: &'a dyn ResolveEventSink,
    deployment: String,
    state: SessionState,
    releases: Vec<ReleaseId>,
    stemcell: Option<Stemcell>,
}

impl<'a> CompilationSession<'a> {
    /// Run `body` inside a fresh session, then tear the session down
    ///
    /// Teardown happens on every path. A failed deletion fails the run; if the
    /// body had already failed, that error is kept inside the teardown error.
    pub fn run<T>(
        platform: &'a dyn CompilationPlatform,
        events: &'a dyn ResolveEventSink,
        body: impl FnOnce(&mut CompilationSession<'a>) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        let mut session = Self::create(platform, events);
        let outcome = session.acquire().and_then(|()| body(&mut session));

        match (outcome, session.tear_down()) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(err), Ok(())) => Err(err),
            (outcome, Err(source)) => Err(ResolveError::Teardown {
                deployment: session.deployment.clone(),
                source,
                preceding: outcome.err().map(Box::new),
            }),
        }
    }

    fn create(platform: &'a dyn CompilationPlatform, events: &'a dyn ResolveEventSink) -> Self {
        let deployment = format!("{DEPLOYMENT_PREFIX}-{}", Uuid::new_v4());
        events.on_event(ResolveEvent::SessionCreated {
            deployment: deployment.clone(),
        });
        Self {
            platform,
            events,
            deployment,
            state: SessionState::Created,
            releases: Vec::new(),
            stemcell: None,
        }
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn advance(&mut self, from: SessionState, to: SessionState) {
        debug_assert_eq!(self.state, from, "compilation session out of order");
        self.state = to;
    }

    fn acquire(&self) -> ResolveResult<()> {
        self.platform
            .prepare_deployment(&self.deployment)
            .map_err(|source| ResolveError::Platform {
                release: None,
                action: format!("couldn't create deployment {}", self.deployment),
                source,
            })
    }

    /// Fetch each built release from its source and hand it to the platform
    pub fn upload_releases(
        &mut self,
        registry: &SourceRegistry,
        candidates: &[RemoteRelease],
        releases_dir: &Path,
        interrupt: &Interrupt,
    ) -> ResolveResult<()> {
        for candidate in candidates {
            interrupt.check("uploading built releases")?;

            let local = registry.download(releases_dir, candidate).map_err(|source| {
                ResolveError::Source {
                    release: candidate.release.clone(),
                    action: "failure downloading built release",
                    source,
                }
            })?;

            self.platform
                .upload_release(&local.local_path)
                .map_err(|source| ResolveError::Platform {
                    release: Some(candidate.release.clone()),
                    action: format!(
                        "failure uploading release {} to the compilation platform",
                        local.local_path.display()
                    ),
                    source,
                })?;

            self.events.on_event(ResolveEvent::ReleaseUploaded {
                release: candidate.release.clone(),
            });
            self.releases.push(candidate.release.clone());
        }

        self.advance(SessionState::Created, SessionState::ReleasesUploaded);
        Ok(())
    }

    /// Upload the stemcell once and check it is the one the lockfile wants
    pub fn upload_stemcell(
        &mut self,
        stemcell_file: &Path,
        expected: &Stemcell,
    ) -> ResolveResult<Stemcell> {
        let platform_error = |action: &str, source: PlatformError| ResolveError::Platform {
            release: None,
            action: format!("{action} {}", stemcell_file.display()),
            source,
        };

        self.platform
            .upload_stemcell(stemcell_file)
            .map_err(|source| platform_error("failure uploading stemcell", source))?;
        let stemcell = self
            .platform
            .inspect_stemcell(stemcell_file)
            .map_err(|source| platform_error("couldn't parse manifest of stemcell", source))?;

        if &stemcell != expected {
            return Err(ResolveError::StemcellMismatch {
                expected: expected.clone(),
                actual: stemcell,
            });
        }

        self.events.on_event(ResolveEvent::StemcellUploaded {
            stemcell: stemcell.clone(),
        });
        self.stemcell = Some(stemcell.clone());
        self.advance(SessionState::ReleasesUploaded, SessionState::StemcellUploaded);
        Ok(stemcell)
    }

    /// Apply the compilation manifest; this is the build trigger
    pub fn deploy(&mut self) -> ResolveResult<()> {
        let stemcell = self.uploaded_stemcell()?;
        let manifest = render_compilation_manifest(&self.deployment, &self.releases, &stemcell)
            .map_err(|err| ResolveError::Platform {
                release: None,
                action: "couldn't generate compilation manifest".to_string(),
                source: PlatformError::Manifest(err.to_string()),
            })?;

        self.platform
            .deploy(&self.deployment, &manifest)
            .map_err(|source| ResolveError::Platform {
                release: None,
                action: format!("updating the compilation deployment {}", self.deployment),
                source,
            })?;

        self.events.on_event(ResolveEvent::Deployed {
            deployment: self.deployment.clone(),
        });
        self.advance(SessionState::StemcellUploaded, SessionState::Deployed);
        Ok(())
    }

    /// Export, download and verify every compiled release
    pub fn export(
        &mut self,
        releases_dir: &Path,
        interrupt: &Interrupt,
    ) -> ResolveResult<Vec<LocalRelease>> {
        let stemcell = self.uploaded_stemcell()?;
        let mut exported = Vec::with_capacity(self.releases.len());

        for release in &self.releases {
            interrupt.check("exporting compiled releases")?;

            let requirement = Requirement::new(release.clone(), stemcell.clone());
            let local_path = releases_dir.join(requirement.compiled_file_name());
            let local = self.export_one(release, &stemcell, local_path)?;

            self.events.on_event(ResolveEvent::ReleaseExported {
                release: release.clone(),
                path: local.local_path.clone(),
            });
            exported.push(local);
        }

        self.advance(SessionState::Deployed, SessionState::Exported);
        Ok(exported)
    }

    fn export_one(
        &self,
        release: &ReleaseId,
        stemcell: &Stemcell,
        local_path: PathBuf,
    ) -> ResolveResult<LocalRelease> {
        let platform_error = |action: &str, source: PlatformError| ResolveError::Platform {
            release: Some(release.clone()),
            action: format!("{action} {release}"),
            source,
        };
        let io_error = |source: std::io::Error| ResolveError::Io {
            path: local_path.clone(),
            release: Some(release.clone()),
            source,
        };

        let result = self
            .platform
            .export_release(&self.deployment, release, stemcell)
            .map_err(|source| platform_error("exporting release", source))?;

        let file = File::create(&local_path).map_err(io_error)?;
        let mut writer = HashingWriter::new(BufWriter::new(file));
        self.platform
            .download_resource(&result.blob_id, &mut writer)
            .map_err(|source| platform_error("downloading exported release", source))?;
        let (mut buffered, checksums) = writer.finish_all();
        buffered.flush().map_err(io_error)?;

        let local = LocalRelease {
            release: release.clone(),
            local_path: local_path.clone(),
            digest: checksums.sha256,
            sha1: Some(checksums.sha1),
        };
        verify(&local, &result.declared_digest)?;
        Ok(local)
    }

    fn uploaded_stemcell(&self) -> ResolveResult<Stemcell> {
        self.stemcell.clone().ok_or_else(|| ResolveError::Platform {
            release: None,
            action: format!("deployment {} has no stemcell", self.deployment),
            source: PlatformError::InvalidStemcell("stemcell was never uploaded".to_string()),
        })
    }

    /// Delete the deployment, then clean up what it left behind
    ///
    /// Only the deletion can fail the run. Runs at most once.
    fn tear_down(&mut self) -> PlatformResult<()> {
        if self.state == SessionState::TornDown {
            return Ok(());
        }
        self.state = SessionState::TornDown;

        self.platform.delete_deployment(&self.deployment)?;
        self.events.on_event(ResolveEvent::DeploymentDeleted {
            deployment: self.deployment.clone(),
        });

        if let Err(err) = self.platform.clean_up() {
            self.events.on_event(ResolveEvent::Warning {
                message: format!("compilation platform failed cleanup: {err}"),
            });
        }
        Ok(())
    }
}

/// Safety net for sessions dropped without teardown, e.g. while unwinding
impl Drop for CompilationSession<'_> {
    fn drop(&mut self) {
        if self.state == SessionState::TornDown {
            return;
        }
        if let Err(err) = self.tear_down() {
            self.events.on_event(ResolveEvent::Warning {
                message: format!(
                    "compilation deployment {} may still exist: {err}",
                    self.deployment
                ),
            });
        }
    }
}
