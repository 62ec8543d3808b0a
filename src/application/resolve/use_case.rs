//! Resolve Use Case
//!
//! Orchestrates the flow:
//! 1. Load the lockfile and classify its entries
//! 2. Serve build candidates from publishable caches
//! 3. Compile whatever is left in one ephemeral session
//! 4. Publish the compiled releases to the upload target
//! 5. Reconcile and rewrite the lockfile
//!
//! Nothing here is business logic; the rules live in domain services.

use std::fs;
use std::sync::Arc;

use crate::domain::entities::{RemoteRelease, Requirement};
use crate::domain::ports::{
    CompilationPlatform, LockfileRepository, NoopEventSink, ReleaseUploader, ResolveEvent,
    ResolveEventSink,
};
use crate::domain::services::{classify, reconcile, SourceRegistry};
use crate::domain::value_objects::Stemcell;
use crate::error::{ResolveError, ResolveResult};

use super::cache::{resolve_from_cache, CacheOutcome};
use super::interrupt::Interrupt;
use super::options::ResolveOptions;
use super::publish::publish;
use super::result::{Resolution, ResolveSummary};
use super::session::{CompilationSession, CompiledBatch};

/// Resolve use case, parameterized by its persistence and platform ports
pub struct ResolveUseCase<LR, P>
where
    LR: LockfileRepository,
    P: CompilationPlatform,
{
    registry: SourceRegistry,
    uploader: Box<dyn ReleaseUploader>,
    platform: P,
    lockfile_repo: LR,
    events: Arc<dyn ResolveEventSink>,
    interrupt: Interrupt,
}

impl<LR, P> ResolveUseCase<LR, P>
where
    LR: LockfileRepository,
    P: CompilationPlatform,
{
    pub fn new(
        registry: SourceRegistry,
        uploader: Box<dyn ReleaseUploader>,
        platform: P,
        lockfile_repo: LR,
    ) -> Self {
        Self {
            registry,
            uploader,
            platform,
            lockfile_repo,
            events: Arc::new(NoopEventSink),
            interrupt: Interrupt::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn ResolveEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn lockfile_repository(&self) -> &LR {
        &self.lockfile_repo
    }

    /// Run the whole pipeline
    ///
    /// The lockfile is written at most once, and only when every build
    /// candidate was resolved.
    pub fn execute(&self, options: &ResolveOptions) -> ResolveResult<ResolveSummary> {
        let lockfile = self
            .lockfile_repo
            .load(&options.lockfile_path)
            .map_err(|source| ResolveError::Lockfile {
                path: options.lockfile_path.clone(),
                source,
            })?;
        self.events.on_event(ResolveEvent::Started {
            lockfile: options.lockfile_path.clone(),
            release_count: lockfile.len(),
        });

        let classification = classify(&lockfile, &self.registry)?;
        self.events.on_event(ResolveEvent::Classified {
            publishable: classification.publishable.len(),
            candidates: classification.candidates.len(),
        });

        if classification.is_fully_compiled() {
            self.events.on_event(ResolveEvent::AllCompiled);
            return Ok(ResolveSummary {
                publishable: classification.publishable,
                resolution: Resolution::default(),
                lockfile,
                lockfile_written: false,
            });
        }

        fs::create_dir_all(&options.releases_dir).map_err(|source| ResolveError::Io {
            path: options.releases_dir.clone(),
            release: None,
            source,
        })?;

        let resolution = self.resolve(
            classification.candidates,
            lockfile.stemcell_criteria(),
            options,
        )?;

        let resolved: Vec<_> = resolution.all().cloned().collect();
        let updated = reconcile(&lockfile, &resolved)?;
        self.lockfile_repo
            .save(&updated, &options.lockfile_path)
            .map_err(|source| ResolveError::Lockfile {
                path: options.lockfile_path.clone(),
                source,
            })?;
        self.events.on_event(ResolveEvent::Completed {
            lockfile: options.lockfile_path.clone(),
            updated: resolved.len(),
        });

        Ok(ResolveSummary {
            publishable: classification.publishable,
            resolution,
            lockfile: updated,
            lockfile_written: true,
        })
    }

    /// Resolve build candidates from cache, compiling the rest
    pub fn resolve(
        &self,
        candidates: Vec<RemoteRelease>,
        stemcell: &Stemcell,
        options: &ResolveOptions,
    ) -> ResolveResult<Resolution> {
        let CacheOutcome {
            resolved,
            remaining,
        } = resolve_from_cache(
            &self.registry,
            candidates,
            stemcell,
            &options.releases_dir,
            self.events.as_ref(),
            &self.interrupt,
        )?;

        let mut resolution = Resolution {
            from_cache: resolved,
            compiled: Vec::new(),
        };
        if remaining.is_empty() {
            return Ok(resolution);
        }

        self.events.on_event(ResolveEvent::CompilationNeeded {
            count: remaining.len(),
        });
        let batch = self.compile(&remaining, stemcell, options)?;

        for local in &batch.releases {
            self.interrupt.check("publishing compiled releases")?;

            let requirement = Requirement::new(local.release.clone(), batch.stemcell.clone());
            let published = publish(self.uploader.as_ref(), &requirement, local)?;
            self.events.on_event(ResolveEvent::ReleasePublished {
                release: published.release().clone(),
                source_id: published.remote.source_id.clone(),
                remote_path: published.remote.remote_path.clone(),
            });
            resolution.compiled.push(published);
        }

        Ok(resolution)
    }

    /// One session for the whole batch; it is gone before this returns
    fn compile(
        &self,
        remaining: &[RemoteRelease],
        stemcell: &Stemcell,
        options: &ResolveOptions,
    ) -> ResolveResult<CompiledBatch> {
        CompilationSession::run(&self.platform, self.events.as_ref(), |session| {
            session.upload_releases(
                &self.registry,
                remaining,
                &options.releases_dir,
                &self.interrupt,
            )?;

            self.interrupt.check("uploading the stemcell")?;
            let stemcell = session.upload_stemcell(&options.stemcell_file, stemcell)?;

            self.interrupt.check("deploying")?;
            session.deploy()?;

            self.interrupt.check("exporting compiled releases")?;
            let releases = session.export(&options.releases_dir, &self.interrupt)?;

            Ok(CompiledBatch { stemcell, releases })
        })
    }
}
