//! CompilationPlatform port - the remote orchestrator that compiles releases
//!
//! Every call is blocking. Timeouts, if any, belong to the transport and
//! surface as ordinary errors.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::{ReleaseId, Stemcell};

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("invalid stemcell: {0}")]
    InvalidStemcell(String),
    #[error("invalid deployment manifest: {0}")]
    Manifest(String),
}

/// Result of exporting a compiled release from a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedRelease {
    /// Blob to stream with [`CompilationPlatform::download_resource`]
    pub blob_id: String,
    /// Digest the platform claims for the blob
    pub declared_digest: String,
}

pub trait CompilationPlatform {
    /// Acquire a handle on a fresh deployment named `name`
    fn prepare_deployment(&self, name: &str) -> PlatformResult<()>;

    fn upload_release(&self, tarball: &Path) -> PlatformResult<()>;

    fn upload_stemcell(&self, tarball: &Path) -> PlatformResult<()>;

    /// Read the stemcell's own metadata
    fn inspect_stemcell(&self, tarball: &Path) -> PlatformResult<Stemcell>;

    /// Apply a deployment manifest; this is what triggers compilation
    fn deploy(&self, name: &str, manifest: &str) -> PlatformResult<()>;

    fn export_release(
        &self,
        deployment: &str,
        release: &ReleaseId,
        stemcell: &Stemcell,
    ) -> PlatformResult<ExportedRelease>;

    fn download_resource(&self, blob_id: &str, out: &mut dyn Write) -> PlatformResult<()>;

    fn delete_deployment(&self, name: &str) -> PlatformResult<()>;

    /// Remove releases and stemcells no deployment references
    fn clean_up(&self) -> PlatformResult<()>;
}
