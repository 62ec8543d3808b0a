//! Release source implementations and their wiring from an Annealfile

mod directory;

use std::path::Path;

pub use directory::DirectoryReleaseSource;

use crate::config::{Annealfile, ReleaseSourceConfig};
use crate::domain::ports::ReleaseUploader;
use crate::domain::services::SourceRegistry;
use crate::error::{ResolveError, ResolveResult};

fn directory_source(config: &ReleaseSourceConfig, base_dir: &Path) -> DirectoryReleaseSource {
    match config {
        ReleaseSourceConfig::Directory {
            id,
            path,
            publishable,
        } => DirectoryReleaseSource::new(id.as_str(), base_dir.join(path), *publishable),
    }
}

/// Register every Annealfile source in file order
///
/// Relative paths are resolved against `base_dir`, the Annealfile's directory.
pub fn build_registry(annealfile: &Annealfile, base_dir: &Path) -> SourceRegistry {
    annealfile
        .release_sources
        .iter()
        .fold(SourceRegistry::new(), |registry, config| {
            registry.with_source(Box::new(directory_source(config, base_dir)))
        })
}

/// The source named by `target_id`, as an upload destination
pub fn build_uploader(
    annealfile: &Annealfile,
    base_dir: &Path,
    target_id: &str,
) -> ResolveResult<Box<dyn ReleaseUploader>> {
    let config = annealfile
        .find(target_id)
        .ok_or_else(|| ResolveError::UnknownUploadTarget {
            target_id: target_id.to_string(),
        })?;
    Ok(Box::new(directory_source(config, base_dir)))
}
