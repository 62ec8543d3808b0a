//! Stemcell tarball metadata
//!
//! A stemcell tarball carries a `stemcell.MF` YAML manifest at its root.
//! Only the operating system and version are read from it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tar::Archive;

use crate::domain::ports::{PlatformError, PlatformResult};
use crate::domain::value_objects::Stemcell;

const MANIFEST_NAME: &str = "stemcell.MF";

#[derive(Debug, Deserialize)]
struct StemcellManifest {
    operating_system: String,
    version: serde_yaml_ng::Value,
}

/// Read the stemcell identity out of a `.tgz` stemcell
pub fn read_stemcell_manifest(tarball: &Path) -> PlatformResult<Stemcell> {
    let file = File::open(tarball)?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    for entry in archive.entries()? {
        let mut entry = entry?;
        let is_manifest = entry
            .path()?
            .file_name()
            .is_some_and(|name| name == MANIFEST_NAME);
        if !is_manifest {
            continue;
        }

        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        return parse_stemcell_manifest(&content);
    }

    Err(PlatformError::InvalidStemcell(format!(
        "{} has no {MANIFEST_NAME}",
        tarball.display()
    )))
}

fn parse_stemcell_manifest(content: &str) -> PlatformResult<Stemcell> {
    let manifest: StemcellManifest = serde_yaml_ng::from_str(content)
        .map_err(|e| PlatformError::InvalidStemcell(e.to_string()))?;

    let version = match manifest.version {
        serde_yaml_ng::Value::String(version) => version,
        serde_yaml_ng::Value::Number(version) => version.to_string(),
        other => {
            return Err(PlatformError::InvalidStemcell(format!(
                "unexpected stemcell version {other:?}"
            )))
        }
    };
    Ok(Stemcell::new(manifest.operating_system, version))
}
