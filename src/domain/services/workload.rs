//! Compilation deployment manifest
//!
//! A deployment with no instance groups that still names every release and
//! the stemcell is enough for the director to compile the releases' packages.

use serde::Serialize;

use crate::domain::value_objects::{ReleaseId, Stemcell};

const STEMCELL_ALIAS: &str = "default";
const WATCH_TIME: &str = "1000-1001";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationManifest {
    pub name: String,
    pub releases: Vec<ManifestRelease>,
    pub stemcells: Vec<ManifestStemcell>,
    pub update: UpdateBlock,
    pub instance_groups: Vec<serde_yaml_ng::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRelease {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestStemcell {
    pub alias: String,
    pub os: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateBlock {
    pub canaries: u32,
    pub max_in_flight: u32,
    pub canary_watch_time: String,
    pub update_watch_time: String,
}

impl CompilationManifest {
    pub fn new(name: &str, releases: &[ReleaseId], stemcell: &Stemcell) -> Self {
        Self {
            name: name.to_string(),
            releases: releases
                .iter()
                .map(|id| ManifestRelease {
                    name: id.name.clone(),
                    version: id.version.clone(),
                })
                .collect(),
            stemcells: vec![ManifestStemcell {
                alias: STEMCELL_ALIAS.to_string(),
                os: stemcell.os.clone(),
                version: stemcell.version.clone(),
            }],
            update: UpdateBlock {
                canaries: 1,
                max_in_flight: 1,
                canary_watch_time: WATCH_TIME.to_string(),
                update_watch_time: WATCH_TIME.to_string(),
            },
            instance_groups: Vec::new(),
        }
    }
}

pub fn render_compilation_manifest(
    name: &str,
    releases: &[ReleaseId],
    stemcell: &Stemcell,
) -> Result<String, serde_yaml_ng::Error> {
    serde_yaml_ng::to_string(&CompilationManifest::new(name, releases, stemcell))
}
