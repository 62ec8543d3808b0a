//! In-memory compilation platform for scenario tests.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use annealer::domain::ports::{CompilationPlatform, ExportedRelease, PlatformError, PlatformResult};
use annealer::domain::value_objects::{ReleaseId, Stemcell};

use super::{compiled_tarball, sha256, stemcell};

#[derive(Default)]
struct State {
    calls: Vec<String>,
    staged: HashMap<String, Vec<u8>>,
    deployments: Vec<String>,
}

/// Compiles instantly; every exported tarball is `compiled_tarball(name, version)`
pub struct ScriptedPlatform {
    state: Mutex<State>,
    stemcell: Stemcell,
    corrupt: Option<String>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            stemcell: stemcell(),
            corrupt: None,
        }
    }

    /// Declare a digest for `release` that does not match its bytes
    pub fn corrupting(mut self, release: &str) -> Self {
        self.corrupt = Some(release.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split_whitespace().next() == Some(op))
            .count()
    }

    /// Deployments prepared and not yet deleted
    pub fn live_deployments(&self) -> Vec<String> {
        self.state.lock().unwrap().deployments.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl CompilationPlatform for ScriptedPlatform {
    fn prepare_deployment(&self, name: &str) -> PlatformResult<()> {
        self.record(format!("prepare {name}"));
        self.state.lock().unwrap().deployments.push(name.to_string());
        Ok(())
    }

    fn upload_release(&self, tarball: &Path) -> PlatformResult<()> {
        self.record(format!("upload_release {}", tarball.display()));
        if !tarball.is_file() {
            return Err(PlatformError::CommandFailed(format!(
                "no tarball at {}",
                tarball.display()
            )));
        }
        Ok(())
    }

    fn upload_stemcell(&self, tarball: &Path) -> PlatformResult<()> {
        self.record(format!("upload_stemcell {}", tarball.display()));
        Ok(())
    }

    fn inspect_stemcell(&self, _tarball: &Path) -> PlatformResult<Stemcell> {
        Ok(self.stemcell.clone())
    }

    fn deploy(&self, name: &str, manifest: &str) -> PlatformResult<()> {
        self.record(format!("deploy {name}"));
        if !manifest.contains(name) {
            return Err(PlatformError::Manifest("manifest names another deployment".into()));
        }
        Ok(())
    }

    fn export_release(
        &self,
        _deployment: &str,
        release: &ReleaseId,
        _stemcell: &Stemcell,
    ) -> PlatformResult<ExportedRelease> {
        self.record(format!("export {release}"));
        let content = compiled_tarball(&release.name, &release.version);
        let declared_digest = if self.corrupt.as_deref() == Some(release.name.as_str()) {
            "f".repeat(64)
        } else {
            sha256(&content)
        };
        let blob_id = format!("blob-{}", release.name);
        self.state
            .lock()
            .unwrap()
            .staged
            .insert(blob_id.clone(), content);
        Ok(ExportedRelease {
            blob_id,
            declared_digest,
        })
    }

    fn download_resource(&self, blob_id: &str, out: &mut dyn Write) -> PlatformResult<()> {
        self.record(format!("download {blob_id}"));
        let content = self
            .state
            .lock()
            .unwrap()
            .staged
            .remove(blob_id)
            .ok_or_else(|| PlatformError::InvalidResponse(format!("unknown blob {blob_id}")))?;
        out.write_all(&content)?;
        Ok(())
    }

    fn delete_deployment(&self, name: &str) -> PlatformResult<()> {
        self.record(format!("delete {name}"));
        self.state
            .lock()
            .unwrap()
            .deployments
            .retain(|deployment| deployment != name);
        Ok(())
    }

    fn clean_up(&self) -> PlatformResult<()> {
        self.record("clean_up".to_string());
        Ok(())
    }
}
