//! BOSH CLI compilation platform
//!
//! Drives a BOSH director through the `bosh` command line. Credentials and
//! the director address come from the inherited `BOSH_*` environment.
//!
//! `export-release` already downloads the tarball, so exports are staged in
//! a private directory and `download_resource` streams them from there.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use serde::Deserialize;
use tempfile::TempDir;

use crate::domain::ports::{CompilationPlatform, ExportedRelease, PlatformError, PlatformResult};
use crate::domain::value_objects::{ReleaseId, Stemcell};

use super::stemcell_tarball::read_stemcell_manifest;

/// `bosh --json` output envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CliOutput {
    #[serde(default)]
    tables: Vec<CliTable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CliTable {
    #[serde(default)]
    rows: Vec<HashMap<String, String>>,
}

pub struct BoshCliPlatform {
    command: PathBuf,
    staging: TempDir,
    staged: Mutex<HashMap<String, PathBuf>>,
}

impl BoshCliPlatform {
    pub fn new(command: impl Into<PathBuf>) -> io::Result<Self> {
        Ok(Self {
            command: command.into(),
            staging: tempfile::Builder::new().prefix("annealer-export-").tempdir()?,
            staged: Mutex::new(HashMap::new()),
        })
    }

    /// Run `bosh -n <args>` and return its stdout
    fn run<I, S>(&self, args: I) -> PlatformResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.command)
            .arg("-n")
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(PlatformError::CommandFailed(format!(
                "{} exited with {:?}: {detail}",
                self.command.display(),
                output.status.code()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn staged_tarball(dir: &Path) -> PlatformResult<PathBuf> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "tgz") {
                return Ok(path);
            }
        }
        Err(PlatformError::InvalidResponse(format!(
            "export produced no tarball in {}",
            dir.display()
        )))
    }
}

/// First row of the first table in `bosh --json` output
fn first_row(stdout: &str) -> PlatformResult<HashMap<String, String>> {
    let output: CliOutput =
        serde_json::from_str(stdout).map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;
    output
        .tables
        .into_iter()
        .next()
        .and_then(|table| table.rows.into_iter().next())
        .ok_or_else(|| PlatformError::InvalidResponse("no rows in output".to_string()))
}

impl CompilationPlatform for BoshCliPlatform {
    fn prepare_deployment(&self, _name: &str) -> PlatformResult<()> {
        self.run(["env", "--json"]).map(drop)
    }

    fn upload_release(&self, tarball: &Path) -> PlatformResult<()> {
        self.run([OsStr::new("upload-release"), tarball.as_os_str()])
            .map(drop)
    }

    fn upload_stemcell(&self, tarball: &Path) -> PlatformResult<()> {
        self.run([OsStr::new("upload-stemcell"), tarball.as_os_str()])
            .map(drop)
    }

    fn inspect_stemcell(&self, tarball: &Path) -> PlatformResult<Stemcell> {
        read_stemcell_manifest(tarball)
    }

    fn deploy(&self, name: &str, manifest: &str) -> PlatformResult<()> {
        let manifest_file = tempfile::Builder::new()
            .prefix(name)
            .suffix(".yml")
            .tempfile_in(self.staging.path())?;
        fs::write(manifest_file.path(), manifest)?;

        self.run([
            OsStr::new("-d"),
            OsStr::new(name),
            OsStr::new("deploy"),
            manifest_file.path().as_os_str(),
        ])
        .map(drop)
    }

    fn export_release(
        &self,
        deployment: &str,
        release: &ReleaseId,
        stemcell: &Stemcell,
    ) -> PlatformResult<ExportedRelease> {
        let dir = self
            .staging
            .path()
            .join(format!("{}-{}", release.name, release.version));
        fs::create_dir_all(&dir)?;

        let stdout = self.run([
            OsStr::new("-d"),
            OsStr::new(deployment),
            OsStr::new("export-release"),
            OsStr::new(&release.to_string()),
            OsStr::new(&stemcell.to_string()),
            OsStr::new("--dir"),
            dir.as_os_str(),
            OsStr::new("--json"),
        ])?;

        let row = first_row(&stdout)?;
        let blob_id = row
            .get("blobstore_id")
            .cloned()
            .ok_or_else(|| PlatformError::InvalidResponse("missing blobstore_id".to_string()))?;
        let declared_digest = row
            .get("sha1")
            .cloned()
            .ok_or_else(|| PlatformError::InvalidResponse("missing sha1".to_string()))?;

        let tarball = Self::staged_tarball(&dir)?;
        self.staged
            .lock()
            .map_err(|_| PlatformError::InvalidResponse("staging index poisoned".to_string()))?
            .insert(blob_id.clone(), tarball);

        Ok(ExportedRelease {
            blob_id,
            declared_digest,
        })
    }

    fn download_resource(&self, blob_id: &str, out: &mut dyn Write) -> PlatformResult<()> {
        let tarball = self
            .staged
            .lock()
            .map_err(|_| PlatformError::InvalidResponse("staging index poisoned".to_string()))?
            .remove(blob_id)
            .ok_or_else(|| PlatformError::InvalidResponse(format!("unknown blob '{blob_id}'")))?;

        let mut file = File::open(&tarball)?;
        io::copy(&mut file, out)?;
        fs::remove_file(&tarball)?;
        Ok(())
    }

    fn delete_deployment(&self, name: &str) -> PlatformResult<()> {
        self.run(["-d", name, "delete-deployment", "--force"])
            .map(drop)
    }

    fn clean_up(&self) -> PlatformResult<()> {
        self.run(["clean-up", "--all"]).map(drop)
    }
}
