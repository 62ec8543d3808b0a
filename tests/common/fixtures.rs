//! Reusable fixtures: tarballs, stemcells, Annealfiles and lockfiles.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use annealer::domain::entities::{LockEntry, Lockfile};
use annealer::domain::value_objects::{Digest, Stemcell};
use annealer::infrastructure::repositories::render_lockfile;

use super::TestEnv;

pub const OS: &str = "ubuntu-jammy";
pub const OS_VERSION: &str = "1.181";

pub const BUILT_SOURCE: &str = "built";
pub const COMPILED_SOURCE: &str = "compiled";

pub fn stemcell() -> Stemcell {
    Stemcell::new(OS, OS_VERSION)
}

pub fn sha256(bytes: &[u8]) -> String {
    Digest::from_bytes(bytes).to_string()
}

pub fn built_tarball(name: &str, version: &str) -> Vec<u8> {
    format!("built {name}/{version}").into_bytes()
}

pub fn compiled_tarball(name: &str, version: &str) -> Vec<u8> {
    format!("compiled {name}/{version} on {OS}/{OS_VERSION}").into_bytes()
}

pub fn compiled_file_name(name: &str, version: &str) -> String {
    format!("{name}-{version}-{OS}-{OS_VERSION}.tgz")
}

pub fn built_file_name(name: &str, version: &str) -> String {
    format!("{name}-{version}.tgz")
}

/// Lock entry pointing at a built release in the `built` source
pub fn built_entry(name: &str, version: &str) -> LockEntry {
    LockEntry::new(
        name,
        version,
        BUILT_SOURCE,
        built_file_name(name, version),
        sha256(&built_tarball(name, version)),
    )
}

/// Lock entry already pointing at the `compiled` source
pub fn compiled_entry(name: &str, version: &str) -> LockEntry {
    LockEntry::new(
        name,
        version,
        COMPILED_SOURCE,
        compiled_file_name(name, version),
        sha256(&compiled_tarball(name, version)),
    )
}

pub fn lockfile_toml(entries: Vec<LockEntry>) -> String {
    render_lockfile(&Lockfile::with_releases(stemcell(), entries)).expect("render lockfile")
}

/// Annealfile with a built-only source and a publishable cache, in that order
pub fn standard_annealfile() -> String {
    format!(
        r#"[[release_sources]]
type = "directory"
id = "{BUILT_SOURCE}"
path = "built"

[[release_sources]]
type = "directory"
id = "{COMPILED_SOURCE}"
path = "compiled"
publishable = true
"#
    )
}

/// Write a minimal stemcell tarball carrying `stemcell.MF`
pub fn write_stemcell_tarball(path: &Path, os: &str, version: &str) {
    let manifest = format!("name: bosh-warden\noperating_system: {os}\nversion: \"{version}\"\n");
    let file = File::create(path).expect("create stemcell");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    let mut header = tar::Header::new_gnu();
    header.set_size(manifest.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "stemcell.MF", manifest.as_bytes())
        .expect("append manifest");
    builder
        .into_inner()
        .expect("finish tar")
        .finish()
        .expect("finish gzip");
}

/// A project with the standard Annealfile, a stemcell tarball, built
/// tarballs for every built entry and `cached` releases in the cache
pub fn write_project(env: &TestEnv, entries: Vec<LockEntry>, cached: &[(&str, &str)]) {
    env.write("Annealfile", standard_annealfile());
    fs::create_dir_all(env.project_path("built")).expect("built dir");
    fs::create_dir_all(env.project_path("compiled")).expect("compiled dir");

    for entry in entries.iter().filter(|e| e.remote_source() == BUILT_SOURCE) {
        env.write(
            &format!("built/{}", entry.remote_path()),
            built_tarball(entry.name(), entry.version()),
        );
    }
    for (name, version) in cached {
        env.write(
            &format!("compiled/{}", compiled_file_name(name, version)),
            compiled_tarball(name, version),
        );
    }

    env.write("Annealfile.lock", lockfile_toml(entries));
    write_stemcell_tarball(&env.project_path("stemcell.tgz"), OS, OS_VERSION);
}

/// A `bosh` stand-in: logs every call and fakes `export-release` for `releases`
///
/// With `corrupt` set, every export declares a digest that cannot match.
#[cfg(unix)]
pub fn write_fake_bosh(dir: &Path, releases: &[(&str, &str)], corrupt: bool) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("bosh");
    let log = dir.join("bosh-calls.log");

    let mut body = String::from("#!/bin/sh\n");
    body.push_str(&format!("printf '%s\\n' \"$*\" >> '{}'\n", log.display()));
    body.push_str("args=\"$*\"\n");
    body.push_str("case \"$args\" in\n  *export-release*)\n");
    body.push_str("    while [ \"$1\" != \"--dir\" ]; do shift; done\n    dir=\"$2\"\n");
    body.push_str("    case \"$args\" in\n");
    for (name, version) in releases {
        let content = compiled_tarball(name, version);
        let declared = if corrupt {
            "0".repeat(64)
        } else {
            sha256(&content)
        };
        body.push_str(&format!("      *\"export-release {name}/{version} \"*)\n"));
        body.push_str(&format!(
            "        printf '%s' '{}' > \"$dir/release.tgz\"\n",
            String::from_utf8_lossy(&content)
        ));
        body.push_str(&format!(
            "        echo '{{\"Tables\":[{{\"Rows\":[{{\"blobstore_id\":\"blob-{name}\",\"sha1\":\"{declared}\"}}]}}]}}'\n"
        ));
        body.push_str("        ;;\n");
    }
    body.push_str("    esac\n    ;;\nesac\n");

    fs::write(&script, body).expect("write fake bosh");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod fake bosh");
    script
}

#[cfg(unix)]
pub fn bosh_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("bosh-calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
