use std::fmt::Write as _;

use anyhow::Result;
use serde_json::json;

use annealer::domain::entities::{Lockfile, Requirement};
use annealer::domain::ports::LockfileRepository;
use annealer::domain::services::find_build_candidates;
use annealer::infrastructure::{build_registry, TomlLockfileRepository};
use annealer::ResolveError;

use super::{load_annealfile, CommandContext};
use crate::cli::AnnealfileArgs;

/// Print what `compile` would have to resolve; reads local files only
pub fn cmd_candidates(json: bool, annealfile: &AnnealfileArgs) -> Result<()> {
    let ctx = CommandContext::new(json)?;
    let loaded = load_annealfile(annealfile)?;

    let registry = build_registry(&loaded.annealfile, &loaded.base_dir);
    let lockfile = TomlLockfileRepository::new()
        .load(&loaded.lockfile_path)
        .map_err(|source| ResolveError::Lockfile {
            path: loaded.lockfile_path.clone(),
            source,
        })?;
    let candidates = find_build_candidates(&lockfile, &registry)?;

    if ctx.json {
        println!("{}", candidates_json(&lockfile, &candidates));
    } else {
        print!("{}", render_candidates(&lockfile, &candidates));
    }
    Ok(())
}

/// Where the lockfile currently points a candidate: `(source, path)`
fn locked_at<'a>(lockfile: &'a Lockfile, candidate: &Requirement) -> (&'a str, &'a str) {
    lockfile
        .get(&candidate.release.name)
        .map(|entry| (entry.remote_source(), entry.remote_path()))
        .unwrap_or_default()
}

fn candidates_json(lockfile: &Lockfile, candidates: &[Requirement]) -> serde_json::Value {
    let stemcell = lockfile.stemcell_criteria();
    json!({
        "event": "candidates",
        "stemcell": { "os": stemcell.os, "version": stemcell.version },
        "publishable": lockfile.len() - candidates.len(),
        "candidates": candidates
            .iter()
            .map(|candidate| {
                let (source, path) = locked_at(lockfile, candidate);
                json!({
                    "name": candidate.release.name,
                    "version": candidate.release.version,
                    "remote_source": source,
                    "remote_path": path,
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn render_candidates(lockfile: &Lockfile, candidates: &[Requirement]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} to compile for {}, {} already publishable",
        candidates.len(),
        lockfile.stemcell_criteria(),
        lockfile.len() - candidates.len()
    );
    for candidate in candidates {
        let (source, path) = locked_at(lockfile, candidate);
        let _ = writeln!(out, "  {}  ({source}:{path})", candidate.release);
    }
    out
}
