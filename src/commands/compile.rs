use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};

use annealer::application::{Interrupt, ResolveOptions, ResolveUseCase};
use annealer::infrastructure::{
    build_registry, build_uploader, BoshCliPlatform, TomlLockfileRepository,
};

use super::{load_annealfile, CommandContext};
use crate::cli::AnnealfileArgs;

pub fn cmd_compile(
    json: bool,
    stemcell_file: PathBuf,
    upload_target_id: Option<String>,
    releases_dir: Option<PathBuf>,
    annealfile: &AnnealfileArgs,
) -> Result<()> {
    let ctx = CommandContext::new(json)?;
    let loaded = load_annealfile(annealfile)?;

    let target_id = upload_target_id
        .or_else(|| ctx.config.upload_target_id.clone())
        .context("No upload target: pass --upload-target-id or set upload_target_id in annealer.toml")?;
    let releases_dir = releases_dir.unwrap_or_else(|| ctx.config.releases_dir.clone());

    let registry = build_registry(&loaded.annealfile, &loaded.base_dir);
    let uploader = build_uploader(&loaded.annealfile, &loaded.base_dir, &target_id)?;
    let platform = BoshCliPlatform::new(ctx.config.platform.command.as_str())
        .context("Failed to create a staging directory for exported releases")?;

    // Ctrl+C only raises the flag; the pipeline stops at the next stage and tears down
    let interrupt = Interrupt::new();
    let flag = interrupt.flag();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    let options =
        ResolveOptions::new(&loaded.lockfile_path, stemcell_file).with_releases_dir(releases_dir);
    let use_case = ResolveUseCase::new(registry, uploader, platform, TomlLockfileRepository::new())
        .with_events(ctx.events.clone())
        .with_interrupt(interrupt);

    use_case.execute(&options)?;
    Ok(())
}
