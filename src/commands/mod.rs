//! Command handlers for the annealer binary

pub mod candidates;
pub mod compile;
pub mod error;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;

use annealer::config::{collect_variables, Annealfile, Config, OutputFormat};
use annealer::domain::ports::{ResolveEvent, ResolveEventSink};
use annealer::infrastructure::{ConsoleEventSink, JsonEventSink};

use crate::cli::AnnealfileArgs;

/// An Annealfile with its variables applied, plus where its lock lives
pub struct LoadedAnnealfile {
    pub annealfile: Annealfile,
    /// Directory relative source paths are resolved against
    pub base_dir: PathBuf,
    pub lockfile_path: PathBuf,
}

pub fn load_annealfile(args: &AnnealfileArgs) -> Result<LoadedAnnealfile> {
    let variables = collect_variables(&args.variables_files, &args.variables)
        .context("Failed to collect Annealfile variables")?;
    let annealfile = Annealfile::load(&args.annealfile, &variables)
        .with_context(|| format!("Failed to load {}", args.annealfile.display()))?;

    Ok(LoadedAnnealfile {
        annealfile,
        base_dir: base_dir(&args.annealfile),
        lockfile_path: lockfile_path(&args.annealfile),
    })
}

/// `Annealfile` locks into `Annealfile.lock`
pub fn lockfile_path(annealfile: &Path) -> PathBuf {
    let mut path = OsString::from(annealfile.as_os_str());
    path.push(".lock");
    PathBuf::from(path)
}

fn base_dir(annealfile: &Path) -> PathBuf {
    match annealfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// What every command needs before it starts: config and an event sink
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    pub events: Arc<dyn ResolveEventSink>,
}

impl CommandContext {
    /// Load tool config from the working directory, user config dir and
    /// environment, then pick the sink
    ///
    /// Unknown config keys are reported as warnings, not failures.
    pub fn new(json_flag: bool) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let (config, warnings) = Config::load_or_default(Some(&project_root))
            .context("Failed to load annealer.toml")?;

        let json = wants_json(json_flag, &config);
        let events = event_sink(json);
        for warning in warnings {
            events.on_event(ResolveEvent::Warning {
                message: warning.to_string(),
            });
        }

        Ok(Self {
            config,
            json,
            events,
        })
    }
}

/// `--json` wins; otherwise the configured output format decides
fn wants_json(json_flag: bool, config: &Config) -> bool {
    json_flag || config.output.format == OutputFormat::Json
}

fn event_sink(json: bool) -> Arc<dyn ResolveEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stderr(std::io::stderr().is_terminal()))
    }
}
