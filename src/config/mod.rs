//! Configuration module for annealer
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ANNEALER_*)
//! 3. Project config (./annealer.toml)
//! 4. User config (<config dir>/annealer/annealer.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! The `Annealfile` is separate: it lists release sources, not tool settings.

mod annealfile;
mod loader;
mod types;

pub use annealfile::{
    collect_variables, interpolate, load_variables_file, parse_variable, Annealfile,
    ReleaseSourceConfig, Variables, ANNEALFILE_NAME,
};
pub use loader::{ConfigError, ConfigResult, ConfigWarning, CONFIG_FILE_NAME};
pub use types::{Config, OutputConfig, OutputFormat, PlatformConfig};
