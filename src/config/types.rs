//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::{self, ConfigResult, ConfigWarning};

/// How progress is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Compilation platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Executable used to talk to the director
    #[serde(default = "default_platform_command")]
    pub command: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            command: default_platform_command(),
        }
    }
}

fn default_platform_command() -> String {
    "bosh".to_string()
}

fn default_releases_dir() -> PathBuf {
    PathBuf::from("releases")
}

/// Main configuration structure (`annealer.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where releases are downloaded and exported
    #[serde(default = "default_releases_dir")]
    pub releases_dir: PathBuf,

    /// Release source that receives compiled releases
    #[serde(default)]
    pub upload_target_id: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub platform: PlatformConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            releases_dir: default_releases_dir(),
            upload_target_id: None,
            output: OutputConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ConfigResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> ConfigResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (ANNEALER_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
