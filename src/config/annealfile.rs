//! Annealfile: the release sources a project draws from
//!
//! ```toml
//! [[release_sources]]
//! type = "directory"
//! id = "compiled-cache"
//! path = "$(variable \"cache_dir\")"
//! publishable = true
//! ```
//!
//! Sources keep their file order; that order is the cache precedence.
//! `$(variable "name")` placeholders are substituted before parsing.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use super::loader::{ConfigError, ConfigResult};

pub const ANNEALFILE_NAME: &str = "Annealfile";

/// Variables available to `$(variable "name")` placeholders
pub type Variables = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReleaseSourceConfig {
    Directory {
        id: String,
        path: PathBuf,
        #[serde(default)]
        publishable: bool,
    },
}

impl ReleaseSourceConfig {
    pub fn id(&self) -> &str {
        match self {
            ReleaseSourceConfig::Directory { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Annealfile {
    #[serde(default)]
    pub release_sources: Vec<ReleaseSourceConfig>,
}

impl Annealfile {
    /// Read, interpolate and validate an Annealfile
    pub fn load(path: &Path, variables: &Variables) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, variables).map_err(|err| match err {
            ConfigError::Invalid(message) => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn parse(content: &str, variables: &Variables) -> ConfigResult<Self> {
        let interpolated = interpolate(content, variables)?;
        let annealfile: Annealfile =
            toml::from_str(&interpolated).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        annealfile.validate()?;
        Ok(annealfile)
    }

    fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for source in &self.release_sources {
            if source.id().trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "release source id must not be empty".to_string(),
                ));
            }
            if !seen.insert(source.id()) {
                return Err(ConfigError::Invalid(format!(
                    "release source id '{}' is used more than once",
                    source.id()
                )));
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&ReleaseSourceConfig> {
        self.release_sources.iter().find(|source| source.id() == id)
    }
}

const PLACEHOLDER: &str = r#"\$\(\s*variable\s+"([^"]+)"\s*\)"#;

/// Replace every `$(variable "name")`; an unknown name is an error
pub fn interpolate(content: &str, variables: &Variables) -> ConfigResult<String> {
    let placeholder = Regex::new(PLACEHOLDER).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    let mut missing = Vec::new();
    let replaced = placeholder.replace_all(content, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match variables.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        return Err(ConfigError::Invalid(format!(
            "unresolved variables: {}",
            missing.join(", ")
        )));
    }
    Ok(replaced.into_owned())
}

/// Read a TOML variables file; scalar values are stringified
pub fn load_variables_file(path: &Path) -> ConfigResult<Variables> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut variables = Variables::new();
    for (key, value) in table {
        let value = match value {
            toml::Value::String(s) => s,
            toml::Value::Integer(i) => i.to_string(),
            toml::Value::Float(f) => f.to_string(),
            toml::Value::Boolean(b) => b.to_string(),
            _ => {
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("variable '{key}' must be a scalar"),
                })
            }
        };
        variables.insert(key, value);
    }
    Ok(variables)
}

/// Parse a `key=value` command line variable
pub fn parse_variable(raw: &str) -> ConfigResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::Invalid(format!(
            "variable '{raw}' is not of the form key=value"
        ))),
    }
}

/// Merge variables files then flags; later values win
pub fn collect_variables(files: &[PathBuf], flags: &[String]) -> ConfigResult<Variables> {
    let mut variables = Variables::new();
    for file in files {
        variables.extend(load_variables_file(file)?);
    }
    for flag in flags {
        let (key, value) = parse_variable(flag)?;
        variables.insert(key, value);
    }
    Ok(variables)
}
