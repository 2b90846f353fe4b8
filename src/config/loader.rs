//! Defaults file loading functionality
//!
//! A YAML file may supply default values for the options that are not given
//! on the command line:
//!
//! ```yaml
//! move: false
//! types: [jpg, png]
//! exclude: [node_modules, .git]
//! log: ~/gather.log
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use serde_yaml::from_str;

use crate::constants::{APPLICATION, DEFAULT_CONFIG_FILE, ORGANIZATION, QUALIFIER};
use crate::errors::config_parsing_error;

/// Default option values read from a YAML file
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Move instead of copy
    #[serde(default, rename = "move")]
    pub move_files: bool,
    /// Extension tokens, normalised later like the command-line ones
    #[serde(default)]
    pub types: Vec<String>,
    /// Directory names to skip
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Log file path, `~` and `$VARS` are expanded
    pub log: Option<String>,
}

/// Parses the content of a defaults file
///
/// An empty document yields the built-in defaults.
///
/// # Errors
/// Returns an error if the YAML is malformed or contains unknown keys
pub fn parse_defaults(content: &str) -> crate::errors::Result<Defaults> {
    if content.trim().is_empty() {
        return Ok(Defaults::default());
    }

    from_str(content).map_err(|e| {
        let detail = e.to_string();
        config_parsing_error(e, &detail)
    })
}

/// Loads a defaults file
///
/// # Errors
/// Returns an error if the file cannot be read, is not UTF-8 or is invalid
pub fn load_defaults(file: &Path) -> Result<Defaults> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read configuration file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Configuration file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    parse_defaults(&content_str).map_err(|e| {
        anyhow!(
            "Failed to parse configuration file {}: {}\nPlease check the YAML syntax.",
            file.display(),
            e
        )
    })
}

/// Location of the defaults file in the platform configuration directory
///
/// Returns `None` if the directory cannot be determined or no file exists
/// there.
pub fn default_config_path() -> Option<PathBuf> {
    let folder = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)?;
    let path = folder.config_dir().join(DEFAULT_CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Resolves the defaults for this invocation
///
/// An explicitly named file must load. Otherwise the platform defaults file
/// is used when it exists, and the built-in defaults when it does not.
///
/// # Errors
/// Returns an error if the selected file cannot be loaded
pub fn resolve_defaults(explicit: Option<&str>) -> Result<Defaults> {
    match explicit {
        Some(file) => load_defaults(Path::new(&expand_path(file))),
        None => match default_config_path() {
            Some(path) => load_defaults(&path),
            None => Ok(Defaults::default()),
        },
    }
}

/// Expands `~` and environment variables in a path
///
/// Unknown variables are left in place while `~` is still expanded.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|expanded| expanded.to_string())
        .unwrap_or_else(|_| shellexpand::tilde(path).to_string())
}
