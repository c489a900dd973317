//! Repository configuration
//!
//! Loaded from TOML. Top-level settings apply to every repository; entries
//! under `[repos."owner/name"]` replace them for that repository.
//!
//! ```toml
//! [labels]
//! approved = "approved"
//!
//! [repos."acme/legacy".labels]
//! approved = ""
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "automerger";
const CONFIG_FILE: &str = "config.toml";

/// Label names the engine reacts to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Label marking a pull request as approved for auto-merge.
    /// Empty disables auto-merge.
    #[serde(default)]
    pub approved: String,
}

/// Settings for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Label settings
    #[serde(default)]
    pub labels: LabelConfig,
}

impl RepoConfig {
    /// Config with the given approved label
    pub fn with_approved_label(label: impl Into<String>) -> Self {
        Self {
            labels: LabelConfig {
                approved: label.into(),
            },
        }
    }

    /// The approved label, or `None` when auto-merge is disabled
    pub fn approved_label(&self) -> Option<&str> {
        let label = self.labels.approved.as_str();
        (!label.is_empty()).then_some(label)
    }
}

/// Full configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults for every repository
    #[serde(flatten)]
    pub defaults: RepoConfig,
    /// Per-repository overrides keyed by `owner/name`
    #[serde(default)]
    pub repos: HashMap<String, RepoConfig>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
    }

    /// Load configuration from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Load from the default location.
    ///
    /// Returns defaults (auto-merge disabled) if the file doesn't exist.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Settings for the repository `full_name` (`owner/name`)
    pub fn for_repo(&self, full_name: &str) -> &RepoConfig {
        self.repos.get(full_name).unwrap_or(&self.defaults)
    }
}

/// `<config dir>/automerger/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
