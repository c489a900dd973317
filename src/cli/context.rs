//! Shared setup for commands that talk to GitHub

use automerger::auth::get_github_token;
use automerger::config::{Config, RepoConfig};
use automerger::error::Result;
use automerger::platform::{ForgeClient, GitHubService};
use std::path::Path;

/// Configuration and forge access for one repository
///
/// Split in two steps so a disabled repository never needs credentials:
/// [`CommandContext::load`] reads configuration only, [`CommandContext::forge`]
/// authenticates.
pub struct CommandContext {
    /// Settings for the repository the event belongs to
    pub repo_config: RepoConfig,
    /// GitHub Enterprise host, if any
    host: Option<String>,
}

impl CommandContext {
    /// Load configuration for `repo_full_name`
    ///
    /// Uses `config_path` when given, else the default location.
    pub fn load(
        config_path: Option<&Path>,
        repo_full_name: &str,
        host: Option<String>,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };

        Ok(Self {
            repo_config: config.for_repo(repo_full_name).clone(),
            host,
        })
    }

    /// Whether auto-merge is enabled for the repository
    pub fn is_enabled(&self) -> bool {
        self.repo_config.approved_label().is_some()
    }

    /// Authenticate and create the GitHub service
    pub fn forge(&self) -> Result<Box<dyn ForgeClient>> {
        let token = get_github_token()?;
        let service = GitHubService::new(&token, self.host.as_deref())?;
        Ok(Box::new(service))
    }
}
