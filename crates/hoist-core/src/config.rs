use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional per-directory configuration, read from `.hoist.yaml` at the
/// working-directory root. Every field has a default; an absent file means
/// all defaults. The tool never writes this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosting provider host used for remote URL construction and extraction.
    #[serde(default = "default_host")]
    pub host: String,

    /// Name of the git remote created and pushed to.
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// Commit message for the very first commit.
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,

    /// Commit message for subsequent sync commits.
    #[serde(default = "default_update_commit_message")]
    pub update_commit_message: String,
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_initial_commit_message() -> String {
    "Initial commit".to_string()
}

fn default_update_commit_message() -> String {
    "Sync local changes".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            remote_name: default_remote_name(),
            initial_commit_message: default_initial_commit_message(),
            update_commit_message: default_update_commit_message(),
        }
    }
}

impl Config {
    /// Load `.hoist.yaml` from `root`, falling back to defaults if absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
