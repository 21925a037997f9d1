use crate::error::{Result, SyncError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const GIT_DIR: &str = ".git";
pub const IGNORE_FILE: &str = ".gitignore";
pub const CONFIG_FILE: &str = ".hoist.yaml";

pub fn git_dir(root: &Path) -> PathBuf {
    root.join(GIT_DIR)
}

pub fn ignore_path(root: &Path) -> PathBuf {
    root.join(IGNORE_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Repository-name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap())
}

/// Accept only names the hosting provider accepts: letters, digits, `.`,
/// `_`, `-`. Rejected before any subprocess is invoked.
pub fn validate_repo_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 100 || !name_re().is_match(name) {
        return Err(SyncError::InvalidInput(format!(
            "invalid repository name '{name}': only letters, digits, '.', '_' and '-' are allowed"
        )));
    }
    Ok(())
}

/// Default repository name for a working directory: its basename, subject to
/// the same validation rule as caller-supplied names.
pub fn default_repo_name(root: &Path) -> Result<String> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SyncError::InvalidInput("working directory has no usable name".to_string())
        })?;
    validate_repo_name(&name)?;
    Ok(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
