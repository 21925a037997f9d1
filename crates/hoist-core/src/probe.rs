//! Environment prober: read-only inspection of the working directory and
//! the hosting provider's authentication state.
//!
//! Probing never mutates anything. Missing tools and missing authentication
//! are normal, expected outcomes folded into [`Identity`] rather than errors;
//! "no commits yet" and "no remote yet" are valid states, not failures.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::paths;
use crate::runner::CommandRunner;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Authenticated-user record from the hosting provider.
#[derive(Debug, Clone, Serialize)]
pub struct UserIdentity {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Outcome of the identity probe. The two absence reasons are ordinary
/// states the planner acts on, not exceptional conditions.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Identity {
    Authenticated(UserIdentity),
    NotAuthenticated,
    ToolMissing,
}

impl Identity {
    pub fn login(&self) -> Option<&str> {
        match self {
            Identity::Authenticated(user) => Some(&user.login),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}

// ---------------------------------------------------------------------------
// RepositoryState
// ---------------------------------------------------------------------------

/// The local half of the snapshot, produced by filesystem and git queries.
#[derive(Debug, Clone, Serialize)]
pub struct LocalState {
    pub vcs_initialized: bool,
    pub ignore_rules_present: bool,
    pub has_commits: bool,
    pub has_pending_changes: bool,
    pub remote_url: Option<String>,
}

/// Value snapshot of the working directory at the instant of probing.
/// Rebuilt on every convergence cycle and discarded afterwards; the
/// directory may change between cycles, so nothing here is cached.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryState {
    pub identity: Identity,
    pub vcs_initialized: bool,
    pub ignore_rules_present: bool,
    pub has_commits: bool,
    pub has_pending_changes: bool,
    pub remote_url: Option<String>,
}

impl RepositoryState {
    pub fn remote_configured(&self) -> bool {
        self.remote_url.is_some()
    }
}

// ---------------------------------------------------------------------------
// Probing
// ---------------------------------------------------------------------------

/// Query the hosting CLI for the authenticated user.
///
/// Sequence: version check (binary present?), auth-status check (session
/// logged in?), then the user-profile lookup. JSON is parsed defensively:
/// absent fields default, and an unreadable login downgrades to
/// `NotAuthenticated` rather than failing the probe.
pub fn probe_identity(runner: &dyn CommandRunner, cwd: &Path) -> Identity {
    match runner.run("gh", &["--version"], cwd) {
        Ok(out) if out.success() => {}
        _ => return Identity::ToolMissing,
    }

    match runner.run("gh", &["auth", "status"], cwd) {
        Ok(out) if out.success() => {}
        _ => return Identity::NotAuthenticated,
    }

    let out = match runner.run("gh", &["api", "user"], cwd) {
        Ok(out) if out.success() => out,
        _ => return Identity::NotAuthenticated,
    };

    let value: serde_json::Value = match serde_json::from_str(&out.stdout) {
        Ok(v) => v,
        Err(_) => return Identity::NotAuthenticated,
    };
    let Some(login) = value.get("login").and_then(|v| v.as_str()) else {
        return Identity::NotAuthenticated;
    };

    Identity::Authenticated(UserIdentity {
        login: login.to_string(),
        name: value
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        email: value
            .get("email")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    })
}

/// Inspect the local side of the working directory.
///
/// When the version-control metadata directory is absent, no git subprocess
/// runs at all: there can be no commits and no remote, and everything in the
/// directory counts as pending.
pub fn probe_working_directory(
    runner: &dyn CommandRunner,
    root: &Path,
    remote_name: &str,
) -> Result<LocalState> {
    let vcs_initialized = paths::git_dir(root).is_dir();
    let ignore_rules_present = paths::ignore_path(root).is_file();

    if !vcs_initialized {
        let has_entries = std::fs::read_dir(root)?.next().is_some();
        return Ok(LocalState {
            vcs_initialized,
            ignore_rules_present,
            has_commits: false,
            has_pending_changes: has_entries,
            remote_url: None,
        });
    }

    let has_commits = runner
        .run("git", &["rev-parse", "--verify", "HEAD"], root)?
        .success();

    let remote_url = {
        let out = runner.run("git", &["remote", "get-url", remote_name], root)?;
        if out.success() {
            let url = out.stdout.trim().to_string();
            (!url.is_empty()).then_some(url)
        } else {
            None
        }
    };

    let status = runner.run("git", &["status", "--porcelain"], root)?;
    let has_pending_changes = status.success() && !status.stdout.trim().is_empty();

    Ok(LocalState {
        vcs_initialized,
        ignore_rules_present,
        has_commits,
        has_pending_changes,
        remote_url,
    })
}

/// Build the full snapshot: identity plus local state.
pub fn probe(runner: &dyn CommandRunner, root: &Path, remote_name: &str) -> Result<RepositoryState> {
    let identity = probe_identity(runner, root);
    let local = probe_working_directory(runner, root, remote_name)?;
    Ok(RepositoryState {
        identity,
        vcs_initialized: local.vcs_initialized,
        ignore_rules_present: local.ignore_rules_present,
        has_commits: local.has_commits,
        has_pending_changes: local.has_pending_changes,
        remote_url: local.remote_url,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;
    use tempfile::TempDir;

    #[test]
    fn identity_tool_missing() {
        let runner = FakeRunner::new().missing("gh --version");
        let identity = probe_identity(&runner, Path::new("."));
        assert!(matches!(identity, Identity::ToolMissing));
    }

    #[test]
    fn identity_not_authenticated() {
        let runner = FakeRunner::new()
            .on("gh --version", 0, "gh version 2.40.0", "")
            .on("gh auth status", 1, "", "You are not logged into any GitHub hosts");
        let identity = probe_identity(&runner, Path::new("."));
        assert!(matches!(identity, Identity::NotAuthenticated));
    }

    #[test]
    fn identity_authenticated_with_partial_profile() {
        let runner = FakeRunner::new()
            .on("gh --version", 0, "gh version 2.40.0", "")
            .on("gh auth status", 0, "Logged in to github.com", "")
            .on("gh api user", 0, r#"{"login":"octo"}"#, "");
        let identity = probe_identity(&runner, Path::new("."));
        assert_eq!(identity.login(), Some("octo"));
        match identity {
            Identity::Authenticated(user) => {
                assert!(user.name.is_none());
                assert!(user.email.is_none());
            }
            other => panic!("expected authenticated, got {other:?}"),
        }
    }

    #[test]
    fn identity_unparsable_profile_downgrades() {
        let runner = FakeRunner::new()
            .on("gh --version", 0, "gh version 2.40.0", "")
            .on("gh auth status", 0, "", "")
            .on("gh api user", 0, "not json", "");
        let identity = probe_identity(&runner, Path::new("."));
        assert!(matches!(identity, Identity::NotAuthenticated));
    }

    #[test]
    fn uninitialized_directory_runs_no_git() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        let runner = FakeRunner::new();
        let state = probe_working_directory(&runner, dir.path(), "origin").unwrap();
        assert!(!state.vcs_initialized);
        assert!(!state.has_commits);
        assert!(state.has_pending_changes);
        assert!(state.remote_url.is_none());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn empty_uninitialized_directory_has_no_pending_changes() {
        let dir = TempDir::new().unwrap();
        let runner = FakeRunner::new();
        let state = probe_working_directory(&runner, dir.path(), "origin").unwrap();
        assert!(!state.has_pending_changes);
    }

    #[test]
    fn initialized_directory_probes_git() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();
        let runner = FakeRunner::new()
            .on("git rev-parse --verify HEAD", 0, "abc123", "")
            .on(
                "git remote get-url origin",
                0,
                "https://github.com/octo/demo\n",
                "",
            )
            .on("git status --porcelain", 0, " M src/main.rs\n", "");
        let state = probe_working_directory(&runner, dir.path(), "origin").unwrap();
        assert!(state.vcs_initialized);
        assert!(state.ignore_rules_present);
        assert!(state.has_commits);
        assert!(state.has_pending_changes);
        assert_eq!(
            state.remote_url.as_deref(),
            Some("https://github.com/octo/demo")
        );
    }

    #[test]
    fn no_commits_and_no_remote_are_valid_states() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let runner = FakeRunner::new()
            .on("git rev-parse --verify HEAD", 128, "", "fatal: Needed a single revision")
            .on("git remote get-url origin", 2, "", "error: No such remote 'origin'")
            .on("git status --porcelain", 0, "", "");
        let state = probe_working_directory(&runner, dir.path(), "origin").unwrap();
        assert!(!state.has_commits);
        assert!(state.remote_url.is_none());
        assert!(!state.has_pending_changes);
    }
}
