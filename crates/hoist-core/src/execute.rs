//! Plan executor: run remediation steps against the external `git` and `gh`
//! CLIs, translating subprocess outcomes into the engine's result contract.
//!
//! Steps run strictly in order and execution stops at the first failure.
//! There is no rollback — every step is idempotent, and a later convergence
//! cycle skips whatever is already satisfied.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::ignore;
use crate::io;
use crate::paths;
use crate::plan::{ActionPlan, Step};
use crate::probe::RepositoryState;
use crate::remote::RemoteOptions;
use crate::runner::{CommandOutput, CommandRunner};

/// One executed step in the diagnostics log carried by the final result.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub detail: String,
    pub at: DateTime<Utc>,
}

pub struct Executor<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a Config,
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a Config) -> Self {
        Self { runner, config }
    }

    /// Execute `plan` against `root`. Returns the ordered execution log and
    /// either the canonical remote URL or the first failure.
    pub fn run(
        &self,
        root: &Path,
        state: &RepositoryState,
        plan: &ActionPlan,
        remote: Option<&RemoteOptions>,
    ) -> (Vec<StepRecord>, Result<String>) {
        let mut log = Vec::new();
        let mut created_url: Option<String> = None;

        for step in &plan.steps {
            match self.exec_step(*step, root, state, remote, &mut created_url) {
                Ok(detail) => log.push(StepRecord {
                    step: *step,
                    detail,
                    at: Utc::now(),
                }),
                Err(e) => return (log, Err(e)),
            }
        }

        let url = created_url
            .or_else(|| state.remote_url.clone())
            .ok_or_else(|| SyncError::Unknown("no remote URL after convergence".to_string()));
        (log, url)
    }

    fn exec_step(
        &self,
        step: Step,
        root: &Path,
        state: &RepositoryState,
        remote: Option<&RemoteOptions>,
        created_url: &mut Option<String>,
    ) -> Result<String> {
        match step {
            Step::InitializeVersionControl => {
                self.git(root, &["init"])?;
                Ok("repository created".to_string())
            }
            Step::WriteDefaultIgnoreRules => {
                let content = ignore::compose_ignore_rules(root);
                let written = io::write_if_missing(&paths::ignore_path(root), content.as_bytes())?;
                let ecosystems: Vec<&str> = ignore::detect_ecosystems(root)
                    .iter()
                    .map(|e| e.label())
                    .collect();
                if written {
                    if ecosystems.is_empty() {
                        Ok("wrote .gitignore (universal rules)".to_string())
                    } else {
                        Ok(format!("wrote .gitignore ({})", ecosystems.join(", ")))
                    }
                } else {
                    Ok(".gitignore already present".to_string())
                }
            }
            Step::StageAllChanges => {
                self.git(root, &["add", "-A"])?;
                Ok("staged working tree".to_string())
            }
            Step::CreateInitialCommit => {
                self.commit(root, &self.config.initial_commit_message)
            }
            Step::CommitPendingChanges => {
                self.commit(root, &self.config.update_commit_message)
            }
            Step::CreateRemoteAndPush => {
                let Some(remote) = remote else {
                    return Err(SyncError::InvalidInput(
                        "remote creation requires explicit options".to_string(),
                    ));
                };
                let url = self.create_remote(root, state, remote)?;
                let detail = format!("created {url} and pushed");
                *created_url = Some(url);
                Ok(detail)
            }
            Step::PushToExistingRemote => {
                self.git(root, &["push", "-u", &self.config.remote_name, "HEAD"])?;
                Ok(format!("pushed to {}", self.config.remote_name))
            }
        }
    }

    fn git(&self, root: &Path, args: &[&str]) -> Result<CommandOutput> {
        let out = self.runner.run("git", args, root)?;
        if !out.success() {
            return Err(classify(&out));
        }
        Ok(out)
    }

    /// Commit with `message`, treating a clean tree as a successful no-op.
    fn commit(&self, root: &Path, message: &str) -> Result<String> {
        let out = self.runner.run("git", &["commit", "-m", message], root)?;
        if out.success() {
            return Ok(format!("committed '{message}'"));
        }
        let combined = out.combined();
        if combined.contains("nothing to commit") || combined.contains("working tree clean") {
            return Ok("nothing to commit".to_string());
        }
        Err(classify(&out))
    }

    /// Create the hosted repository, wire it as a remote, and push.
    ///
    /// The canonical URL is scraped from the tool's combined output; that
    /// format is not a stable contract, so on extraction failure the URL is
    /// constructed deterministically from the probed login and the requested
    /// repository name.
    fn create_remote(
        &self,
        root: &Path,
        state: &RepositoryState,
        remote: &RemoteOptions,
    ) -> Result<String> {
        let mut args: Vec<String> = vec![
            "repo".to_string(),
            "create".to_string(),
            remote.name.clone(),
            remote.visibility.as_flag().to_string(),
            "--source".to_string(),
            ".".to_string(),
            "--remote".to_string(),
            self.config.remote_name.clone(),
            "--push".to_string(),
        ];
        if let Some(description) = &remote.description {
            args.push("--description".to_string());
            args.push(description.clone());
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let out = self.runner.run("gh", &arg_refs, root)?;
        if !out.success() {
            return Err(classify(&out));
        }

        if let Some(url) = extract_remote_url(&self.config.host, &out.combined()) {
            return Ok(url);
        }
        let login = state.identity.login().ok_or_else(|| {
            SyncError::Unknown("no identity login available for URL construction".to_string())
        })?;
        Ok(format!(
            "https://{}/{}/{}",
            self.config.host, login, remote.name
        ))
    }
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

/// Map a failed subprocess to the error taxonomy. Raw subprocess errors
/// never reach the caller; every non-zero exit lands in one of these.
fn classify(out: &CommandOutput) -> SyncError {
    let combined = out.combined();
    let lower = combined.to_lowercase();
    let summary = || {
        let trimmed = combined.trim();
        let head: String = trimmed.chars().take(300).collect();
        head
    };

    if lower.contains("gh auth login")
        || lower.contains("authentication")
        || lower.contains("not logged in")
        || lower.contains("401")
    {
        return SyncError::AuthUnavailable(summary());
    }
    if lower.contains("already exists")
        || lower.contains("permission denied")
        || lower.contains("403")
        || lower.contains("could not resolve host")
        || lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("timed out")
    {
        return SyncError::NetworkOrRemoteRejected(summary());
    }
    if lower.contains("unmerged") || lower.contains("merge conflict") || lower.contains("needs merge")
    {
        return SyncError::LocalStateConflict(summary());
    }
    SyncError::Unknown(summary())
}

/// Pull the first host-anchored repository URL out of free-text output.
fn extract_remote_url(host: &str, text: &str) -> Option<String> {
    let pattern = format!(r"https://{}/[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+", regex::escape(host));
    let re = Regex::new(&pattern).ok()?;
    re.find(text).map(|m| {
        m.as_str()
            .trim_end_matches('.')
            .trim_end_matches(".git")
            .to_string()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
