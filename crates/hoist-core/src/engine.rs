//! Engine facade: one convergence cycle is probe → plan → execute.
//!
//! Callers always receive a single terminal [`SyncResult`]; failures of any
//! stage are folded into it and never escape as raw errors. Input validation
//! happens before anything else so a bad repository name can never trigger a
//! subprocess.

use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::error::{ErrorKind, SyncError};
use crate::execute::{Executor, StepRecord};
use crate::paths;
use crate::plan;
use crate::probe::{self, RepositoryState};
use crate::remote::RemoteOptions;
use crate::runner::CommandRunner;

/// Terminal outcome of one convergence cycle.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded { remote_url: String },
    Failed { kind: ErrorKind, message: String },
}

/// The single caller-facing result: outcome plus the ordered execution log
/// for diagnostics. No intermediate result type is exposed.
#[derive(Debug, Serialize)]
pub struct SyncResult {
    pub outcome: Outcome,
    pub log: Vec<StepRecord>,
}

impl SyncResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded { .. })
    }

    fn failure(err: SyncError, log: Vec<StepRecord>) -> Self {
        Self {
            outcome: Outcome::Failed {
                kind: err.kind(),
                message: err.to_string(),
            },
            log,
        }
    }
}

/// The convergence engine. One instance serves one invocation surface; the
/// working directory is an exclusively-owned resource for the duration of a
/// cycle, so callers serialize cycles per directory.
pub struct Engine<'a> {
    runner: &'a dyn CommandRunner,
    config: Config,
}

impl<'a> Engine<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: Config) -> Self {
        Self { runner, config }
    }

    /// Read-only snapshot of the working directory and identity state.
    pub fn probe(&self, root: &Path) -> crate::error::Result<RepositoryState> {
        probe::probe(self.runner, root, &self.config.remote_name)
    }

    /// Drive `root` to "committed locally and pushed to the remote".
    ///
    /// `remote` supplies creation metadata for the case where no remote is
    /// configured yet; when one exists it is reused and `remote` is ignored.
    pub fn synchronize(&self, root: &Path, remote: Option<&RemoteOptions>) -> SyncResult {
        if let Some(options) = remote {
            if let Err(e) = paths::validate_repo_name(&options.name) {
                return SyncResult::failure(e, Vec::new());
            }
        }
        if !root.is_dir() {
            return SyncResult::failure(
                SyncError::InvalidInput(format!(
                    "working directory does not exist: {}",
                    root.display()
                )),
                Vec::new(),
            );
        }

        let state = match self.probe(root) {
            Ok(state) => state,
            Err(e) => return SyncResult::failure(e, Vec::new()),
        };
        let plan = match plan::build_plan(&state, remote) {
            Ok(plan) => plan,
            Err(e) => return SyncResult::failure(e, Vec::new()),
        };

        let executor = Executor::new(self.runner, &self.config);
        let (log, result) = executor.run(root, &state, &plan, remote);
        match result {
            Ok(remote_url) => SyncResult {
                outcome: Outcome::Succeeded { remote_url },
                log,
            },
            Err(e) => SyncResult::failure(e, log),
        }
    }

    /// Explicit first-time creation with caller-supplied metadata.
    ///
    /// Fails with `InvalidInput` when a remote is already configured — this
    /// operation is for bootstrapping, not for re-pushing (use
    /// [`Engine::synchronize`] for that).
    pub fn create_remote(&self, root: &Path, remote: &RemoteOptions) -> SyncResult {
        if let Err(e) = paths::validate_repo_name(&remote.name) {
            return SyncResult::failure(e, Vec::new());
        }
        if !root.is_dir() {
            return SyncResult::failure(
                SyncError::InvalidInput(format!(
                    "working directory does not exist: {}",
                    root.display()
                )),
                Vec::new(),
            );
        }

        let state = match self.probe(root) {
            Ok(state) => state,
            Err(e) => return SyncResult::failure(e, Vec::new()),
        };
        if let Some(url) = &state.remote_url {
            return SyncResult::failure(
                SyncError::InvalidInput(format!(
                    "remote already configured ({url}); run sync instead"
                )),
                Vec::new(),
            );
        }

        let plan = match plan::build_plan(&state, Some(remote)) {
            Ok(plan) => plan,
            Err(e) => return SyncResult::failure(e, Vec::new()),
        };
        let executor = Executor::new(self.runner, &self.config);
        let (log, result) = executor.run(root, &state, &plan, Some(remote));
        match result {
            Ok(remote_url) => SyncResult {
                outcome: Outcome::Succeeded { remote_url },
                log,
            },
            Err(e) => SyncResult::failure(e, log),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
