//! Subprocess invocation layer for the external `git` and `gh` CLIs.
//!
//! Every external call in the engine goes through the [`CommandRunner`]
//! trait. Production code uses [`SystemRunner`]; tests script outcomes with
//! a fake so convergence scenarios never touch the network.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, SyncError};

/// Captured outcome of one subprocess invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Both streams joined. Tool output formats are not stable contracts, so
    /// callers pattern-match against the combined text rather than guessing
    /// which stream a given tool writes to.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// The seam between the engine and the external tools.
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, waiting for completion.
    ///
    /// Returns `Err(SyncError::ToolMissing)` only when the binary cannot be
    /// located or spawned; a non-zero exit is a normal `Ok` outcome that the
    /// caller classifies.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Production runner backed by `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        // PATH lookup up front gives a clean ToolMissing instead of a raw
        // spawn error, and catches the missing-binary case on all platforms.
        if which::which(program).is_err() {
            return Err(SyncError::ToolMissing(program.to_string()));
        }

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SyncError::ToolMissing(program.to_string()),
                _ => SyncError::Unknown(format!("failed to spawn {program}: {e}")),
            })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
