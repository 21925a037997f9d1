//! Scripted command runner for tests. Convergence scenarios are exercised
//! without touching git, gh, or the network.

use std::cell::RefCell;
use std::path::Path;

use crate::error::{Result, SyncError};
use crate::runner::{CommandOutput, CommandRunner};

enum Scripted {
    Missing,
    Exit(i32, String, String),
}

/// Matches invocations by prefix of `"program arg0 arg1 ..."` and replays
/// the scripted outcome. Unscripted commands panic so a test can never
/// silently shell out. Every call is recorded for assertions.
pub struct FakeRunner {
    rules: Vec<(String, Scripted)>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Script an exit with the given status and streams.
    pub fn on(mut self, prefix: &str, status: i32, stdout: &str, stderr: &str) -> Self {
        self.rules.push((
            prefix.to_string(),
            Scripted::Exit(status, stdout.to_string(), stderr.to_string()),
        ));
        self
    }

    /// Script a missing binary (spawn failure).
    pub fn missing(mut self, prefix: &str) -> Self {
        self.rules.push((prefix.to_string(), Scripted::Missing));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded invocation starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<CommandOutput> {
        let line = if args.is_empty() {
            program.to_string()
        } else {
            format!("{program} {}", args.join(" "))
        };
        self.calls.borrow_mut().push(line.clone());

        for (prefix, outcome) in &self.rules {
            if line.starts_with(prefix.as_str()) {
                return match outcome {
                    Scripted::Missing => Err(SyncError::ToolMissing(program.to_string())),
                    Scripted::Exit(status, stdout, stderr) => Ok(CommandOutput {
                        status: Some(*status),
                        stdout: stdout.clone(),
                        stderr: stderr.clone(),
                    }),
                };
            }
        }
        panic!("unscripted command in test: {line}");
    }
}
