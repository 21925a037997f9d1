//! CLI integration tests. Only paths that never mutate anything and never
//! reach the network are exercised here; full convergence scenarios run
//! against a scripted command runner in hoist-core's unit tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hoist(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hoist").unwrap();
    cmd.current_dir(dir.path()).env("HOIST_DIR", dir.path());
    cmd
}

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("hoist")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("remote-backed git repository"));
}

#[test]
fn publish_rejects_invalid_name_before_any_subprocess() {
    let dir = TempDir::new().unwrap();
    hoist(&dir)
        .args(["publish", "--name", "my repo!", "--visibility", "private"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid repository name"));
    // Nothing was bootstrapped locally either.
    assert!(!dir.path().join(".git").exists());
    assert!(!dir.path().join(".gitignore").exists());
}

#[test]
fn publish_requires_visibility() {
    let dir = TempDir::new().unwrap();
    hoist(&dir)
        .args(["publish", "--name", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--visibility"));
}

#[test]
fn sync_rejects_unknown_visibility() {
    let dir = TempDir::new().unwrap();
    hoist(&dir)
        .args(["sync", "--visibility", "internal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid visibility"));
}

#[test]
fn status_reports_untracked_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();
    hoist(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("version control:  absent"))
        .stdout(predicate::str::contains("remote:           not configured"))
        .stdout(predicate::str::contains("pending changes:  yes"));
}

#[test]
fn status_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let output = hoist(&dir).args(["status", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["vcs_initialized"], false);
    assert_eq!(value["has_commits"], false);
    assert!(value["remote_url"].is_null());
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".hoist.yaml"), "remote_name: [").unwrap();
    hoist(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains(".hoist.yaml"));
}
