//! Convergence planner: compute the minimal ordered remediation plan for a
//! probed [`RepositoryState`].
//!
//! Planning is a pure function of the snapshot. A step whose target
//! condition already holds is never scheduled, which is what makes a whole
//! convergence cycle safe to re-run.

use serde::Serialize;

use crate::error::{Result, SyncError};
use crate::probe::{Identity, RepositoryState};
use crate::remote::RemoteOptions;

/// The closed set of remediation steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    InitializeVersionControl,
    WriteDefaultIgnoreRules,
    StageAllChanges,
    CreateInitialCommit,
    CommitPendingChanges,
    CreateRemoteAndPush,
    PushToExistingRemote,
}

impl Step {
    pub fn describe(&self) -> &'static str {
        match self {
            Step::InitializeVersionControl => "initialize version control",
            Step::WriteDefaultIgnoreRules => "write default ignore rules",
            Step::StageAllChanges => "stage all changes",
            Step::CreateInitialCommit => "create initial commit",
            Step::CommitPendingChanges => "commit pending changes",
            Step::CreateRemoteAndPush => "create remote and push",
            Step::PushToExistingRemote => "push to existing remote",
        }
    }

    /// Steps that mutate the local working directory. Used to verify the
    /// auth gate: none of these may run when identity is unavailable.
    pub fn is_local_mutation(&self) -> bool {
        matches!(
            self,
            Step::InitializeVersionControl
                | Step::WriteDefaultIgnoreRules
                | Step::StageAllChanges
                | Step::CreateInitialCommit
                | Step::CommitPendingChanges
        )
    }
}

/// Ordered, precondition-filtered remediation steps.
#[derive(Debug, Clone, Serialize)]
pub struct ActionPlan {
    pub steps: Vec<Step>,
}

impl ActionPlan {
    pub fn creates_remote(&self) -> bool {
        self.steps.contains(&Step::CreateRemoteAndPush)
    }
}

/// Compute the plan that takes `state` to "committed locally and pushed".
///
/// The auth gate fires before any step is scheduled: a missing or
/// unauthenticated hosting CLI fails the whole plan so that no local
/// mutation happens when the real blocker is external. Remote creation
/// additionally requires explicit caller-supplied [`RemoteOptions`] —
/// visibility is never defaulted.
pub fn build_plan(state: &RepositoryState, remote: Option<&RemoteOptions>) -> Result<ActionPlan> {
    match &state.identity {
        Identity::ToolMissing => {
            return Err(SyncError::ToolMissing("gh".to_string()));
        }
        Identity::NotAuthenticated => {
            return Err(SyncError::AuthUnavailable(
                "no active session with the hosting provider".to_string(),
            ));
        }
        Identity::Authenticated(_) => {}
    }

    if !state.remote_configured() && remote.is_none() {
        return Err(SyncError::InvalidInput(
            "creating a remote requires an explicit name and visibility".to_string(),
        ));
    }

    let mut steps = Vec::new();

    if !state.vcs_initialized {
        steps.push(Step::InitializeVersionControl);
    }
    if !state.ignore_rules_present {
        steps.push(Step::WriteDefaultIgnoreRules);
    }

    // Staging only matters ahead of a commit; committing is needed either
    // for the very first commit or when the tree has drifted since the last
    // one. The two commit steps are mutually exclusive.
    if !state.has_commits {
        steps.push(Step::StageAllChanges);
        steps.push(Step::CreateInitialCommit);
    } else if state.has_pending_changes {
        steps.push(Step::StageAllChanges);
        steps.push(Step::CommitPendingChanges);
    }

    // Exactly one of the two remote steps fires per cycle.
    if state.remote_configured() {
        steps.push(Step::PushToExistingRemote);
    } else {
        steps.push(Step::CreateRemoteAndPush);
    }

    Ok(ActionPlan { steps })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::UserIdentity;
    use crate::remote::Visibility;

    fn authenticated() -> Identity {
        Identity::Authenticated(UserIdentity {
            login: "octo".to_string(),
            name: None,
            email: None,
        })
    }

    fn state(
        vcs: bool,
        ignore: bool,
        commits: bool,
        pending: bool,
        remote: Option<&str>,
    ) -> RepositoryState {
        RepositoryState {
            identity: authenticated(),
            vcs_initialized: vcs,
            ignore_rules_present: ignore,
            has_commits: commits,
            has_pending_changes: pending,
            remote_url: remote.map(str::to_string),
        }
    }

    fn options() -> RemoteOptions {
        RemoteOptions::new("demo", Visibility::Public)
    }

    #[test]
    fn empty_directory_gets_full_bootstrap() {
        let plan = build_plan(&state(false, false, false, false, None), Some(&options())).unwrap();
        assert_eq!(
            plan.steps,
            vec![
                Step::InitializeVersionControl,
                Step::WriteDefaultIgnoreRules,
                Step::StageAllChanges,
                Step::CreateInitialCommit,
                Step::CreateRemoteAndPush,
            ]
        );
    }

    #[test]
    fn tracked_dirty_directory_with_remote() {
        let plan = build_plan(
            &state(true, true, true, true, Some("https://github.com/octo/demo")),
            None,
        )
        .unwrap();
        assert_eq!(
            plan.steps,
            vec![
                Step::StageAllChanges,
                Step::CommitPendingChanges,
                Step::PushToExistingRemote,
            ]
        );
    }

    #[test]
    fn converged_state_only_pushes() {
        let plan = build_plan(
            &state(true, true, true, false, Some("https://github.com/octo/demo")),
            None,
        )
        .unwrap();
        assert_eq!(plan.steps, vec![Step::PushToExistingRemote]);
        assert!(plan.steps.iter().all(|s| !s.is_local_mutation()));
    }

    #[test]
    fn commit_steps_are_mutually_exclusive() {
        // No state can schedule both: the initial commit fires only when
        // there are no commits, the update commit only when there are.
        for commits in [false, true] {
            for pending in [false, true] {
                let plan =
                    build_plan(&state(true, true, commits, pending, None), Some(&options()))
                        .unwrap();
                let both = plan.steps.contains(&Step::CreateInitialCommit)
                    && plan.steps.contains(&Step::CommitPendingChanges);
                assert!(!both, "commits={commits} pending={pending}");
            }
        }
    }

    #[test]
    fn remote_steps_are_mutually_exclusive() {
        for remote in [None, Some("https://github.com/octo/demo")] {
            let plan = build_plan(&state(true, true, true, false, remote), Some(&options())).unwrap();
            let creates = plan.steps.contains(&Step::CreateRemoteAndPush);
            let pushes = plan.steps.contains(&Step::PushToExistingRemote);
            assert!(creates != pushes, "exactly one remote step must fire");
        }
    }

    #[test]
    fn tool_missing_fails_before_any_step() {
        let mut s = state(false, false, false, false, None);
        s.identity = Identity::ToolMissing;
        let err = build_plan(&s, Some(&options())).unwrap_err();
        assert!(matches!(err, SyncError::ToolMissing(_)));
    }

    #[test]
    fn unauthenticated_fails_before_any_step() {
        let mut s = state(true, true, true, true, Some("https://github.com/octo/demo"));
        s.identity = Identity::NotAuthenticated;
        let err = build_plan(&s, None).unwrap_err();
        assert!(matches!(err, SyncError::AuthUnavailable(_)));
    }

    #[test]
    fn remote_creation_without_options_is_invalid_input() {
        let err = build_plan(&state(true, true, true, false, None), None).unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput(_)));
    }
}
