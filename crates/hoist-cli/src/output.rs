use hoist_core::{Identity, Outcome, RepositoryState, SyncResult};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render a convergence result. Human output shows the execution log and a
/// one-line verdict; failures become the process error with the error kind's
/// actionable hint attached.
pub fn render_sync_result(result: &SyncResult, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(result)?;
    } else {
        for record in &result.log {
            println!("  {}: {}", record.step.describe(), record.detail);
        }
    }

    match &result.outcome {
        Outcome::Succeeded { remote_url } => {
            if !json {
                println!("Synchronized: {remote_url}");
            }
            Ok(())
        }
        Outcome::Failed { kind, message } => {
            anyhow::bail!("{message} (hint: {})", kind.hint())
        }
    }
}

pub fn render_state(state: &RepositoryState, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(state);
    }

    let identity = match &state.identity {
        Identity::Authenticated(user) => format!("authenticated as {}", user.login),
        Identity::NotAuthenticated => "not authenticated".to_string(),
        Identity::ToolMissing => "hosting CLI not installed".to_string(),
    };
    println!("identity:         {identity}");
    println!(
        "version control:  {}",
        if state.vcs_initialized {
            "initialized"
        } else {
            "absent"
        }
    );
    println!(
        "ignore rules:     {}",
        if state.ignore_rules_present {
            "present"
        } else {
            "absent"
        }
    );
    println!(
        "commits:          {}",
        if state.has_commits { "yes" } else { "none" }
    );
    println!(
        "pending changes:  {}",
        if state.has_pending_changes { "yes" } else { "no" }
    );
    println!(
        "remote:           {}",
        state.remote_url.as_deref().unwrap_or("not configured")
    );
    Ok(())
}
