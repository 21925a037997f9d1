use std::path::Path;

use anyhow::Context;
use hoist_core::{paths, Config, Engine, RemoteOptions, SystemRunner, Visibility};

use crate::output;

/// Run one full convergence cycle. Remote-creation metadata is only formed
/// when the caller states a visibility — the engine rejects a cycle that
/// would need to create a remote without it.
pub fn run(
    root: &Path,
    name: Option<&str>,
    description: Option<&str>,
    visibility: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .hoist.yaml")?;

    let remote = match visibility {
        Some(v) => {
            let visibility: Visibility = v.parse()?;
            let name = match name {
                Some(n) => n.to_string(),
                None => paths::default_repo_name(root)?,
            };
            let mut options = RemoteOptions::new(name, visibility);
            if let Some(d) = description {
                options = options.with_description(d);
            }
            Some(options)
        }
        None => None,
    };

    let runner = SystemRunner;
    let engine = Engine::new(&runner, config);
    let result = engine.synchronize(root, remote.as_ref());
    output::render_sync_result(&result, json)
}
