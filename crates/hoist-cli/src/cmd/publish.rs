use std::path::Path;

use anyhow::Context;
use hoist_core::{paths, Config, Engine, RemoteOptions, SystemRunner, Visibility};

use crate::output;

/// Explicit first-time remote creation with caller-supplied metadata.
pub fn run(
    root: &Path,
    name: Option<&str>,
    description: Option<&str>,
    visibility: &str,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .hoist.yaml")?;

    let visibility: Visibility = visibility.parse()?;
    let name = match name {
        Some(n) => n.to_string(),
        None => paths::default_repo_name(root)?,
    };
    let mut options = RemoteOptions::new(name, visibility);
    if let Some(d) = description {
        options = options.with_description(d);
    }

    let runner = SystemRunner;
    let engine = Engine::new(&runner, config);
    let result = engine.create_remote(root, &options);
    output::render_sync_result(&result, json)
}
