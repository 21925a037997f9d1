use std::path::Path;

use anyhow::Context;
use hoist_core::{Config, Engine, SystemRunner};

use crate::output;

/// Print the probe snapshot without mutating anything.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .hoist.yaml")?;
    let runner = SystemRunner;
    let engine = Engine::new(&runner, config);
    let state = engine.probe(root).context("failed to probe directory")?;
    output::render_state(&state, json)
}
