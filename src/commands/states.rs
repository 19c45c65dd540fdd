//! States commands - rankings and per-state pages

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Rank states by spending
pub fn states(data_dir: &Path, view: &str, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    api::list_states(&data, Some(view))?.render(mode);
    Ok(())
}

/// Show one state
pub fn state(data_dir: &Path, code: &str, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    api::get_state(&data, code)?.render(mode);
    Ok(())
}
