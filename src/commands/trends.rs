//! Trends command - yearly national spending

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Show yearly spending trends
pub fn trends(data_dir: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    api::get_trends(&data).render(mode);
    Ok(())
}
