//! Validate command - schema checks over the fixtures

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Check fixtures; fails when any error-level issue is found
pub fn validate(data_dir: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    let result = api::validate(&data);
    result.render(mode);

    if result.errors > 0 {
        anyhow::bail!("{} fixture error(s) found", result.errors);
    }
    Ok(())
}
