//! Exclusions command - banned but still billing

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Show excluded providers found in payment data
pub fn exclusions(data_dir: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    api::get_exclusions(&data).render(mode);
    Ok(())
}
