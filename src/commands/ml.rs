//! ML command - model summary

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Summarize the fraud-similarity model
pub fn ml(data_dir: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    api::get_ml(&data).render(mode);
    Ok(())
}
