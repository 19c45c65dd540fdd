//! Stats command - headline numbers

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Show headline numbers
pub fn stats(data_dir: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    api::get_stats(&data).render(mode);
    Ok(())
}
