//! Provider command - one provider's profile

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Show a provider profile
///
/// Unknown NPIs are an error so the exit status is non-zero.
pub fn provider(data_dir: &Path, npi: &str, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    let profile = api::get_provider(&data, npi)?;
    profile.render(mode);
    Ok(())
}
