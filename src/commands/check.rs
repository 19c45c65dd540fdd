//! Check command - is my provider flagged?

use std::path::Path;

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};
use openmedicaid::search::MIN_QUERY_LEN;

/// Search flagged and clean providers
pub fn check(data_dir: &Path, query: &str, mode: OutputMode) -> anyhow::Result<()> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        anyhow::bail!("Query must be at least {MIN_QUERY_LEN} characters");
    }
    let data = super::load(data_dir)?;
    api::search_providers(&data, query).render(mode);
    Ok(())
}
