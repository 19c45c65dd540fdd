//! Watchlist command - the unified fraud-risk list

use std::path::Path;

use openmedicaid::api::{self, WatchlistRequest};
use openmedicaid::output::{OutputMode, Render};

/// Show the filtered watchlist
pub fn watchlist(data_dir: &Path, req: &WatchlistRequest, mode: OutputMode) -> anyhow::Result<()> {
    let data = super::load(data_dir)?;
    let report = api::get_watchlist(&data, req)?;
    report.render(mode);
    Ok(())
}
