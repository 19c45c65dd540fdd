//! Command implementations

mod check;
mod exclusions;
mod feed;
mod flags;
mod fmt;
mod ml;
mod provider;
#[cfg(feature = "ui")]
mod serve;
mod states;
mod stats;
mod trends;
mod validate;
mod watchlist;

use std::path::Path;

use anyhow::Context as _;
use openmedicaid::dataset::Dataset;

pub use check::check;
pub use exclusions::exclusions;
pub use feed::{feed, sitemap};
pub use flags::flags;
pub use fmt::fmt;
pub use ml::ml;
pub use provider::provider;
#[cfg(feature = "ui")]
pub use serve::serve;
pub use states::{state, states};
pub use stats::stats;
pub use trends::trends;
pub use validate::validate;
pub use watchlist::watchlist;

/// Load every fixture under `data_dir`
fn load(data_dir: &Path) -> anyhow::Result<Dataset> {
    Dataset::load(data_dir)
        .with_context(|| format!("Failed to load fixtures from {}", data_dir.display()))
}
