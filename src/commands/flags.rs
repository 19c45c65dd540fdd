//! Flags command - the flag catalog

use openmedicaid::api;
use openmedicaid::output::{FlagList, OutputMode, Render};

/// List known flags
pub fn flags(mode: OutputMode) -> anyhow::Result<()> {
    FlagList {
        flags: api::list_flags(),
    }
    .render(mode);
    Ok(())
}
