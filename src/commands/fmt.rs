//! Fmt command - apply a display formatter

use openmedicaid::api;
use openmedicaid::output::{OutputMode, Render};

/// Format a single value
pub fn fmt(kind: &str, value: &str, mode: OutputMode) -> anyhow::Result<()> {
    api::format_value(kind, value)?.render(mode);
    Ok(())
}
