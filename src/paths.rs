//! Centralized path definitions for openmedicaid
//!
//! ## Data Directory Layout
//!
//! ```text
//! data/
//! ├── stats.json                  # Headline numbers
//! ├── top-providers-1000.json     # Largest billers
//! ├── smart-watchlist.json        # Current flag generation
//! ├── expanded-watchlist.json     # Legacy flag generation
//! ├── ml-scores.json              # Model metadata + scored providers
//! ├── ml-provider-names.json      # NPI → name for ML-only providers
//! ├── states-summary.json         # Per-state totals
//! ├── geographic-risk.json        # Per-state flag density
//! ├── yearly-trends.json          # National totals by year
//! ├── leie-matched.json           # Excluded providers still billing
//! ├── providers/<npi>.json        # Per-provider detail
//! └── states/<code>.json          # Per-state detail
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.openmedicaid/
//! └── config.toml               # Data directory, site URL, server port
//! ```

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "OPENMEDICAID_DATA";

/// Headline numbers
pub const STATS_FILE: &str = "stats.json";

/// Largest billers
pub const TOP_PROVIDERS_FILE: &str = "top-providers-1000.json";

/// Current-generation watchlist
pub const SMART_WATCHLIST_FILE: &str = "smart-watchlist.json";

/// Legacy watchlist
pub const LEGACY_WATCHLIST_FILE: &str = "expanded-watchlist.json";

/// Model output
pub const ML_SCORES_FILE: &str = "ml-scores.json";

/// Names for ML-only providers
pub const ML_NAMES_FILE: &str = "ml-provider-names.json";

/// Per-state totals
pub const STATES_SUMMARY_FILE: &str = "states-summary.json";

/// Per-state flag density
pub const GEO_RISK_FILE: &str = "geographic-risk.json";

/// National totals by year
pub const YEARLY_TRENDS_FILE: &str = "yearly-trends.json";

/// Excluded providers matched to billing NPIs
pub const EXCLUSIONS_FILE: &str = "leie-matched.json";

/// Per-provider detail subdirectory
pub const PROVIDERS_DIR: &str = "providers";

/// Per-state detail subdirectory
pub const STATES_DIR: &str = "states";

/// Get path to `providers/<npi>.json` under a data root.
#[must_use]
pub fn provider_detail(root: &Path, npi: &str) -> PathBuf {
    root.join(PROVIDERS_DIR).join(format!("{npi}.json"))
}

/// Get path to `states/<code>.json` under a data root.
#[must_use]
pub fn state_detail(root: &Path, code: &str) -> PathBuf {
    root.join(STATES_DIR).join(format!("{code}.json"))
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = ".openmedicaid";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global openmedicaid directory.
///
/// Returns `~/.openmedicaid/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.openmedicaid/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
