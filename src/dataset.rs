//! Fixture loading and schema validation
//!
//! A [`Dataset`] is everything the reports need, read once from a data
//! directory. Absent fixture files are not an error: the corresponding
//! collection is empty and a warning is logged, so a partial export still
//! renders. A file that exists but does not parse is an error.
//!
//! Per-provider and per-state detail files are read lazily because there can
//! be thousands of them.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use walkdir::WalkDir;

use crate::catalog::states::is_known_state;
use crate::models::{
    ExclusionEntry, GeoRisk, HeadlineStats, MlProvider, MlScores, Provider, ProviderDetail,
    StateDetail, StateSummary, WatchlistEntry, YearlyTrend,
};
use crate::paths;

/// Errors that can occur while loading fixtures
#[derive(Debug, Error)]
pub enum DataError {
    /// Data directory does not exist
    #[error("data directory does not exist: {0}")]
    DirNotFound(PathBuf),

    /// A fixture could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// The fixture path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A fixture is not valid JSON of the expected shape
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The fixture path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// Error walking the detail directory
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

static NPI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5,10}$").expect("static regex"));

static STATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("static regex"));

/// Whether `s` looks like an NPI (5 to 10 digits)
#[must_use]
pub fn is_npi(s: &str) -> bool {
    NPI_PATTERN.is_match(s)
}

/// Whether `s` looks like a two-letter state code
#[must_use]
pub fn is_state_code(s: &str) -> bool {
    STATE_PATTERN.is_match(s)
}

/// All fixtures, loaded into memory
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Directory the fixtures were read from
    pub root: PathBuf,
    /// `stats.json`
    pub stats: HeadlineStats,
    /// `top-providers-1000.json`
    pub top_providers: Vec<Provider>,
    /// `smart-watchlist.json`
    pub smart_watchlist: Vec<WatchlistEntry>,
    /// `expanded-watchlist.json`
    pub legacy_watchlist: Vec<WatchlistEntry>,
    /// `ml-scores.json`
    pub ml_scores: MlScores,
    /// `ml-provider-names.json`
    pub ml_names: BTreeMap<String, String>,
    /// `states-summary.json`
    pub states: Vec<StateSummary>,
    /// `geographic-risk.json`
    pub geo_risk: Vec<GeoRisk>,
    /// `yearly-trends.json`
    pub yearly_trends: Vec<YearlyTrend>,
    /// `leie-matched.json`
    pub exclusions: Vec<ExclusionEntry>,
}

impl Dataset {
    /// Load every fixture under `root`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, DataError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(DataError::DirNotFound(root));
        }
        log::debug!("Loading fixtures from {}", root.display());

        let dataset = Self {
            stats: load_fixture(&root.join(paths::STATS_FILE))?,
            top_providers: load_fixture(&root.join(paths::TOP_PROVIDERS_FILE))?,
            smart_watchlist: load_fixture(&root.join(paths::SMART_WATCHLIST_FILE))?,
            legacy_watchlist: load_fixture(&root.join(paths::LEGACY_WATCHLIST_FILE))?,
            ml_scores: load_fixture(&root.join(paths::ML_SCORES_FILE))?,
            ml_names: load_fixture(&root.join(paths::ML_NAMES_FILE))?,
            states: load_fixture(&root.join(paths::STATES_SUMMARY_FILE))?,
            geo_risk: load_fixture(&root.join(paths::GEO_RISK_FILE))?,
            yearly_trends: load_fixture(&root.join(paths::YEARLY_TRENDS_FILE))?,
            exclusions: load_fixture(&root.join(paths::EXCLUSIONS_FILE))?,
            root,
        };

        log::info!(
            "Loaded {} top providers, {} watchlist entries, {} ML scores",
            dataset.top_providers.len(),
            dataset.smart_watchlist.len() + dataset.legacy_watchlist.len(),
            dataset.ml_scores.top_providers.len() + dataset.ml_scores.small_provider_flags.len()
        );
        Ok(dataset)
    }

    /// Read `providers/<npi>.json`, if present.
    ///
    /// Identifiers that are not NPIs are never looked up on disk.
    pub fn provider_detail(&self, npi: &str) -> Result<Option<ProviderDetail>, DataError> {
        if !is_npi(npi) {
            return Ok(None);
        }
        load_optional(&paths::provider_detail(&self.root, npi))
    }

    /// Read `states/<code>.json`, if present.
    pub fn state_detail(&self, code: &str) -> Result<Option<StateDetail>, DataError> {
        if !is_state_code(code) {
            return Ok(None);
        }
        load_optional(&paths::state_detail(&self.root, code))
    }

    /// NPIs that have a detail file, sorted
    pub fn detail_npis(&self) -> Result<Vec<String>, DataError> {
        let dir = self.root.join(paths::PROVIDERS_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut npis = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && is_npi(stem)
            {
                npis.push(stem.to_string());
            }
        }
        npis.sort();
        Ok(npis)
    }

    /// Entry of the top-provider list
    #[must_use]
    pub fn find_top_provider(&self, npi: &str) -> Option<&Provider> {
        self.top_providers.iter().find(|p| p.npi == npi)
    }

    /// Entry of the current-generation watchlist
    #[must_use]
    pub fn find_smart_entry(&self, npi: &str) -> Option<&WatchlistEntry> {
        self.smart_watchlist.iter().find(|w| w.npi == npi)
    }

    /// Entry of the legacy watchlist
    #[must_use]
    pub fn find_legacy_entry(&self, npi: &str) -> Option<&WatchlistEntry> {
        self.legacy_watchlist.iter().find(|w| w.npi == npi)
    }

    /// Model output for a provider
    #[must_use]
    pub fn find_ml(&self, npi: &str) -> Option<&MlProvider> {
        self.ml_scores.all_providers().find(|m| m.npi == npi)
    }

    /// Check fixtures against the expected schema.
    ///
    /// Issues are reported, not fixed; the reports still render.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        check_npis(
            &mut issues,
            paths::TOP_PROVIDERS_FILE,
            self.top_providers.iter().map(|p| p.npi.as_str()),
        );
        check_npis(
            &mut issues,
            paths::SMART_WATCHLIST_FILE,
            self.smart_watchlist.iter().map(|w| w.npi.as_str()),
        );
        check_npis(
            &mut issues,
            paths::LEGACY_WATCHLIST_FILE,
            self.legacy_watchlist.iter().map(|w| w.npi.as_str()),
        );
        check_npis(
            &mut issues,
            paths::ML_SCORES_FILE,
            self.ml_scores.all_providers().map(|m| m.npi.as_str()),
        );

        for p in &self.top_providers {
            if p.total_paid < 0.0 || p.total_claims < 0.0 {
                issues.push(ValidationIssue::error(
                    paths::TOP_PROVIDERS_FILE,
                    format!("negative totals for NPI {}", p.npi),
                ));
            }
        }

        let watchlists = [
            (paths::SMART_WATCHLIST_FILE, &self.smart_watchlist),
            (paths::LEGACY_WATCHLIST_FILE, &self.legacy_watchlist),
        ];
        for (file, entries) in watchlists {
            for w in entries.iter().filter(|w| w.total_paid < 0.0) {
                issues.push(ValidationIssue::error(
                    file,
                    format!("negative total paid for NPI {}", w.npi),
                ));
            }
        }

        for m in self.ml_scores.all_providers() {
            if !(0.0..=1.0).contains(&m.ml_score) {
                issues.push(ValidationIssue::error(
                    paths::ML_SCORES_FILE,
                    format!("score {} for NPI {} is outside [0, 1]", m.ml_score, m.npi),
                ));
            }
        }

        for s in &self.states {
            if s.state != "Unknown" && !is_known_state(&s.state) {
                issues.push(ValidationIssue::warning(
                    paths::STATES_SUMMARY_FILE,
                    format!("unexpected state code '{}'", s.state),
                ));
            }
        }

        issues
    }
}

/// How serious a validation finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Data looks odd but renders
    Warning,
    /// Data violates the fixture contract
    Error,
}

/// A single schema finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Severity
    pub severity: IssueSeverity,
    /// Fixture file name
    pub file: String,
    /// What is wrong
    pub message: String,
}

impl ValidationIssue {
    fn warning(file: &str, message: String) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            file: file.to_string(),
            message,
        }
    }

    fn error(file: &str, message: String) -> Self {
        Self {
            severity: IssueSeverity::Error,
            file: file.to_string(),
            message,
        }
    }
}

fn check_npis<'a>(
    issues: &mut Vec<ValidationIssue>,
    file: &str,
    npis: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for (index, npi) in npis.enumerate() {
        if npi.is_empty() {
            issues.push(ValidationIssue::error(file, format!("record {index} has no NPI")));
        } else if !seen.insert(npi) {
            issues.push(ValidationIssue::warning(file, format!("duplicate NPI {npi}")));
        }
    }
}

fn load_fixture<T: DeserializeOwned + Default>(path: &Path) -> Result<T, DataError> {
    if let Some(value) = load_optional(path)? {
        Ok(value)
    } else {
        log::warn!("Fixture {} not found; treating as empty", path.display());
        Ok(T::default())
    }
}

fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DataError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map(Some).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
