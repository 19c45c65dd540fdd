//! Unified risk watchlist
//!
//! Merges three sources into one ranked list:
//!
//! 1. the current-generation statistical watchlist (primary),
//! 2. legacy watchlist entries not already present,
//! 3. providers flagged only by the ML model (score `>= 0.5`).
//!
//! Each provider is placed in a [`UnifiedTier`] that combines its flag count
//! with its ML score.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::dataset::Dataset;
use crate::explain;
use crate::format::Tone;
use crate::models::{MlProvider, Provider, WatchlistEntry};

/// ML score at which a provider with no statistical flags is listed
pub const ML_LISTING_THRESHOLD: f64 = 0.5;

/// Default number of rows shown
pub const DEFAULT_LIMIT: usize = 50;

/// Risk tier combining statistical flags and ML score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UnifiedTier {
    /// Three or more flags, or two flags with a strong ML score
    Critical,
    /// Two flags, one flag with a strong ML score, or a very strong ML score
    High,
    /// One flag or a moderate ML score
    Elevated,
    /// No flags but an ML score of at least 0.5
    #[serde(rename = "ML Flag")]
    MlFlag,
    /// Everything else
    Low,
}

impl UnifiedTier {
    /// Place a provider in a tier. A missing ML score counts as zero.
    #[must_use]
    pub fn classify(flag_count: usize, ml_score: Option<f64>) -> Self {
        let ml = ml_score.unwrap_or(0.0);
        if flag_count >= 3 || (flag_count >= 2 && ml >= 0.7) {
            Self::Critical
        } else if flag_count == 2 || (flag_count >= 1 && ml >= 0.7) || ml >= 0.8 {
            Self::High
        } else if flag_count == 1 || ml >= 0.6 {
            Self::Elevated
        } else if flag_count == 0 && ml >= ML_LISTING_THRESHOLD {
            Self::MlFlag
        } else {
            Self::Low
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Elevated => "Elevated",
            Self::MlFlag => "ML Flag",
            Self::Low => "Low",
        }
    }

    /// Display tone
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Critical => Tone::Red,
            Self::High => Tone::Orange,
            Self::Elevated => Tone::Yellow,
            Self::MlFlag => Tone::Purple,
            Self::Low => Tone::Slate,
        }
    }
}

impl std::fmt::Display for UnifiedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for UnifiedTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "elevated" => Ok(Self::Elevated),
            "ml" | "ml-flag" | "ml flag" => Ok(Self::MlFlag),
            "low" => Ok(Self::Low),
            _ => Err(format!("Invalid tier: {s}. Use: critical, high, elevated, ml, low")),
        }
    }
}

/// Which fixture a watchlist row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Current-generation statistical watchlist
    Smart,
    /// Legacy statistical watchlist
    Legacy,
    /// ML model only
    Ml,
}

/// One row of the unified watchlist
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistRow {
    /// National Provider Identifier
    pub npi: String,
    /// Display name (`NPI: <npi>` when unknown)
    pub name: String,
    /// Specialty
    pub specialty: String,
    /// City
    pub city: String,
    /// Two-letter state code
    pub state: String,
    /// Total payments received
    pub total_paid: f64,
    /// Total claims filed
    pub total_claims: f64,
    /// Number of statistical flags
    pub flag_count: usize,
    /// Flag keys
    pub flags: Vec<String>,
    /// Per-flag evidence
    pub flag_details: BTreeMap<String, Value>,
    /// Origin fixture
    pub source: Source,
    /// ML score, when the model scored this provider
    pub ml_score: Option<f64>,
    /// Unified tier
    pub tier: UnifiedTier,
}

impl WatchlistRow {
    /// Compact evidence lines, one per flag that has details
    #[must_use]
    pub fn flag_summaries(&self) -> Vec<(String, String)> {
        self.flags
            .iter()
            .filter_map(|flag| {
                let summary = explain::flag_summary(flag, self.flag_details.get(flag));
                (!summary.is_empty()).then(|| (flag.clone(), summary))
            })
            .collect()
    }
}

/// First non-empty string among the candidates
pub(crate) fn first_text(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map_or_else(String::new, |s| (*s).to_string())
}

/// First non-zero amount among the candidates
pub(crate) fn first_amount(candidates: &[Option<f64>]) -> f64 {
    candidates.iter().flatten().copied().find(|v| *v != 0.0).unwrap_or(0.0)
}

/// Merge all sources into one list, ordered by tier then spending.
#[must_use]
pub fn merge(data: &Dataset) -> Vec<WatchlistRow> {
    let providers: HashMap<&str, &Provider> =
        data.top_providers.iter().map(|p| (p.npi.as_str(), p)).collect();
    let legacy: HashMap<&str, &WatchlistEntry> =
        data.legacy_watchlist.iter().map(|w| (w.npi.as_str(), w)).collect();
    let ml: HashMap<&str, &MlProvider> =
        data.ml_scores.all_providers().map(|m| (m.npi.as_str(), m)).collect();
    let ml_score = |npi: &str| ml.get(npi).map(|m| m.ml_score);

    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for w in &data.smart_watchlist {
        seen.insert(w.npi.clone());
        let provider = providers.get(w.npi.as_str()).copied();
        let old = legacy.get(w.npi.as_str()).copied();
        let score = ml_score(&w.npi);
        let flag_count = w.effective_flag_count();
        let name = first_text(&[
            Some(w.name.as_str()),
            provider.map(|p| p.name.as_str()),
            old.map(|o| o.name.as_str()),
        ]);
        rows.push(WatchlistRow {
            npi: w.npi.clone(),
            name: if name.is_empty() { format!("NPI: {}", w.npi) } else { name },
            specialty: first_text(&[Some(w.specialty.as_str()), provider.map(|p| p.specialty.as_str())]),
            city: first_text(&[Some(w.city.as_str()), provider.map(|p| p.city.as_str())]),
            state: first_text(&[Some(w.state.as_str()), provider.map(|p| p.state.as_str())]),
            total_paid: first_amount(&[Some(w.total_paid), provider.map(|p| p.total_paid)]),
            total_claims: provider.map_or(0.0, |p| p.total_claims),
            flag_count,
            flags: w.flags.clone(),
            flag_details: w.flag_details.clone(),
            source: Source::Smart,
            ml_score: score,
            tier: UnifiedTier::classify(flag_count, score),
        });
    }

    for w in &data.legacy_watchlist {
        if !seen.insert(w.npi.clone()) {
            continue;
        }
        let provider = providers.get(w.npi.as_str()).copied();
        let name = first_text(&[Some(w.name.as_str()), provider.map(|p| p.name.as_str())]);
        let total_paid = first_amount(&[Some(w.total_paid), provider.map(|p| p.total_paid)]);
        if name.is_empty() && total_paid == 0.0 {
            continue;
        }
        let score = ml_score(&w.npi);
        let flag_count = w.effective_flag_count();
        rows.push(WatchlistRow {
            npi: w.npi.clone(),
            name: if name.is_empty() { format!("NPI: {}", w.npi) } else { name },
            specialty: first_text(&[Some(w.specialty.as_str()), provider.map(|p| p.specialty.as_str())]),
            city: first_text(&[Some(w.city.as_str()), provider.map(|p| p.city.as_str())]),
            state: first_text(&[Some(w.state.as_str()), provider.map(|p| p.state.as_str())]),
            total_paid,
            total_claims: first_amount(&[Some(w.total_claims), provider.map(|p| p.total_claims)]),
            flag_count,
            flags: w.flags.clone(),
            flag_details: w.flag_details.clone(),
            source: Source::Legacy,
            ml_score: score,
            tier: UnifiedTier::classify(flag_count, score),
        });
    }

    for m in data.ml_scores.all_providers() {
        if m.ml_score < ML_LISTING_THRESHOLD || seen.contains(&m.npi) {
            continue;
        }
        seen.insert(m.npi.clone());
        let provider = providers.get(m.npi.as_str()).copied();
        let name = first_text(&[
            Some(m.name.as_str()),
            data.ml_names.get(&m.npi).map(String::as_str),
            provider.map(|p| p.name.as_str()),
        ]);
        rows.push(WatchlistRow {
            npi: m.npi.clone(),
            name: if name.is_empty() { format!("NPI: {}", m.npi) } else { name },
            specialty: first_text(&[Some(m.specialty.as_str()), provider.map(|p| p.specialty.as_str())]),
            city: first_text(&[Some(m.city.as_str()), provider.map(|p| p.city.as_str())]),
            state: first_text(&[Some(m.state.as_str()), provider.map(|p| p.state.as_str())]),
            total_paid: first_amount(&[Some(m.total_paid), provider.map(|p| p.total_paid)]),
            total_claims: first_amount(&[Some(m.total_claims), provider.map(|p| p.total_claims)]),
            flag_count: 0,
            flags: Vec::new(),
            flag_details: BTreeMap::new(),
            source: Source::Ml,
            ml_score: Some(m.ml_score),
            tier: UnifiedTier::MlFlag,
        });
    }

    sort_rows(&mut rows, SortBy::Risk);
    rows
}

// =============================================================================
// QUERY
// =============================================================================

/// Which detection method to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Everything
    #[default]
    All,
    /// Providers with at least one statistical flag
    Stat,
    /// Providers listed by the ML model only
    Ml,
}

impl Tab {
    /// Whether `row` belongs on this tab
    #[must_use]
    pub fn includes(self, row: &WatchlistRow) -> bool {
        match self {
            Self::All => true,
            Self::Stat => row.flag_count > 0,
            Self::Ml => row.source == Source::Ml,
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "stat" | "statistical" => Ok(Self::Stat),
            "ml" => Ok(Self::Ml),
            _ => Err(format!("Invalid tab: {s}. Use: all, stat, ml")),
        }
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Tier, then spending descending
    #[default]
    Risk,
    /// Flag count descending, then spending descending
    Flags,
    /// Spending descending
    Spending,
    /// Name ascending, case-insensitive
    Name,
    /// ML score descending, unscored last
    Ml,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "risk" => Ok(Self::Risk),
            "flags" => Ok(Self::Flags),
            "spending" => Ok(Self::Spending),
            "name" => Ok(Self::Name),
            "ml" => Ok(Self::Ml),
            _ => Err(format!("Invalid sort: {s}. Use: risk, flags, spending, name, ml")),
        }
    }
}

/// Filters and ordering for the watchlist
#[derive(Debug, Clone, Default)]
pub struct WatchlistQuery {
    /// Detection method
    pub tab: Tab,
    /// Keep only this tier
    pub tier: Option<UnifiedTier>,
    /// Keep only providers carrying this flag
    pub flag: Option<String>,
    /// Keep only this state
    pub state: Option<String>,
    /// Case-insensitive substring over name, NPI, state and city
    pub search: Option<String>,
    /// Ordering
    pub sort: SortBy,
    /// Maximum rows returned (`None` = all)
    pub limit: Option<usize>,
}

fn sort_rows(rows: &mut [WatchlistRow], sort: SortBy) {
    let by_spending = |a: &WatchlistRow, b: &WatchlistRow| b.total_paid.total_cmp(&a.total_paid);
    match sort {
        SortBy::Risk => rows.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| by_spending(a, b))),
        SortBy::Flags => {
            rows.sort_by(|a, b| b.flag_count.cmp(&a.flag_count).then_with(|| by_spending(a, b)));
        },
        SortBy::Spending => rows.sort_by(by_spending),
        SortBy::Name => rows.sort_by_key(|r| r.name.to_lowercase()),
        SortBy::Ml => rows.sort_by(|a, b| {
            b.ml_score.unwrap_or(-1.0).total_cmp(&a.ml_score.unwrap_or(-1.0))
        }),
    }
}

/// Apply a query to merged rows. Sorting is stable.
#[must_use]
pub fn apply(rows: &[WatchlistRow], query: &WatchlistQuery) -> Vec<WatchlistRow> {
    let needle = query.search.as_deref().map(str::to_lowercase).filter(|s| !s.is_empty());

    let mut result: Vec<WatchlistRow> = rows
        .iter()
        .filter(|r| query.tab.includes(r))
        .filter(|r| query.tier.is_none_or(|t| r.tier == t))
        .filter(|r| query.flag.as_ref().is_none_or(|f| r.flags.contains(f)))
        .filter(|r| query.state.as_ref().is_none_or(|s| &r.state == s))
        .filter(|r| {
            needle.as_ref().is_none_or(|q| {
                r.name.to_lowercase().contains(q)
                    || r.npi.contains(q.as_str())
                    || r.state.to_lowercase().contains(q)
                    || r.city.to_lowercase().contains(q)
            })
        })
        .cloned()
        .collect();

    sort_rows(&mut result, query.sort);
    if let Some(limit) = query.limit {
        result.truncate(limit);
    }
    result
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Count of providers carrying one flag
#[derive(Debug, Clone, Serialize)]
pub struct FlagFrequency {
    /// Flag key
    pub flag: String,
    /// Display label
    pub label: String,
    /// Providers carrying the flag
    pub count: usize,
}

/// Headline numbers over the merged watchlist
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistSummary {
    /// Providers listed
    pub total: usize,
    /// Critical tier
    pub critical: usize,
    /// High tier
    pub high: usize,
    /// Elevated tier
    pub elevated: usize,
    /// ML Flag tier
    pub ml_flag: usize,
    /// Combined spending of all listed providers
    pub total_spending: f64,
    /// Flag frequencies, most common first
    pub flag_counts: Vec<FlagFrequency>,
    /// Distinct states present, sorted
    pub states: Vec<String>,
}

/// How many of `rows` carry each flag, most common first; ties keep
/// first-seen order.
#[must_use]
pub fn flag_frequencies<'a>(rows: impl IntoIterator<Item = &'a WatchlistRow>) -> Vec<FlagFrequency> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for flag in rows.into_iter().flat_map(|r| r.flags.iter()) {
        let entry = counts.entry(flag.as_str()).or_insert_with(|| {
            order.push(flag.as_str());
            0
        });
        *entry += 1;
    }
    let mut frequencies: Vec<FlagFrequency> = order
        .into_iter()
        .map(|flag| FlagFrequency {
            flag: flag.to_string(),
            label: crate::catalog::flag_label(flag),
            count: counts.get(flag).copied().unwrap_or(0),
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}

/// Summarize merged rows.
#[must_use]
pub fn summarize(rows: &[WatchlistRow]) -> WatchlistSummary {
    let count_tier = |tier: UnifiedTier| rows.iter().filter(|r| r.tier == tier).count();

    let states: BTreeSet<String> =
        rows.iter().filter(|r| !r.state.is_empty()).map(|r| r.state.clone()).collect();

    WatchlistSummary {
        total: rows.len(),
        critical: count_tier(UnifiedTier::Critical),
        high: count_tier(UnifiedTier::High),
        elevated: count_tier(UnifiedTier::Elevated),
        ml_flag: count_tier(UnifiedTier::MlFlag),
        total_spending: rows.iter().map(|r| r.total_paid).sum(),
        flag_counts: flag_frequencies(rows),
        states: states.into_iter().collect(),
    }
}

/// Filtered rows plus the summary of the unfiltered list.
///
/// Tier counts cover every row; flag frequencies cover the selected tab.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistReport {
    /// Summary over every merged row, flag frequencies over the tab
    pub summary: WatchlistSummary,
    /// Rows matching the query (before the limit)
    pub matched: usize,
    /// Rows returned
    pub rows: Vec<WatchlistRow>,
}

/// Merge, filter and summarize in one step.
#[must_use]
pub fn report(data: &Dataset, query: &WatchlistQuery) -> WatchlistReport {
    let all = merge(data);
    let unlimited = WatchlistQuery {
        limit: None,
        ..query.clone()
    };
    let mut rows = apply(&all, &unlimited);
    let matched = rows.len();
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }
    let mut summary = summarize(&all);
    summary.flag_counts = flag_frequencies(all.iter().filter(|r| query.tab.includes(r)));
    WatchlistReport {
        summary,
        matched,
        rows,
    }
}
