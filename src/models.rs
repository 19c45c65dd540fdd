//! Fixture record types
//!
//! The fixtures were produced by an external pipeline over several
//! iterations, so field names and value types drift between files (NPIs as
//! strings or numbers, flags as arrays or pipe-separated strings, `null`
//! totals). The deserializers here absorb that drift so the rest of the
//! crate sees one consistent shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::parse_flags;

// =============================================================================
// LENIENT DESERIALIZERS
// =============================================================================

fn npi_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(value_as_f64(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn f64_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(value_as_f64(&Value::deserialize(deserializer)?).filter(|v| v.is_finite()))
}

fn count_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_u64().and_then(|n| usize::try_from(n).ok()).unwrap_or(0))
}

fn flags_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_flags([s]),
        Value::Array(items) => parse_flags(items.iter().filter_map(Value::as_str)),
        _ => Vec::new(),
    })
}

/// Like `flags_from_any`, but keeps "no list at all" apart from an empty list
fn optional_flags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(parse_flags([s])),
        Value::Array(items) => Some(parse_flags(items.iter().filter_map(Value::as_str))),
        _ => None,
    })
}

fn details_or_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

// =============================================================================
// HEADLINE
// =============================================================================

/// `stats.json`: dataset-wide headline numbers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineStats {
    /// Total Medicaid payments across all records
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_paid: f64,
    /// Number of billing records
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub records: f64,
    /// Number of distinct billing NPIs
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub providers: f64,
}

// =============================================================================
// PROVIDERS & WATCHLISTS
// =============================================================================

/// Entry of `top-providers-1000.json`
///
/// State detail files list providers with snake-case totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// National Provider Identifier
    #[serde(default, deserialize_with = "npi_from_any")]
    pub npi: String,
    /// Provider or organization name
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Taxonomy / specialty description
    #[serde(default, deserialize_with = "string_or_empty")]
    pub specialty: String,
    /// City
    #[serde(default, deserialize_with = "string_or_empty")]
    pub city: String,
    /// Two-letter state code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// Total payments received
    #[serde(default, alias = "total_paid", alias = "total_payments", deserialize_with = "f64_or_zero")]
    pub total_paid: f64,
    /// Total claims filed
    #[serde(default, alias = "total_claims", deserialize_with = "f64_or_zero")]
    pub total_claims: f64,
    /// Total distinct beneficiaries
    #[serde(default, alias = "total_benes", deserialize_with = "f64_or_zero")]
    pub total_benes: f64,
    /// Flag keys (normalized)
    #[serde(default, deserialize_with = "flags_from_any")]
    pub flags: Vec<String>,
}

/// Entry of `smart-watchlist.json` or the legacy `expanded-watchlist.json`
///
/// Legacy entries spell `flag_count` and `flag_details` in snake case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    /// National Provider Identifier
    #[serde(default, deserialize_with = "npi_from_any")]
    pub npi: String,
    /// Provider name
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Specialty
    #[serde(default, deserialize_with = "string_or_empty")]
    pub specialty: String,
    /// City
    #[serde(default, deserialize_with = "string_or_empty")]
    pub city: String,
    /// Two-letter state code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// Total payments received
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_paid: f64,
    /// Total claims filed
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_claims: f64,
    /// Number of flags as recorded by the pipeline
    #[serde(default, alias = "flag_count", deserialize_with = "count_or_zero")]
    pub flag_count: usize,
    /// Flag keys (normalized)
    #[serde(default, deserialize_with = "flags_from_any")]
    pub flags: Vec<String>,
    /// Per-flag evidence, free-form
    #[serde(default, alias = "flag_details", deserialize_with = "details_or_empty")]
    pub flag_details: BTreeMap<String, Value>,
}

impl WatchlistEntry {
    /// Recorded flag count, or the length of the flag list when absent
    #[must_use]
    pub fn effective_flag_count(&self) -> usize {
        if self.flag_count > 0 { self.flag_count } else { self.flags.len() }
    }
}

/// A provider scored by the fraud-similarity model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlProvider {
    /// National Provider Identifier
    #[serde(default, deserialize_with = "npi_from_any")]
    pub npi: String,
    /// Model score in `[0, 1]`
    #[serde(default, alias = "score", deserialize_with = "f64_or_zero")]
    pub ml_score: f64,
    /// Provider name, when the pipeline resolved one
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Specialty
    #[serde(default, deserialize_with = "string_or_empty")]
    pub specialty: String,
    /// City
    #[serde(default, deserialize_with = "string_or_empty")]
    pub city: String,
    /// Two-letter state code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// Total payments received
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_paid: f64,
    /// Total claims filed
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_claims: f64,
}

/// `ml-scores.json`: model metadata plus scored providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlScores {
    /// Area under the ROC curve on the holdout set
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub model_auc: f64,
    /// Number of providers scored
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_providers: f64,
    /// Feature names the model used
    #[serde(default)]
    pub features_used: Vec<String>,
    /// Score percentiles keyed `p50`, `p90`, `p95`, `p99`, `p999`
    #[serde(default)]
    pub score_distribution: BTreeMap<String, f64>,
    /// Highest-scoring large providers
    #[serde(default)]
    pub top_providers: Vec<MlProvider>,
    /// Smaller providers flagged by the model
    #[serde(default)]
    pub small_provider_flags: Vec<MlProvider>,
}

impl MlScores {
    /// Large providers followed by small-provider flags
    pub fn all_providers(&self) -> impl Iterator<Item = &MlProvider> {
        self.top_providers.iter().chain(self.small_provider_flags.iter())
    }
}

// =============================================================================
// PROVIDER DETAIL
// =============================================================================

/// One month of a provider's billing series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    #[serde(default, deserialize_with = "string_or_empty")]
    pub month: String,
    /// Payments that month
    #[serde(default, alias = "payments", deserialize_with = "f64_or_zero")]
    pub paid: f64,
    /// Claims that month
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub claims: f64,
}

/// One procedure code in a provider's billing mix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureLine {
    /// HCPCS code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub code: String,
    /// Payments for this code
    #[serde(default, alias = "payments", deserialize_with = "f64_or_zero")]
    pub paid: f64,
    /// Claims for this code
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub claims: f64,
    /// Provider's own cost per claim
    #[serde(default, deserialize_with = "f64_or_none")]
    pub provider_cpc: Option<f64>,
    /// National median cost per claim for the code
    #[serde(default, deserialize_with = "f64_or_none")]
    pub national_median_cpc: Option<f64>,
    /// `provider_cpc / national_median_cpc`
    #[serde(default, deserialize_with = "f64_or_none")]
    pub cpc_ratio: Option<f64>,
    /// Decile label such as `Top 5%`
    #[serde(default)]
    pub decile: Option<String>,
}

/// `providers/<npi>.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDetail {
    /// National Provider Identifier
    #[serde(default, deserialize_with = "npi_from_any")]
    pub npi: String,
    /// Provider name
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    /// Specialty
    #[serde(default, deserialize_with = "string_or_empty")]
    pub specialty: String,
    /// City
    #[serde(default, deserialize_with = "string_or_empty")]
    pub city: String,
    /// Two-letter state code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// Total payments received
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_paid: f64,
    /// Total claims filed
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_claims: f64,
    /// Total distinct beneficiaries
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_benes: f64,
    /// Year-over-year growth in percent
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub growth_rate: f64,
    /// Monthly billing series
    #[serde(default)]
    pub monthly: Vec<MonthlyPoint>,
    /// Procedure mix
    #[serde(default, alias = "topProcedures")]
    pub procedures: Vec<ProcedureLine>,
    /// Flag keys (normalized); `None` when the file has no flag list
    #[serde(default, deserialize_with = "optional_flags")]
    pub flags: Option<Vec<String>>,
}

// =============================================================================
// GEOGRAPHY & TRENDS
// =============================================================================

/// Entry of `states-summary.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSummary {
    /// Two-letter state code, or `Unknown`
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// Total payments in the state
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_payments: f64,
    /// Total claims in the state
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_claims: f64,
    /// Total beneficiaries in the state
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_benes: f64,
    /// Number of providers in the summary
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub provider_count: f64,
}

/// Entry of `geographic-risk.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRisk {
    /// Two-letter state code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// Flagged providers (statistical or ML)
    #[serde(default, deserialize_with = "count_or_zero")]
    pub flagged_count: usize,
    /// Flagged providers per 100k residents
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub flags_per_capita: f64,
    /// Medicaid spending per resident
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub spending_per_capita: f64,
    /// Total spending
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_spending: f64,
    /// Resident population
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub population: f64,
    /// Providers flagged by statistical tests
    #[serde(default, deserialize_with = "count_or_zero")]
    pub stat_flags: usize,
    /// Providers flagged by the ML model only
    #[serde(default, deserialize_with = "count_or_zero")]
    pub ml_flags: usize,
}

/// Entry of `yearly-trends.json`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTrend {
    /// Calendar year
    #[serde(default)]
    pub year: i32,
    /// Total payments that year
    #[serde(default, alias = "total_payments", deserialize_with = "f64_or_zero")]
    pub payments: f64,
    /// Total claims that year
    #[serde(default, alias = "total_claims", deserialize_with = "f64_or_zero")]
    pub claims: f64,
    /// Active providers that year
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub providers: f64,
    /// Payment growth over the previous year, in percent
    #[serde(default, deserialize_with = "f64_or_none")]
    pub payment_growth: Option<f64>,
}

/// One procedure in a state's top list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateProcedure {
    /// HCPCS code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub code: String,
    /// Payments for the code in the state
    #[serde(default, alias = "total_payments", deserialize_with = "f64_or_zero")]
    pub payments: f64,
    /// Claims for the code in the state
    #[serde(default, alias = "total_claims", deserialize_with = "f64_or_zero")]
    pub claims: f64,
}

/// `states/<code>.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateDetail {
    /// Summary row for the state
    #[serde(default)]
    pub summary: Option<StateSummary>,
    /// Largest providers in the state
    #[serde(default)]
    pub top_providers: Vec<Provider>,
    /// Largest procedure codes in the state
    #[serde(default)]
    pub top_procedures: Vec<StateProcedure>,
    /// Yearly totals for the state
    #[serde(default)]
    pub yearly_trends: Vec<YearlyTrend>,
}

// =============================================================================
// EXCLUSIONS
// =============================================================================

/// Entry of `leie-matched.json`: an excluded provider still found billing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionEntry {
    /// Last name (individuals)
    #[serde(default, deserialize_with = "string_or_empty")]
    pub last_name: String,
    /// First name (individuals)
    #[serde(default, deserialize_with = "string_or_empty")]
    pub first_name: String,
    /// Middle name (individuals)
    #[serde(default, deserialize_with = "string_or_empty")]
    pub mid_name: String,
    /// Business name (entities)
    #[serde(default, deserialize_with = "string_or_empty")]
    pub bus_name: String,
    /// General category
    #[serde(default, deserialize_with = "string_or_empty")]
    pub general: String,
    /// Specialty
    #[serde(default, deserialize_with = "string_or_empty")]
    pub specialty: String,
    /// National Provider Identifier
    #[serde(default, deserialize_with = "npi_from_any")]
    pub npi: String,
    /// City
    #[serde(default, deserialize_with = "string_or_empty")]
    pub city: String,
    /// Two-letter state code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    /// ZIP code
    #[serde(default, deserialize_with = "string_or_empty")]
    pub zip: String,
    /// Exclusion authority code, e.g. `1128a1`
    #[serde(default, deserialize_with = "string_or_empty")]
    pub excl_type: String,
    /// Human description of the exclusion authority
    #[serde(default, deserialize_with = "string_or_empty")]
    pub excl_type_desc: String,
    /// Exclusion date as `YYYYMMDD`
    #[serde(default, deserialize_with = "string_or_empty")]
    pub excl_date: String,
}
