//! Pure API handlers
//!
//! These handlers contain the report logic shared by the CLI and the HTTP
//! server. They take a loaded [`Dataset`] plus typed input and return
//! `Result<T, ApiError>`.

use crate::catalog::{self, FlagInfo, flag_info};
use crate::dataset::{Dataset, IssueSeverity, is_npi, is_state_code};
use crate::exclusions::{self, ExclusionsReport};
use crate::format;
use crate::ml::{self, MlSummary};
use crate::profile::{self, ProviderProfile};
use crate::search::{self, SearchResults};
use crate::states::{self, HeatView, StateReport, StatesReport};
use crate::trends::{self, TrendsReport};
use crate::watchlist::{self, WatchlistReport};

use super::error::ApiError;
use super::types::{FormatData, StatsData, ValidationData, WatchlistRequest};

// =============================================================================
// OVERVIEW
// =============================================================================

/// Headline numbers
#[must_use]
pub fn get_stats(data: &Dataset) -> StatsData {
    StatsData {
        stats: data.stats,
        total_paid: format::format_money(data.stats.total_paid),
        records: format::format_number(data.stats.records),
        providers: format::format_number(data.stats.providers),
    }
}

/// Every known flag with display metadata
#[must_use]
pub fn list_flags() -> Vec<FlagInfo> {
    catalog::flags::known_flags().into_iter().map(flag_info).collect()
}

/// Check fixtures against the expected schema
#[must_use]
pub fn validate(data: &Dataset) -> ValidationData {
    let issues = data.validate();
    let errors = issues.iter().filter(|i| i.severity == IssueSeverity::Error).count();
    ValidationData {
        data_dir: data.root.display().to_string(),
        errors,
        warnings: issues.len() - errors,
        issues,
    }
}

// =============================================================================
// PROVIDERS
// =============================================================================

/// Filtered unified watchlist
pub fn get_watchlist(data: &Dataset, req: &WatchlistRequest) -> Result<WatchlistReport, ApiError> {
    let query = req.to_query()?;
    Ok(watchlist::report(data, &query))
}

/// Full provider profile
pub fn get_provider(data: &Dataset, npi: &str) -> Result<ProviderProfile, ApiError> {
    let npi = npi.trim();
    if !is_npi(npi) {
        return Err(ApiError::invalid("NPI", npi));
    }
    Ok(profile::build(data, npi)?)
}

/// "Is my provider flagged?" lookup
#[must_use]
pub fn search_providers(data: &Dataset, query: &str) -> SearchResults {
    search::search(data, query)
}

// =============================================================================
// GEOGRAPHY & TRENDS
// =============================================================================

/// State spending rankings and heat map
pub fn list_states(data: &Dataset, view: Option<&str>) -> Result<StatesReport, ApiError> {
    let view = match view.filter(|v| !v.is_empty()) {
        Some(v) => v.parse::<HeatView>().map_err(ApiError::bad_request)?,
        None => HeatView::default(),
    };
    Ok(states::rankings(data, view))
}

/// One state's page
pub fn get_state(data: &Dataset, code: &str) -> Result<StateReport, ApiError> {
    let code = code.trim().to_uppercase();
    if !is_state_code(&code) {
        return Err(ApiError::invalid("state code", &code));
    }
    Ok(states::detail(data, &code)?)
}

/// Yearly national trends
#[must_use]
pub fn get_trends(data: &Dataset) -> TrendsReport {
    trends::yearly(&data.yearly_trends)
}

/// Excluded providers still billing
#[must_use]
pub fn get_exclusions(data: &Dataset) -> ExclusionsReport {
    exclusions::report(&data.exclusions)
}

/// Model summary
#[must_use]
pub fn get_ml(data: &Dataset) -> MlSummary {
    ml::summary(&data.ml_scores, &data.ml_names)
}

// =============================================================================
// FORMATTING
// =============================================================================

/// Formatter names accepted by [`format_value`]
pub const FORMAT_KINDS: &[&str] = &[
    "money", "number", "money-full", "cpc", "percent", "growth", "ratio", "state", "flag",
    "hcpcs", "feature", "title", "date",
];

fn number(kind: &str, value: &str) -> Result<f64, ApiError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ApiError::bad_request(format!("{kind} expects a number, got '{value}'")))
}

/// Apply a named formatter to a raw value
pub fn format_value(kind: &str, value: &str) -> Result<FormatData, ApiError> {
    let output = match kind {
        "money" => format::format_money(number(kind, value)?),
        "number" => format::format_number(number(kind, value)?),
        "money-full" => format::format_money_full(number(kind, value)?),
        "cpc" => format::format_cpc(Some(number(kind, value)?)),
        "percent" => format::format_percent(number(kind, value)?),
        "growth" => format::format_growth(number(kind, value)?),
        "ratio" => format::format_ratio(Some(number(kind, value)?)),
        "state" => catalog::state_name(value),
        "flag" => catalog::flag_label(value),
        "hcpcs" => catalog::hcpcs_label(value),
        "feature" => catalog::feature_label(value),
        "title" => format::title_case(value),
        "date" => format::format_exclusion_date(value),
        other => {
            return Err(ApiError::bad_request(format!(
                "Unknown format kind: {other}. Use: {}",
                FORMAT_KINDS.join(", ")
            )));
        },
    };

    Ok(FormatData {
        kind: kind.to_string(),
        input: value.to_string(),
        output,
    })
}
