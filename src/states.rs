//! State rankings, the flagged-provider heat map and state detail pages

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::state_name;
use crate::dataset::{DataError, Dataset};
use crate::format::Intensity;
use crate::models::{GeoRisk, Provider, StateProcedure, StateSummary, YearlyTrend};

/// Row label the pipeline uses for providers with no state
pub const UNKNOWN_STATE: &str = "Unknown";

/// Errors from state lookups
#[derive(Debug, Error)]
pub enum LookupError {
    /// Neither a detail file nor a summary entry exists
    #[error("no data found for state {0}")]
    NotFound(String),

    /// The detail file exists but could not be loaded
    #[error(transparent)]
    Data(#[from] DataError),
}

/// How the heat map is bucketed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatView {
    /// Flagged providers per 100k residents
    #[default]
    PerCapita,
    /// Absolute flagged-provider counts
    Total,
}

impl FromStr for HeatView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-capita" | "percapita" | "capita" => Ok(Self::PerCapita),
            "total" => Ok(Self::Total),
            other => Err(format!("unknown view '{other}' (expected per-capita or total)")),
        }
    }
}

/// One state in the spending ranking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRanking {
    /// 1-based rank by spending
    pub rank: usize,
    /// Two-letter code
    pub code: String,
    /// Full name
    pub name: String,
    /// Total payments
    pub total_payments: f64,
    /// Total claims
    pub total_claims: f64,
    /// Providers in the summary
    pub provider_count: f64,
    /// Percent of the national total
    pub share: f64,
    /// Bar width in percent of the largest state
    pub bar_width: f64,
}

/// One cell of the heat map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatCell {
    /// Two-letter code
    pub code: String,
    /// Full name
    pub name: String,
    /// Flagged providers
    pub flagged_count: usize,
    /// Flagged providers per 100k residents
    pub flags_per_capita: f64,
    /// Statistical flags
    pub stat_flags: usize,
    /// ML-only flags
    pub ml_flags: usize,
    /// Bucket for the selected view
    pub intensity: Intensity,
}

/// Rankings plus heat map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatesReport {
    /// Sum of payments across ranked states
    pub national_total: f64,
    /// States by spending, descending
    pub rankings: Vec<StateRanking>,
    /// Heat view the cells were bucketed for
    pub view: HeatView,
    /// Heat map cells
    pub heat: Vec<HeatCell>,
}

/// Rank states by spending and bucket flagged providers for `view`.
#[must_use]
pub fn rankings(data: &Dataset, view: HeatView) -> StatesReport {
    let mut states: Vec<&StateSummary> =
        data.states.iter().filter(|s| s.state != UNKNOWN_STATE).collect();
    states.sort_by(|a, b| b.total_payments.total_cmp(&a.total_payments));

    let national_total: f64 = states.iter().map(|s| s.total_payments).sum();
    let largest = states.first().map_or(0.0, |s| s.total_payments);

    let rankings = states
        .iter()
        .enumerate()
        .map(|(i, s)| StateRanking {
            rank: i + 1,
            code: s.state.clone(),
            name: state_name(&s.state),
            total_payments: s.total_payments,
            total_claims: s.total_claims,
            provider_count: s.provider_count,
            share: percent_of(s.total_payments, national_total),
            bar_width: percent_of(s.total_payments, largest),
        })
        .collect();

    StatesReport {
        national_total,
        rankings,
        view,
        heat: heat_map(&data.geo_risk, view),
    }
}

const fn percent_of(value: f64, whole: f64) -> f64 {
    if whole > 0.0 { value / whole * 100.0 } else { 0.0 }
}

fn heat_map(geo: &[GeoRisk], view: HeatView) -> Vec<HeatCell> {
    let mut cells: Vec<HeatCell> = geo
        .iter()
        .filter(|g| g.state.len() == 2)
        .map(|g| HeatCell {
            code: g.state.clone(),
            name: state_name(&g.state),
            flagged_count: g.flagged_count,
            flags_per_capita: g.flags_per_capita,
            stat_flags: g.stat_flags,
            ml_flags: g.ml_flags,
            intensity: match view {
                HeatView::PerCapita => Intensity::per_capita(g.flags_per_capita),
                HeatView::Total => {
                    Intensity::flag_total(u64::try_from(g.flagged_count).unwrap_or(u64::MAX))
                },
            },
        })
        .collect();

    if view == HeatView::PerCapita {
        cells.sort_by(|a, b| b.flags_per_capita.total_cmp(&a.flags_per_capita));
    }
    cells
}

/// Everything shown on a state page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    /// Two-letter code
    pub code: String,
    /// Full name
    pub name: String,
    /// Summary totals (detail file first, then the summary list)
    pub summary: StateSummary,
    /// Largest providers
    pub top_providers: Vec<Provider>,
    /// Largest procedure codes
    pub top_procedures: Vec<StateProcedure>,
    /// Yearly totals
    pub yearly_trends: Vec<YearlyTrend>,
    /// Geographic risk row, if any
    pub risk: Option<GeoRisk>,
}

/// Build the page for one state.
pub fn detail(data: &Dataset, code: &str) -> Result<StateReport, LookupError> {
    let code = code.trim().to_uppercase();
    let file = data.state_detail(&code)?;
    let listed = data.states.iter().find(|s| s.state == code);

    let (summary, top_providers, top_procedures, yearly_trends) = match (file, listed) {
        (None, None) => return Err(LookupError::NotFound(code)),
        (Some(f), listed) => (
            f.summary.or_else(|| listed.cloned()).unwrap_or_default(),
            f.top_providers,
            f.top_procedures,
            f.yearly_trends,
        ),
        (None, Some(s)) => (s.clone(), Vec::new(), Vec::new(), Vec::new()),
    };

    Ok(StateReport {
        name: state_name(&code),
        risk: data.geo_risk.iter().find(|g| g.state == code).cloned(),
        code,
        summary,
        top_providers,
        top_procedures,
        yearly_trends,
    })
}
