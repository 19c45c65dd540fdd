//! Provider profile
//!
//! Assembles everything known about one NPI from the detail file, both
//! watchlists and the top-provider list. Sources are consulted in that
//! order and the first non-empty value wins for each field.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{FlagInfo, flag_info, hcpcs_description, merge_flags, state_name};
use crate::dataset::{DataError, Dataset};
use crate::explain::flag_explanation;
use crate::format::RiskLevel;
use crate::models::{MonthlyPoint, ProcedureLine};
use crate::watchlist::{first_amount, first_text};

/// Errors from profile assembly
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No fixture mentions this NPI
    #[error("no data found for NPI {0}")]
    NotFound(String),

    /// The detail file exists but could not be loaded
    #[error(transparent)]
    Data(#[from] DataError),
}

/// A flag with its display metadata and evidence
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFlag {
    /// Display metadata
    #[serde(flatten)]
    pub info: FlagInfo,
    /// Evidence sentence (empty when the pipeline recorded none)
    pub explanation: String,
}

/// A procedure line with its description
#[derive(Debug, Clone, Serialize)]
pub struct ProfileProcedure {
    /// Fixture values
    #[serde(flatten)]
    pub line: ProcedureLine,
    /// HCPCS description (empty when unknown)
    pub description: String,
}

/// Everything shown on a provider page
#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfile {
    /// National Provider Identifier
    pub npi: String,
    /// Display name (`Provider <npi>` when unknown)
    pub name: String,
    /// Specialty
    pub specialty: String,
    /// City
    pub city: String,
    /// Two-letter state code
    pub state: String,
    /// Full state name
    pub state_name: String,
    /// Total payments received
    pub total_paid: f64,
    /// Total claims filed
    pub total_claims: f64,
    /// Total distinct beneficiaries
    pub total_benes: f64,
    /// `total_paid / total_claims` (0 when no claims)
    pub avg_per_claim: f64,
    /// `total_claims / total_benes` (0 when no beneficiaries)
    pub claims_per_bene: f64,
    /// Year-over-year growth in percent
    pub growth_rate: f64,
    /// Risk level from the flag count
    pub risk: RiskLevel,
    /// Flags from every source, first-seen order
    pub flags: Vec<ProfileFlag>,
    /// ML score, when scored
    pub ml_score: Option<f64>,
    /// Monthly billing series
    pub monthly: Vec<MonthlyPoint>,
    /// Procedure mix
    pub procedures: Vec<ProfileProcedure>,
    /// True when no detail file exists and only list data is shown
    pub limited_data: bool,
}

impl ProviderProfile {
    /// Number of distinct flags
    #[must_use]
    pub fn flag_count(&self) -> usize {
        self.flags.len()
    }
}

const fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}

/// Build the profile for `npi`.
pub fn build(data: &Dataset, npi: &str) -> Result<ProviderProfile, ProfileError> {
    let detail = data.provider_detail(npi)?;
    let smart = data.find_smart_entry(npi);
    let legacy = data.find_legacy_entry(npi);
    let top = data.find_top_provider(npi);

    if detail.is_none() && top.is_none() && smart.is_none() {
        return Err(ProfileError::NotFound(npi.to_string()));
    }

    let d = detail.as_ref();
    let name = first_text(&[
        d.map(|x| x.name.as_str()),
        smart.map(|x| x.name.as_str()),
        top.map(|x| x.name.as_str()),
    ]);
    let state = first_text(&[
        d.map(|x| x.state.as_str()),
        smart.map(|x| x.state.as_str()),
        top.map(|x| x.state.as_str()),
    ]);
    let total_paid = first_amount(&[
        d.map(|x| x.total_paid),
        smart.map(|x| x.total_paid),
        top.map(|x| x.total_paid),
    ]);
    let total_claims = first_amount(&[d.map(|x| x.total_claims), top.map(|x| x.total_claims)]);
    let total_benes = first_amount(&[d.map(|x| x.total_benes), top.map(|x| x.total_benes)]);

    let empty: &[String] = &[];
    let detail_flags = match d.and_then(|x| x.flags.as_deref()) {
        Some(flags) => flags,
        None => top.map_or(empty, |x| x.flags.as_slice()),
    };
    let flags = merge_flags(&[
        smart.map_or(empty, |x| x.flags.as_slice()),
        legacy.map_or(empty, |x| x.flags.as_slice()),
        detail_flags,
    ]);

    let mut details: BTreeMap<&str, &Value> = BTreeMap::new();
    for entry in [smart, legacy].into_iter().flatten() {
        for (key, value) in &entry.flag_details {
            details.entry(key.as_str()).or_insert(value);
        }
    }

    let flags: Vec<ProfileFlag> = flags
        .iter()
        .map(|flag| ProfileFlag {
            info: flag_info(flag),
            explanation: flag_explanation(flag, details.get(flag.as_str()).copied()),
        })
        .collect();

    let procedures = d
        .map(|x| {
            x.procedures
                .iter()
                .map(|line| ProfileProcedure {
                    description: hcpcs_description(&line.code).to_string(),
                    line: line.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    log::debug!("Built profile for {npi} with {} flag(s)", flags.len());

    Ok(ProviderProfile {
        npi: npi.to_string(),
        name: if name.is_empty() { format!("Provider {npi}") } else { name },
        specialty: first_text(&[
            d.map(|x| x.specialty.as_str()),
            smart.map(|x| x.specialty.as_str()),
            top.map(|x| x.specialty.as_str()),
        ]),
        city: first_text(&[
            d.map(|x| x.city.as_str()),
            smart.map(|x| x.city.as_str()),
            top.map(|x| x.city.as_str()),
        ]),
        state_name: state_name(&state),
        state,
        total_paid,
        total_claims,
        total_benes,
        avg_per_claim: ratio(total_paid, total_claims),
        claims_per_bene: ratio(total_claims, total_benes),
        growth_rate: d.map_or(0.0, |x| x.growth_rate),
        risk: RiskLevel::from_flag_count(flags.len()),
        flags,
        ml_score: data.find_ml(npi).map(|m| m.ml_score),
        monthly: d.map(|x| x.monthly.clone()).unwrap_or_default(),
        procedures,
        limited_data: detail.is_none(),
    })
}
