//! Fraud-similarity model summary

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::feature_label;
use crate::format::{Tone, ml_score_tone};
use crate::models::{MlProvider, MlScores};

/// Percentiles shown on the distribution chart: key, label, description
pub const PERCENTILES: [(&str, &str, &str); 5] = [
    ("p50", "Median (p50)", "Typical provider"),
    ("p90", "p90", "Top 10%"),
    ("p95", "p95", "Top 5%"),
    ("p99", "p99", "Top 1%"),
    ("p999", "p99.9", "Top 0.1%"),
];

/// Narrowest feature bar, in percent
const MIN_FEATURE_BAR: f64 = 15.0;

/// A model input with its display label
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Column name
    pub name: String,
    /// Human label
    pub label: String,
    /// Importance bar width in percent (features arrive ordered by importance)
    pub bar_width: f64,
}

/// One row of the score distribution
#[derive(Debug, Clone, Serialize)]
pub struct Percentile {
    /// Display label
    pub label: String,
    /// Population described
    pub description: String,
    /// Score at the percentile, when recorded
    pub score: Option<f64>,
}

/// A scored provider with its display tone
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProvider {
    /// Fixture values
    #[serde(flatten)]
    pub provider: MlProvider,
    /// Name, resolved from the name map when the score file has none
    pub display_name: String,
    /// Score band tone
    pub tone: Tone,
}

/// The model page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MlSummary {
    /// Holdout AUC
    pub model_auc: f64,
    /// Providers scored
    pub total_providers: f64,
    /// Inputs, most important first
    pub features: Vec<Feature>,
    /// Score percentiles
    pub distribution: Vec<Percentile>,
    /// Highest-scoring large providers
    pub top_providers: Vec<ScoredProvider>,
    /// Flagged small providers
    pub small_provider_flags: usize,
}

fn scored(p: &MlProvider, names: &BTreeMap<String, String>) -> ScoredProvider {
    let display_name = if p.name.is_empty() {
        names.get(&p.npi).cloned().unwrap_or_else(|| format!("NPI: {}", p.npi))
    } else {
        p.name.clone()
    };
    ScoredProvider {
        provider: p.clone(),
        display_name,
        tone: ml_score_tone(p.ml_score),
    }
}

/// Summarize the model output, taking names from `names` where the score
/// file has none.
#[must_use]
pub fn summary(scores: &MlScores, names: &BTreeMap<String, String>) -> MlSummary {
    let count = scores.features_used.len();
    #[allow(clippy::cast_precision_loss)]
    let step = if count > 0 { 100.0 / count as f64 } else { 0.0 };

    let features = scores
        .features_used
        .iter()
        .enumerate()
        .map(|(i, name)| {
            #[allow(clippy::cast_precision_loss)]
            let width = 100.0 - i as f64 * step;
            Feature {
                name: name.clone(),
                label: feature_label(name),
                bar_width: width.max(MIN_FEATURE_BAR),
            }
        })
        .collect();

    let distribution = PERCENTILES
        .iter()
        .map(|(key, label, description)| Percentile {
            label: (*label).to_string(),
            description: (*description).to_string(),
            score: scores.score_distribution.get(*key).copied(),
        })
        .collect();

    MlSummary {
        model_auc: scores.model_auc,
        total_providers: scores.total_providers,
        features,
        distribution,
        top_providers: scores.top_providers.iter().map(|p| scored(p, names)).collect(),
        small_provider_flags: scores.small_provider_flags.len(),
    }
}
