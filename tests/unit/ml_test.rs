//! Tests for the model summary

use std::collections::BTreeMap;

use openmedicaid::dataset::Dataset;
use openmedicaid::format::Tone;
use openmedicaid::ml::summary;
use openmedicaid::models::{MlProvider, MlScores};

use crate::common::{ACME, TestData, VALLEY};

#[test]
fn test_summary_from_fixture() {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    let summary = summary(&data.ml_scores, &data.ml_names);

    assert!((summary.model_auc - 0.883).abs() < f64::EPSILON);
    assert_eq!(summary.small_provider_flags, 2);

    let labels: Vec<&str> = summary.features.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["Total Payments", "Cost Per Claim", "mystery_feature"]);

    let acme = &summary.top_providers[0];
    assert_eq!(acme.provider.npi, ACME);
    assert_eq!(acme.tone, Tone::Orange);

    let valley = &summary.top_providers[1];
    assert_eq!(valley.provider.npi, VALLEY);
    assert_eq!(valley.display_name, "Valley Pharmacy");
    assert_eq!(valley.tone, Tone::Red);
}

#[test]
fn test_distribution_keeps_missing_percentiles() {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    let summary = summary(&data.ml_scores, &data.ml_names);

    let scores: Vec<Option<f64>> = summary.distribution.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![Some(0.12), Some(0.4), None, Some(0.8), None]);
    assert_eq!(summary.distribution[0].label, "Median (p50)");
    assert_eq!(summary.distribution[4].label, "p99.9");
}

#[test]
fn test_feature_bars_narrow_to_a_floor() {
    let scores = MlScores {
        features_used: (0..10).map(|i| format!("f{i}")).collect(),
        ..Default::default()
    };
    let summary = summary(&scores, &BTreeMap::new());

    assert!((summary.features[0].bar_width - 100.0).abs() < 1e-9);
    assert!((summary.features[1].bar_width - 90.0).abs() < 1e-9);
    assert!((summary.features[9].bar_width - 15.0).abs() < 1e-9);
}

#[test]
fn test_unnamed_provider_falls_back_to_npi() {
    let scores = MlScores {
        top_providers: vec![MlProvider {
            npi: "1234567890".into(),
            ml_score: 0.1,
            ..Default::default()
        }],
        ..Default::default()
    };
    let summary = summary(&scores, &BTreeMap::new());
    assert_eq!(summary.top_providers[0].display_name, "NPI: 1234567890");
    assert_eq!(summary.top_providers[0].tone, Tone::Green);
}
