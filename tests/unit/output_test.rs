//! Tests for the Output module
//!
//! Reports render either as human-readable text or as JSON. These tests
//! check the JSON shape and that both modes render without panicking.

use openmedicaid::api;
use openmedicaid::dataset::Dataset;
use openmedicaid::format::Tone;
use openmedicaid::output::{FlagList, OperationResult, OutputMode, Render, bar, paint};
use openmedicaid::states::HeatView;
use openmedicaid::watchlist::{self, WatchlistQuery};
use openmedicaid::{profile, search, states};

use crate::common::{ACME, CLEAN, TestData};

fn dataset() -> (TestData, Dataset) {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    (fixtures, data)
}

// =============================================================================
// OutputMode & Helpers
// =============================================================================

#[test]
fn test_output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn test_bar_fills_proportionally() {
    assert_eq!(bar(0.0), "\u{2591}".repeat(30));
    assert_eq!(bar(100.0), "\u{2588}".repeat(30));
    assert_eq!(bar(50.0).matches('\u{2588}').count(), 15);
    assert_eq!(bar(f64::NAN), bar(0.0));
    assert_eq!(bar(250.0), bar(100.0));
}

#[test]
fn test_paint_keeps_text() {
    assert_eq!(&*paint("CRITICAL", Tone::Red), "CRITICAL");
    assert_eq!(&*paint("", Tone::Slate), "");
}

// =============================================================================
// JSON Shape
// =============================================================================

#[test]
fn test_stats_serialize_camel_case() {
    let (_fixtures, data) = dataset();
    let json = serde_json::to_value(api::get_stats(&data)).unwrap();
    assert_eq!(json["totalPaid"], "$1.09T");
    assert!(json["stats"]["totalPaid"].is_number());
}

#[test]
fn test_watchlist_rows_serialize_tier_label() {
    let (_fixtures, data) = dataset();
    let report = watchlist::report(&data, &WatchlistQuery::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["rows"][0]["tier"], "Critical");
    assert_eq!(json["rows"][0]["source"], "smart");
    assert_eq!(json["rows"][3]["tier"], "ML Flag");
    assert_eq!(json["matched"], 5);
}

#[test]
fn test_profile_flags_are_flattened() {
    let (_fixtures, data) = dataset();
    let json = serde_json::to_value(profile::build(&data, ACME).unwrap()).unwrap();
    let flag = &json["flags"][1];
    assert_eq!(flag["key"], "code_specific_outlier");
    assert_eq!(flag["tone"], "red");
    assert!(flag["explanation"].as_str().unwrap().contains("T1019"));
    assert_eq!(json["risk"], "CRITICAL");
    assert_eq!(json["procedures"][0]["code"], "T1019");
}

#[test]
fn test_heat_view_serializes_kebab_case() {
    let (_fixtures, data) = dataset();
    let json = serde_json::to_value(states::rankings(&data, HeatView::PerCapita)).unwrap();
    assert_eq!(json["view"], "per-capita");
    assert_eq!(json["heat"][0]["intensity"], "severe");
}

#[test]
fn test_search_results_serialize() {
    let (_fixtures, data) = dataset();
    let json = serde_json::to_value(search::search(&data, "acme")).unwrap();
    assert_eq!(json["isNpiQuery"], false);
    assert_eq!(json["hits"][0]["isFlagged"], true);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_every_report_renders_in_both_modes() {
    let (_fixtures, data) = dataset();

    for mode in [OutputMode::Human, OutputMode::Json] {
        api::get_stats(&data).render(mode);
        api::validate(&data).render(mode);
        api::format_value("money", "1500").unwrap().render(mode);
        watchlist::report(&data, &WatchlistQuery::default()).render(mode);
        profile::build(&data, ACME).unwrap().render(mode);
        profile::build(&data, CLEAN).unwrap().render(mode);
        search::search(&data, "acme").render(mode);
        search::search(&data, "zz").render(mode);
        states::rankings(&data, HeatView::Total).render(mode);
        states::detail(&data, "NY").unwrap().render(mode);
        api::get_trends(&data).render(mode);
        api::get_exclusions(&data).render(mode);
        api::get_ml(&data).render(mode);
        FlagList { flags: api::list_flags() }.render(mode);
        OperationResult { success: true, message: "done".to_string() }.render(mode);
    }
}

#[test]
fn test_empty_reports_render() {
    let data = Dataset::default();
    for mode in [OutputMode::Human, OutputMode::Json] {
        watchlist::report(&data, &WatchlistQuery::default()).render(mode);
        api::get_trends(&data).render(mode);
        api::get_exclusions(&data).render(mode);
        api::get_ml(&data).render(mode);
        api::validate(&data).render(mode);
    }
}
