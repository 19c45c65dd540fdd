//! Tests for the "is my provider flagged?" lookup

use openmedicaid::dataset::Dataset;
use openmedicaid::search::search;
use test_case::test_case;

use crate::common::{ACME, CLEAN, SUNRISE, TINY, TestData, VALLEY};

fn dataset() -> (TestData, Dataset) {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    (fixtures, data)
}

#[test]
fn test_short_query_returns_nothing() {
    let (_fixtures, data) = dataset();
    let results = search(&data, "a");
    assert!(results.hits.is_empty());
    assert_eq!(results.query, "a");
}

#[test_case("  " ; "only spaces")]
#[test_case(" a " ; "one character padded")]
#[test_case("\t\n" ; "only whitespace")]
fn test_padded_short_query_returns_nothing(query: &str) {
    let (_fixtures, data) = dataset();
    assert!(search(&data, query).hits.is_empty());
}

#[test]
fn test_flagged_name_match() {
    let (_fixtures, data) = dataset();
    let results = search(&data, "ACME");

    assert_eq!(results.hits.len(), 1);
    let hit = &results.hits[0];
    assert_eq!(hit.npi, ACME);
    assert!(hit.is_flagged);
    assert_eq!(hit.flag_count, 3);
    assert_eq!(hit.ml_score, Some(0.75));
}

#[test]
fn test_flagged_city_match() {
    let (_fixtures, data) = dataset();
    let results = search(&data, "miami");
    let npis: Vec<&str> = results.flagged().map(|h| h.npi.as_str()).collect();
    assert_eq!(npis, vec![SUNRISE]);
}

#[test]
fn test_clean_name_match() {
    let (_fixtures, data) = dataset();
    let results = search(&data, "clinic");
    assert_eq!(results.flagged().count(), 0);
    let clean: Vec<&str> = results.clean().map(|h| h.npi.as_str()).collect();
    assert_eq!(clean, vec![CLEAN]);
}

#[test]
fn test_clean_providers_not_matched_by_city() {
    let (_fixtures, data) = dataset();
    assert!(search(&data, "albany").hits.is_empty());
}

#[test]
fn test_npi_query() {
    let (_fixtures, data) = dataset();
    let results = search(&data, CLEAN);
    assert!(results.is_npi_query);
    assert_eq!(results.hits.len(), 1);
    assert!(!results.hits[0].is_flagged);
}

#[test]
fn test_ml_only_provider_is_flagged() {
    let (_fixtures, data) = dataset();
    let results = search(&data, VALLEY);
    let hit = &results.hits[0];
    assert!(hit.is_flagged);
    assert_eq!(hit.flags, vec!["ML Flag"]);
    assert_eq!(hit.ml_score, Some(0.9));
}

#[test]
fn test_small_provider_name_match() {
    let (_fixtures, data) = dataset();
    let results = search(&data, "  tiny ");
    assert_eq!(results.hits.len(), 1);
    assert_eq!(results.hits[0].npi, TINY);
}

#[test]
fn test_flagged_before_clean() {
    let (_fixtures, data) = dataset();
    let results = search(&data, "c");
    assert!(results.hits.is_empty());

    let results = search(&data, "ca");
    let flags: Vec<bool> = results.hits.iter().map(|h| h.is_flagged).collect();
    let first_clean = flags.iter().position(|f| !f).unwrap_or(flags.len());
    assert!(flags[first_clean..].iter().all(|f| !f));
}

#[test]
fn test_flagged_results_are_capped() {
    let (_fixtures, mut data) = dataset();
    let template = data.smart_watchlist[0].clone();
    for i in 0..20 {
        let mut entry = template.clone();
        entry.npi = format!("90000000{i:02}");
        entry.name = format!("Acme Clone {i}");
        data.smart_watchlist.push(entry);
    }
    let results = search(&data, "acme");
    assert_eq!(results.flagged().count(), 10);
}
