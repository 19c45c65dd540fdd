//! Tests for the HTTP-agnostic API layer

use openmedicaid::api::{
    self, ApiError, ApiResponse, ErrorCode, FORMAT_KINDS, WatchlistRequest, format_value,
};
use openmedicaid::dataset::Dataset;
use openmedicaid::watchlist::{DEFAULT_LIMIT, SortBy, Tab, UnifiedTier};
use test_case::test_case;

use crate::common::{ACME, TestData};

fn dataset() -> (TestData, Dataset) {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    (fixtures, data)
}

// =============================================================================
// ERRORS & ENVELOPE
// =============================================================================

#[test]
fn test_error_codes() {
    assert_eq!(ApiError::not_found("x").status_code(), 404);
    assert_eq!(ApiError::bad_request("x").status_code(), 400);
    assert_eq!(ApiError::internal("x").status_code(), 500);
    assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
    assert!(ApiError::not_found("x").is_not_found());
    assert_eq!(ApiError::invalid("NPI", "abc").message, "Invalid NPI: abc");
    assert_eq!(ApiError::internal("boom").to_string(), "INTERNAL_ERROR: boom");
}

#[test]
fn test_success_envelope() {
    let json = serde_json::to_value(ApiResponse::success(42)).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], 42);
    assert!(json.get("error").is_none());
}

#[test]
fn test_error_envelope() {
    let json = serde_json::to_value(ApiResponse::<()>::error(ApiError::not_found("gone"))).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "gone");
    assert!(json.get("data").is_none());
}

// =============================================================================
// WATCHLIST REQUESTS
// =============================================================================

#[test]
fn test_empty_request_uses_defaults() {
    let query = WatchlistRequest::default().to_query().unwrap();
    assert_eq!(query.tab, Tab::All);
    assert_eq!(query.sort, SortBy::Risk);
    assert_eq!(query.limit, Some(DEFAULT_LIMIT));
    assert!(query.tier.is_none());
}

#[test]
fn test_request_is_parsed() {
    let req = WatchlistRequest {
        tab: Some("stat".into()),
        tier: Some("critical".into()),
        state: Some("ny".into()),
        search: Some("  ".into()),
        sort: Some("spending".into()),
        limit: Some("all".into()),
        ..Default::default()
    };
    let query = req.to_query().unwrap();
    assert_eq!(query.tab, Tab::Stat);
    assert_eq!(query.tier, Some(UnifiedTier::Critical));
    assert_eq!(query.state.as_deref(), Some("NY"));
    assert!(query.search.is_none());
    assert_eq!(query.sort, SortBy::Spending);
    assert_eq!(query.limit, None);
}

#[test]
fn test_request_deserializes_from_json() {
    let req: WatchlistRequest = serde_json::from_str(r#"{"tab":"ml","limit":"3"}"#).unwrap();
    let query = req.to_query().unwrap();
    assert_eq!(query.tab, Tab::Ml);
    assert_eq!(query.limit, Some(3));
}

#[test_case(WatchlistRequest { tab: Some("nope".into()), ..Default::default() } ; "bad tab")]
#[test_case(WatchlistRequest { tier: Some("nope".into()), ..Default::default() } ; "bad tier")]
#[test_case(WatchlistRequest { sort: Some("nope".into()), ..Default::default() } ; "bad sort")]
#[test_case(WatchlistRequest { limit: Some("-1".into()), ..Default::default() } ; "bad limit")]
fn test_bad_request(req: WatchlistRequest) {
    let err = req.to_query().unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

// =============================================================================
// HANDLERS
// =============================================================================

#[test]
fn test_get_stats() {
    let (_fixtures, data) = dataset();
    let stats = api::get_stats(&data);
    assert_eq!(stats.total_paid, "$1.09T");
    assert_eq!(stats.records, "227.0M");
    assert_eq!(stats.providers, "618K");
}

#[test]
fn test_get_watchlist() {
    let (_fixtures, data) = dataset();
    let req = WatchlistRequest {
        tab: Some("ml".into()),
        ..Default::default()
    };
    let report = api::get_watchlist(&data, &req).unwrap();
    assert_eq!(report.matched, 2);
    assert_eq!(report.summary.total, 5);
}

#[test]
fn test_get_provider() {
    let (_fixtures, data) = dataset();
    assert_eq!(api::get_provider(&data, &format!(" {ACME} ")).unwrap().npi, ACME);

    let missing = api::get_provider(&data, "1000000001").unwrap_err();
    assert!(missing.is_not_found());

    let invalid = api::get_provider(&data, "abc").unwrap_err();
    assert_eq!(invalid.code, ErrorCode::BadRequest);
}

#[test]
fn test_get_state() {
    let (_fixtures, data) = dataset();
    assert_eq!(api::get_state(&data, "ny").unwrap().code, "NY");
    assert!(api::get_state(&data, "TX").unwrap_err().is_not_found());
    assert_eq!(api::get_state(&data, "NYC").unwrap_err().code, ErrorCode::BadRequest);
}

#[test]
fn test_list_states_view() {
    let (_fixtures, data) = dataset();
    assert!(api::list_states(&data, None).is_ok());
    assert!(api::list_states(&data, Some("")).is_ok());
    assert!(api::list_states(&data, Some("total")).is_ok());
    assert_eq!(api::list_states(&data, Some("bogus")).unwrap_err().code, ErrorCode::BadRequest);
}

#[test]
fn test_list_flags() {
    let flags = api::list_flags();
    assert_eq!(flags.len(), 15);
    assert_eq!(flags[0].key, "outlier_spending");
}

#[test]
fn test_validate() {
    let (fixtures, data) = dataset();
    let result = api::validate(&data);
    assert_eq!(result.errors, 0);
    assert_eq!(result.warnings, 0);
    assert_eq!(result.data_dir, fixtures.path().display().to_string());
}

#[test]
fn test_reports_from_fixture() {
    let (_fixtures, data) = dataset();
    assert_eq!(api::get_trends(&data).years.len(), 2);
    assert_eq!(api::get_exclusions(&data).providers.len(), 3);
    assert_eq!(api::get_ml(&data).top_providers.len(), 2);
    assert_eq!(api::search_providers(&data, "acme").hits.len(), 1);
}

// =============================================================================
// FORMATTING
// =============================================================================

#[test_case("money", "1500", "$2K" ; "money")]
#[test_case("money", "-0", "$0" ; "money negative zero")]
#[test_case("number", "2500000", "2.5M" ; "number")]
#[test_case("money-full", "1234567", "$1,234,567" ; "money full")]
#[test_case("cpc", "12.5", "$12.50" ; "cpc")]
#[test_case("percent", "12.5", "12.5%" ; "percent")]
#[test_case("growth", "-2", "-2.0%" ; "growth")]
#[test_case("ratio", "3.44", "3.4\u{00d7}" ; "ratio")]
#[test_case("state", "NY", "New York" ; "state")]
#[test_case("flag", "bene_stuffing", "High Claims Per Patient" ; "flag")]
#[test_case("hcpcs", "99213", "99213 \u{2014} Office/outpatient visit, est. patient, low-mod complexity" ; "hcpcs")]
#[test_case("feature", "cpc", "Cost Per Claim" ; "feature")]
#[test_case("title", "NEW YORK", "New York" ; "title")]
#[test_case("date", "20190115", "01/15/2019" ; "date")]
fn test_format_value(kind: &str, value: &str, expected: &str) {
    let result = format_value(kind, value).unwrap();
    assert_eq!(result.output, expected);
    assert_eq!(result.kind, kind);
    assert_eq!(result.input, value);
}

#[test]
fn test_format_kinds_are_all_accepted() {
    for kind in FORMAT_KINDS {
        let value = if ["state", "flag", "hcpcs", "feature", "title", "date"].contains(kind) {
            "x"
        } else {
            "1"
        };
        assert!(format_value(kind, value).is_ok(), "{kind}");
    }
}

#[test_case("money", "lots" ; "non numeric")]
#[test_case("colour", "red" ; "unknown kind")]
fn test_format_value_rejects(kind: &str, value: &str) {
    assert_eq!(format_value(kind, value).unwrap_err().code, ErrorCode::BadRequest);
}
