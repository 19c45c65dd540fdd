//! Tests for the RSS feed and sitemap

use chrono::{TimeZone, Utc};
use openmedicaid::dataset::Dataset;
use openmedicaid::feed::{
    ARTICLES, ChangeFrequency, FEED_TITLE, default_pub_date, rss, sitemap, sitemap_entries,
};
use serde_json::json;

use crate::common::{ACME, TestData};

// =============================================================================
// RSS
// =============================================================================

#[test]
fn test_rss_lists_every_article() {
    let xml = rss("https://example.org/", ARTICLES, &default_pub_date());

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert_eq!(xml.matches("<item>").count(), ARTICLES.len());
    assert!(xml.contains(&format!("<title>{FEED_TITLE}</title>")));
    assert!(xml.contains("<link>https://example.org/insights/covid-vaccines</link>"));
    assert!(xml.contains("<pubDate>Thu, 19 Feb 2026 12:00:00 GMT</pubDate>"));
    assert!(xml.contains("href=\"https://example.org/feed.xml\""));
}

#[test]
fn test_rss_wraps_text_in_cdata() {
    let xml = rss("https://example.org", &ARTICLES[..1], &default_pub_date());
    assert!(xml.contains("<title><![CDATA[The $1.5 Billion COVID Vaccine Machine]]></title>"));
}

#[test]
fn test_rss_escapes_site_url() {
    let xml = rss("https://example.org/?a=1&b=2", &[], &default_pub_date());
    assert!(xml.contains("<link>https://example.org/?a=1&amp;b=2</link>"));
    assert!(!xml.contains("<item>"));
}

#[test]
fn test_article_slugs_are_unique() {
    let mut slugs: Vec<&str> = ARTICLES.iter().map(|a| a.slug).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), ARTICLES.len());
}

// =============================================================================
// SITEMAP
// =============================================================================

#[test]
fn test_sitemap_entries() {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    let entries = sitemap_entries("https://example.org/", &data).unwrap();

    assert_eq!(entries[0].url, "https://example.org");
    assert!((entries[0].priority - 1.0).abs() < f64::EPSILON);
    assert_eq!(entries[0].change_frequency, ChangeFrequency::Weekly);

    let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
    assert!(urls.contains(&"https://example.org/insights/covid-testing"));
    assert!(urls.contains(&format!("https://example.org/providers/{ACME}").as_str()));
    assert!(urls.contains(&"https://example.org/states/NY"));
    assert!(urls.contains(&"https://example.org/states/FL"));
    assert!(!urls.iter().any(|u| u.ends_with("/states/Unknown")));

    let providers = urls.iter().filter(|u| u.contains("/providers/")).count();
    assert_eq!(providers, 1);
}

#[test]
fn test_sitemap_falls_back_to_top_providers() {
    let fixtures = TestData::empty();
    fixtures.write(
        "top-providers-1000.json",
        &json!([{ "npi": "1234567890" }, { "npi": "1234567891" }]),
    );
    let data = Dataset::load(fixtures.path()).unwrap();
    let entries = sitemap_entries("https://example.org", &data).unwrap();
    let providers = entries.iter().filter(|e| e.url.contains("/providers/")).count();
    assert_eq!(providers, 2);
}

#[test]
fn test_sitemap_xml() {
    let fixtures = TestData::new();
    let data = Dataset::load(fixtures.path()).unwrap();
    let modified = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    let xml = sitemap("https://example.org", &data, &modified).unwrap();

    let expected = sitemap_entries("https://example.org", &data).unwrap().len();
    assert_eq!(xml.matches("<url>").count(), expected);
    assert!(xml.contains("<lastmod>2026-03-01</lastmod>"));
    assert!(xml.contains("<changefreq>weekly</changefreq>"));
    assert!(xml.contains("<priority>0.5</priority>"));
    assert!(xml.trim_end().ends_with("</urlset>"));
}
