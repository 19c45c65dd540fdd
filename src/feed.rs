//! RSS feed of published investigations and the XML sitemap

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dataset::{DataError, Dataset};
use crate::states::UNKNOWN_STATE;

/// Public site address
pub const DEFAULT_SITE_URL: &str = "https://openmedicaid.org";

/// Feed channel title
pub const FEED_TITLE: &str = "OpenMedicaid \u{2014} Investigations";

/// Feed channel description
pub const FEED_DESCRIPTION: &str =
    "Data-driven investigations into $1.09 trillion in Medicaid spending";

/// A published investigation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Article {
    /// URL slug under `/insights/`
    pub slug: &'static str,
    /// Headline
    pub title: &'static str,
    /// One-sentence teaser
    pub description: &'static str,
}

const fn article(slug: &'static str, title: &'static str, description: &'static str) -> Article {
    Article {
        slug,
        title,
        description,
    }
}

/// Every published investigation, newest last
pub const ARTICLES: &[Article] = &[
    article(
        "covid-vaccines",
        "The $1.5 Billion COVID Vaccine Machine",
        "How COVID vaccine administration became one of Medicaid's largest spending categories overnight.",
    ),
    article(
        "covid-testing",
        "The $4.7 Billion COVID Testing Bonanza",
        "Tracking the surge in COVID testing billing across Medicaid providers nationwide.",
    ),
    article(
        "pandemic-profiteers",
        "Who Made the Most Money During COVID?",
        "Identifying the providers who saw the biggest billing increases during the pandemic.",
    ),
    article(
        "most-expensive",
        "The 50 Most Expensive Medicaid Procedures",
        "A look at the costliest procedure codes driving Medicaid spending.",
    ),
    article(
        "fastest-growing",
        "The Fastest-Growing Medicaid Spending Categories",
        "Which procedure categories saw the steepest spending increases from 2018 to 2024.",
    ),
    article(
        "top-doctors",
        "Where Are the Doctors? Individual vs Organizational Billing",
        "How organizational billing entities dominate Medicaid spending over individual physicians.",
    ),
    article(
        "specialty-breakdown",
        "Specialty Spending Breakdown: Where $1 Trillion Goes",
        "Breaking down Medicaid spending by provider specialty across 617,000+ providers.",
    ),
    article(
        "arizona-problem",
        "The Arizona Problem: New Clinics, Massive Billing",
        "Why Arizona stands out for new provider entities billing millions immediately.",
    ),
    article(
        "ny-home-care",
        "The New York Home Care Machine",
        "New York's home care spending dwarfs every other state. Here's the data.",
    ),
    article(
        "specialty-drugs",
        "Medicaid's Most Expensive Drugs",
        "The specialty drugs costing Medicaid billions per year.",
    ),
    article(
        "most-patients",
        "Most Patients: Who Bills for the Most Beneficiaries",
        "Which providers serve, or bill for, the most Medicaid beneficiaries.",
    ),
    article(
        "impossible-volume",
        "Impossible Billing Volume: 50+ Claims Per Day",
        "Providers submitting humanly impossible numbers of daily claims.",
    ),
    article(
        "benford-analysis",
        "When the Numbers Don't Add Up: Benford's Law",
        "Applying Benford's Law to detect anomalous billing digit patterns.",
    ),
    article(
        "change-points",
        "Billing Behavior Shifts: When Providers Suddenly Change",
        "Detecting abrupt changes in provider billing patterns over time.",
    ),
    article(
        "billing-similarity",
        "Copycat Billers: Nearly Identical Patterns",
        "Finding providers with suspiciously similar billing profiles.",
    ),
    article(
        "highest-confidence",
        "Multi-Method Detection: Highest Confidence Flags",
        "Providers flagged by multiple independent detection methods simultaneously.",
    ),
    article(
        "geographic-hotspots",
        "Geographic Risk Hotspots",
        "Mapping the states and regions with the highest concentrations of flagged providers.",
    ),
    article(
        "billing-networks",
        "The Middlemen: Who Bills on Behalf of Others?",
        "Examining billing intermediaries and organizational billing patterns.",
    ),
    article(
        "round-numbers",
        "Round Number Billing",
        "Providers whose billing amounts cluster suspiciously around round numbers.",
    ),
    article(
        "self-billers",
        "Solo Operators: Providers Billing $5M+ Themselves",
        "Individual providers billing millions without organizational backing.",
    ),
    article(
        "spending-growth",
        "From $109B to $199B: How Spending Nearly Doubled",
        "Tracing Medicaid spending growth from 2018 to 2024.",
    ),
    article(
        "city-hotspots",
        "America's Medicaid Fraud Capitals",
        "The cities with the highest density of statistically flagged providers.",
    ),
    article(
        "smooth-billers",
        "Suspiciously Smooth Billers",
        "Providers with unnaturally consistent billing patterns that defy normal variation.",
    ),
    article(
        "dual-billing",
        "Dual Billing Patterns",
        "Investigating providers exhibiting dual billing pattern anomalies.",
    ),
    article(
        "minnesota-fraud-capital",
        "Minnesota: America's Medicaid Fraud Capital",
        "Minnesota has 4x its population share of fraud-heavy exclusions, the $250M Feeding Our Future scandal, and housing fraud so bad they shut the entire program down.",
    ),
    article(
        "cares-inc-exposed",
        "Exposed: Cares Inc.",
        "Deep dive into a flagged provider with unusual billing patterns.",
    ),
    article(
        "chicago-exposed",
        "Exposed: City of Chicago",
        "How the City of Chicago went from $23M to $240M in Medicaid billing, a 942% increase.",
    ),
    article(
        "srh-chn-exposed",
        "Exposed: SRH CHN Lead Health Home",
        "The $239M health home with 4 independent fraud flags.",
    ),
];

/// Publication date stamped on every feed item (2026-02-19 12:00 UTC)
#[must_use]
pub fn default_pub_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 2, 19)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// RFC 1123 date as used by RSS, e.g. `Thu, 19 Feb 2026 12:00:00 GMT`
#[must_use]
pub fn rfc1123(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn base(site_url: &str) -> String {
    escape(site_url.trim_end_matches('/'))
}

/// Render the RSS 2.0 feed.
#[must_use]
pub fn rss(site_url: &str, articles: &[Article], pub_date: &DateTime<Utc>) -> String {
    let site = base(site_url);
    let date = rfc1123(pub_date);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    xml.push_str("  <channel>\n");
    let _ = writeln!(xml, "    <title>{FEED_TITLE}</title>");
    let _ = writeln!(xml, "    <link>{site}</link>");
    let _ = writeln!(xml, "    <description>{FEED_DESCRIPTION}</description>");
    xml.push_str("    <language>en-us</language>\n");
    let _ = writeln!(xml, "    <lastBuildDate>{date}</lastBuildDate>");
    let _ = writeln!(
        xml,
        "    <atom:link href=\"{site}/feed.xml\" rel=\"self\" type=\"application/rss+xml\" />"
    );
    for a in articles {
        xml.push_str("    <item>\n");
        let _ = writeln!(xml, "      <title>{}</title>", cdata(a.title));
        let _ = writeln!(xml, "      <link>{site}/insights/{}</link>", a.slug);
        let _ = writeln!(xml, "      <description>{}</description>", cdata(a.description));
        let _ = writeln!(xml, "      <pubDate>{date}</pubDate>");
        let _ = writeln!(xml, "      <guid>{site}/insights/{}</guid>", a.slug);
        xml.push_str("    </item>\n");
    }
    xml.push_str("  </channel>\n</rss>\n");
    xml
}

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// Weekly
    Weekly,
    /// Monthly
    Monthly,
}

impl ChangeFrequency {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// One sitemap entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    /// Absolute URL
    pub url: String,
    /// Expected change frequency
    pub change_frequency: ChangeFrequency,
    /// Relative priority in `[0, 1]`
    pub priority: f64,
}

/// Top-level pages: path, frequency, priority
const CORE_PAGES: &[(&str, ChangeFrequency, f64)] = &[
    ("", ChangeFrequency::Weekly, 1.0),
    ("/watchlist", ChangeFrequency::Weekly, 0.9),
    ("/providers", ChangeFrequency::Weekly, 0.9),
    ("/states", ChangeFrequency::Monthly, 0.8),
    ("/analysis", ChangeFrequency::Monthly, 0.8),
    ("/ml-analysis", ChangeFrequency::Monthly, 0.8),
    ("/exclusions/matched", ChangeFrequency::Monthly, 0.8),
    ("/check", ChangeFrequency::Monthly, 0.8),
    ("/trends", ChangeFrequency::Monthly, 0.7),
    ("/about", ChangeFrequency::Monthly, 0.6),
    ("/insights", ChangeFrequency::Weekly, 0.9),
];

/// Collect every public URL: core pages, investigations, providers, states.
///
/// Provider pages come from the detail directory, or from the top-provider
/// list when no detail files exist.
pub fn sitemap_entries(site_url: &str, data: &Dataset) -> Result<Vec<SitemapEntry>, DataError> {
    let site = site_url.trim_end_matches('/');
    let entry = |path: String, change_frequency, priority| SitemapEntry {
        url: format!("{site}{path}"),
        change_frequency,
        priority,
    };

    let mut entries: Vec<SitemapEntry> = CORE_PAGES
        .iter()
        .map(|(path, freq, priority)| entry((*path).to_string(), *freq, *priority))
        .collect();

    entries.extend(
        ARTICLES
            .iter()
            .map(|a| entry(format!("/insights/{}", a.slug), ChangeFrequency::Monthly, 0.8)),
    );

    let mut npis = data.detail_npis()?;
    if npis.is_empty() {
        npis = data.top_providers.iter().map(|p| p.npi.clone()).collect();
    }
    entries.extend(
        npis.iter()
            .map(|npi| entry(format!("/providers/{npi}"), ChangeFrequency::Monthly, 0.5)),
    );

    entries.extend(
        data.states
            .iter()
            .filter(|s| s.state != UNKNOWN_STATE)
            .map(|s| entry(format!("/states/{}", s.state), ChangeFrequency::Monthly, 0.6)),
    );

    Ok(entries)
}

/// Render the sitemap as a `urlset` document.
pub fn sitemap(
    site_url: &str,
    data: &Dataset,
    last_modified: &DateTime<Utc>,
) -> Result<String, DataError> {
    let lastmod = last_modified.format("%Y-%m-%d").to_string();
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for e in sitemap_entries(site_url, data)? {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(&e.url));
        let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", e.change_frequency.as_str());
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", e.priority);
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    Ok(xml)
}
