//! Anomaly flag metadata
//!
//! Flags are attached to providers by the external analysis pipeline. Two
//! generations of keys exist in the fixtures (e.g. `unusual_cost` and
//! `unusual_cost_per_claim`); both map to the same display entry.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::format::Tone;

/// Display metadata for a flag key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagInfo {
    /// The flag key as found in fixtures
    pub key: String,
    /// Short human label
    pub label: String,
    /// One-sentence explanation of the test
    pub description: String,
    /// Display tone
    pub tone: Tone,
}

/// Description used for keys missing from the table
pub const GENERIC_DESCRIPTION: &str = "Statistical anomaly detected in billing patterns.";

const FLAG_TABLE: &[(&str, &str, &str, Tone)] = &[
    (
        "outlier_spending",
        "Unusually High Spending",
        "This provider's total payments are significantly above the median for their specialty.",
        Tone::Red,
    ),
    (
        "unusual_cost_per_claim",
        "High Cost Per Claim",
        "Average payment per claim is much higher than peers billing the same procedures.",
        Tone::Amber,
    ),
    (
        "unusual_cost",
        "High Cost Per Claim",
        "Average payment per claim is much higher than peers billing the same procedures.",
        Tone::Amber,
    ),
    (
        "beneficiary_stuffing",
        "High Claims Per Patient",
        "Filing an unusually high number of claims per beneficiary compared to peers.",
        Tone::Blue,
    ),
    (
        "bene_stuffing",
        "High Claims Per Patient",
        "Filing an unusually high number of claims per beneficiary compared to peers.",
        Tone::Blue,
    ),
    (
        "spending_spike",
        "Spending Spike",
        "Experienced a dramatic increase in billing over a short period.",
        Tone::Purple,
    ),
    (
        "explosive_growth",
        "Explosive Growth",
        "Billing increased over 500% year-over-year, far beyond normal growth patterns.",
        Tone::Red,
    ),
    (
        "instant_high_volume",
        "Instant High Volume",
        "New provider billing over $1M in their first year of Medicaid participation.",
        Tone::Amber,
    ),
    (
        "procedure_concentration",
        "Single-Code Billing",
        "Billing almost exclusively for 1-2 procedure codes despite high total volume.",
        Tone::Orange,
    ),
    (
        "billing_consistency",
        "Suspiciously Consistent",
        "Monthly billing amounts show almost no natural variation (CV < 0.1).",
        Tone::Cyan,
    ),
    (
        "extreme_beneficiary_stuffing",
        "Extreme Claims Per Patient",
        "Filing over 100 claims per beneficiary, far exceeding any normal treatment pattern.",
        Tone::Red,
    ),
    (
        "code_specific_outlier",
        "Code-Specific Cost Outlier",
        "Billing over 3\u{00d7} the national median for specific procedure codes.",
        Tone::Red,
    ),
    (
        "billing_swing",
        "Major Billing Swing",
        "Experienced over 200% change in year-over-year billing with >$1M absolute change.",
        Tone::Purple,
    ),
    (
        "massive_new_entrant",
        "Massive New Entrant",
        "Started billing recently but already receiving millions in Medicaid payments.",
        Tone::Amber,
    ),
    (
        "rate_outlier_multi_code",
        "Multi-Code Rate Outlier",
        "Billing above the 90th percentile across multiple procedure codes simultaneously.",
        Tone::Orange,
    ),
];

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w").expect("static regex"));

/// Every known flag key, in table order
#[must_use]
pub fn known_flags() -> Vec<&'static str> {
    FLAG_TABLE.iter().map(|(key, ..)| *key).collect()
}

/// Look up display metadata for a flag key.
///
/// Unknown keys get a label derived from the key itself
/// (`weird_new_test` → `Weird New Test`).
#[must_use]
pub fn flag_info(key: &str) -> FlagInfo {
    FLAG_TABLE.iter().find(|(k, ..)| *k == key).map_or_else(
        || FlagInfo {
            key: key.to_string(),
            label: humanize_key(key),
            description: GENERIC_DESCRIPTION.to_string(),
            tone: Tone::Slate,
        },
        |(k, label, description, tone)| FlagInfo {
            key: (*k).to_string(),
            label: (*label).to_string(),
            description: (*description).to_string(),
            tone: *tone,
        },
    )
}

/// Display label for a flag key
#[must_use]
pub fn flag_label(key: &str) -> String {
    flag_info(key).label
}

fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    WORD_START
        .replace_all(&spaced, |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Normalize flag lists from either fixture generation.
///
/// Older fixtures pack several flags into one pipe-separated string. Each
/// item is split on `|`, trimmed, and empty pieces are dropped. Duplicates
/// are removed keeping the first occurrence.
pub fn parse_flags<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for item in items {
        for piece in item.as_ref().split('|') {
            let flag = piece.trim();
            if !flag.is_empty() && seen.insert(flag.to_string()) {
                result.push(flag.to_string());
            }
        }
    }
    result
}

/// Union of several flag lists, keeping first-seen order
#[must_use]
pub fn merge_flags(lists: &[&[String]]) -> Vec<String> {
    parse_flags(lists.iter().flat_map(|list| list.iter()))
}
