//! Excluded providers that still appear in payment data

use std::collections::HashMap;

use serde::Serialize;

use crate::format::{format_exclusion_date, title_case};
use crate::models::ExclusionEntry;

/// Label used when a record has no specialty
pub const UNKNOWN_SPECIALTY: &str = "Unknown";

/// A matched record ready for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedProvider {
    /// Business name, or `Last, First, Middle`, title-cased
    pub display_name: String,
    /// National Provider Identifier
    pub npi: String,
    /// Specialty
    pub specialty: String,
    /// City, title-cased
    pub city: String,
    /// Two-letter state code
    pub state: String,
    /// Exclusion authority code
    pub excl_type: String,
    /// Exclusion authority description
    pub excl_type_desc: String,
    /// `MM/DD/YYYY`
    pub excl_date: String,
}

/// A labelled count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// What was counted (state, exclusion description, specialty)
    pub label: String,
    /// How many records
    pub count: usize,
}

/// The matched-exclusions page
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionsReport {
    /// Matched records, fixture order
    pub providers: Vec<ExcludedProvider>,
    /// Counts by state, descending
    pub by_state: Vec<Tally>,
    /// Counts by exclusion type, descending
    pub by_type: Vec<Tally>,
    /// Counts by specialty, descending
    pub by_specialty: Vec<Tally>,
}

/// Display name for a record.
#[must_use]
pub fn display_name(entry: &ExclusionEntry) -> String {
    if !entry.bus_name.is_empty() {
        return title_case(&entry.bus_name);
    }
    let parts: Vec<&str> = [&entry.last_name, &entry.first_name, &entry.mid_name]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    title_case(&parts.join(", "))
}

/// Count by key, descending; ties keep first-seen order.
fn tally<'a>(keys: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<Tally> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<Tally> = Vec::new();
    for (key, label) in keys {
        if let Some(&i) = index.get(key) {
            out[i].count += 1;
        } else {
            index.insert(key, out.len());
            out.push(Tally {
                label: label.to_string(),
                count: 1,
            });
        }
    }
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Build the report over all matched records.
#[must_use]
pub fn report(entries: &[ExclusionEntry]) -> ExclusionsReport {
    let providers = entries
        .iter()
        .map(|e| ExcludedProvider {
            display_name: display_name(e),
            npi: e.npi.clone(),
            specialty: e.specialty.clone(),
            city: title_case(&e.city),
            state: e.state.clone(),
            excl_type: e.excl_type.clone(),
            excl_type_desc: e.excl_type_desc.clone(),
            excl_date: format_exclusion_date(&e.excl_date),
        })
        .collect();

    ExclusionsReport {
        providers,
        by_state: tally(entries.iter().map(|e| (e.state.as_str(), e.state.as_str()))),
        by_type: tally(entries.iter().map(|e| (e.excl_type.as_str(), e.excl_type_desc.as_str()))),
        by_specialty: tally(entries.iter().map(|e| {
            let spec =
                if e.specialty.is_empty() { UNKNOWN_SPECIALTY } else { e.specialty.as_str() };
            (spec, spec)
        })),
    }
}
