//! "Is my provider flagged?" lookup
//!
//! Flagged providers (named smart-watchlist entries, then ML-scored
//! providers) are searched by name, city and NPI. Unflagged providers from the
//! top-provider list are searched by name and NPI only.

use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::{Dataset, is_npi};

/// Most flagged matches returned
pub const MAX_FLAGGED: usize = 10;

/// Most clean matches returned
pub const MAX_CLEAN: usize = 5;

/// Shortest query that is searched
pub const MIN_QUERY_LEN: usize = 2;

/// A single search hit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// National Provider Identifier
    pub npi: String,
    /// Provider name (may be empty for ML-only entries)
    pub name: String,
    /// City
    pub city: String,
    /// Two-letter state code
    pub state: String,
    /// Specialty
    pub specialty: String,
    /// Total payments, when known
    pub total_paid: f64,
    /// Flag keys (`ML Flag` for model-only entries)
    pub flags: Vec<String>,
    /// Statistical flag count
    pub flag_count: usize,
    /// Model score, when scored
    pub ml_score: Option<f64>,
    /// Whether the provider appears on any watchlist
    pub is_flagged: bool,
}

/// Search outcome
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// The query as given
    pub query: String,
    /// Whether the query was treated as an NPI
    pub is_npi_query: bool,
    /// Flagged matches first, then clean ones
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    /// Flagged hits only
    pub fn flagged(&self) -> impl Iterator<Item = &SearchHit> {
        self.hits.iter().filter(|h| h.is_flagged)
    }

    /// Clean hits only
    pub fn clean(&self) -> impl Iterator<Item = &SearchHit> {
        self.hits.iter().filter(|h| !h.is_flagged)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}

/// Every flagged provider, in pool order
fn flagged_pool(data: &Dataset) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();

    for entry in data.smart_watchlist.iter().filter(|e| !e.name.is_empty()) {
        if seen.insert(entry.npi.as_str()) {
            pool.push(SearchHit {
                npi: entry.npi.clone(),
                name: entry.name.clone(),
                city: entry.city.clone(),
                state: entry.state.clone(),
                specialty: entry.specialty.clone(),
                total_paid: entry.total_paid,
                flags: entry.flags.clone(),
                flag_count: entry.effective_flag_count(),
                ml_score: None,
                is_flagged: true,
            });
        }
    }

    for ml in data.ml_scores.all_providers() {
        if seen.insert(ml.npi.as_str()) {
            pool.push(SearchHit {
                npi: ml.npi.clone(),
                name: ml.name.clone(),
                city: ml.city.clone(),
                state: ml.state.clone(),
                specialty: ml.specialty.clone(),
                total_paid: ml.total_paid,
                flags: vec!["ML Flag".to_string()],
                flag_count: 0,
                ml_score: None,
                is_flagged: true,
            });
        }
    }

    for hit in &mut pool {
        hit.ml_score = data.find_ml(&hit.npi).map(|m| m.ml_score);
    }
    pool
}

/// Search flagged and clean providers for `query`.
#[must_use]
pub fn search(data: &Dataset, query: &str) -> SearchResults {
    let q = query.trim().to_lowercase();
    if q.chars().count() < MIN_QUERY_LEN {
        return SearchResults {
            query: query.to_string(),
            ..SearchResults::default()
        };
    }

    let npi_query = is_npi(&q);
    let npi_match = |npi: &str| npi_query && npi.contains(q.as_str());

    let flagged = flagged_pool(data);
    let flagged_npis: HashSet<&str> = flagged.iter().map(|h| h.npi.as_str()).collect();

    let clean: Vec<SearchHit> = data
        .top_providers
        .iter()
        .filter(|p| !flagged_npis.contains(p.npi.as_str()))
        .filter(|p| contains(&p.name, &q) || npi_match(&p.npi))
        .take(MAX_CLEAN)
        .map(|p| SearchHit {
            npi: p.npi.clone(),
            name: p.name.clone(),
            city: p.city.clone(),
            state: p.state.clone(),
            specialty: p.specialty.clone(),
            total_paid: p.total_paid,
            flags: Vec::new(),
            flag_count: 0,
            ml_score: None,
            is_flagged: false,
        })
        .collect();

    let mut hits: Vec<SearchHit> = flagged
        .iter()
        .filter(|h| contains(&h.name, &q) || npi_match(&h.npi) || contains(&h.city, &q))
        .take(MAX_FLAGGED)
        .cloned()
        .collect();
    hits.extend(clean);

    log::debug!("Search '{query}' matched {} provider(s)", hits.len());

    SearchResults {
        query: query.to_string(),
        is_npi_query: npi_query,
        hits,
    }
}
