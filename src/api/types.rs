//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::dataset::ValidationIssue;
use crate::models::HeadlineStats;
use crate::watchlist::{DEFAULT_LIMIT, WatchlistQuery};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub const fn error(err: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

fn parse_opt<T: FromStr<Err = String>>(value: Option<&str>) -> Result<Option<T>, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
        .map_err(ApiError::bad_request)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Watchlist filters as they arrive on the wire (query string or JSON)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistRequest {
    /// `all`, `stat` or `ml`
    #[serde(default)]
    pub tab: Option<String>,
    /// Tier name
    #[serde(default)]
    pub tier: Option<String>,
    /// Flag key
    #[serde(default)]
    pub flag: Option<String>,
    /// Two-letter state code
    #[serde(default)]
    pub state: Option<String>,
    /// Free-text search
    #[serde(default)]
    pub search: Option<String>,
    /// `risk`, `flags`, `spending`, `name` or `ml`
    #[serde(default)]
    pub sort: Option<String>,
    /// Row limit; `0` or `all` for no limit
    #[serde(default)]
    pub limit: Option<String>,
}

impl WatchlistRequest {
    /// Validate into a typed query.
    pub fn to_query(&self) -> Result<WatchlistQuery, ApiError> {
        let limit = match self.limit.as_deref() {
            None | Some("") => Some(DEFAULT_LIMIT),
            Some("all" | "0") => None,
            Some(n) => Some(n.parse::<usize>().map_err(|_| ApiError::invalid("limit", n))?),
        };

        Ok(WatchlistQuery {
            tab: parse_opt(self.tab.as_deref())?.unwrap_or_default(),
            tier: parse_opt(self.tier.as_deref())?,
            flag: non_empty(self.flag.as_ref()),
            state: non_empty(self.state.as_ref()).map(|s| s.to_uppercase()),
            search: non_empty(self.search.as_ref()),
            sort: parse_opt(self.sort.as_deref())?.unwrap_or_default(),
            limit,
        })
    }
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Headline numbers, raw and formatted
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    /// Raw values
    pub stats: HeadlineStats,
    /// `total_paid` as abbreviated money
    pub total_paid: String,
    /// `records` as an abbreviated count
    pub records: String,
    /// `providers` as an abbreviated count
    pub providers: String,
}

/// Fixture validation outcome
#[derive(Debug, Serialize)]
pub struct ValidationData {
    /// Directory that was checked
    pub data_dir: String,
    /// Number of error-level findings
    pub errors: usize,
    /// Number of warning-level findings
    pub warnings: usize,
    /// All findings
    pub issues: Vec<ValidationIssue>,
}

/// A single formatted value
#[derive(Debug, Serialize)]
pub struct FormatData {
    /// Formatter that was applied
    pub kind: String,
    /// Raw input
    pub input: String,
    /// Rendered output
    pub output: String,
}
