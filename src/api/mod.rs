//! Report handlers shared by the CLI and the HTTP server
//!
//! Every handler takes a loaded [`Dataset`](crate::dataset::Dataset) plus
//! string input as it arrives from argv or a query string, validates it, and
//! returns a serializable report or an [`ApiError`] carrying its HTTP status.

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ErrorCode};
pub use handlers::{
    FORMAT_KINDS, format_value, get_exclusions, get_ml, get_provider, get_state, get_stats,
    get_trends, get_watchlist, list_flags, list_states, search_providers, validate,
};
pub use types::{ApiResponse, FormatData, StatsData, ValidationData, WatchlistRequest};
