//! openmedicaid - Medicaid provider spending reports
//!
//! This library loads precomputed billing statistics from JSON fixtures and
//! turns them into display-ready reports: a unified fraud-risk watchlist,
//! provider profiles, state rankings, yearly trends, exclusion matches and
//! a model summary. All formatting and lookup helpers are total functions.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod exclusions;
pub mod explain;
pub mod feed;
pub mod format;
pub mod ml;
pub mod models;
pub mod output;
pub mod paths;
pub mod profile;
pub mod search;
pub mod states;
pub mod trends;
pub mod watchlist;
