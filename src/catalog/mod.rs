//! Static lookup tables
//!
//! Maps the coded identifiers found in fixtures (flag keys, state codes,
//! HCPCS procedure codes, ML feature names) to display metadata. Lookups
//! never fail: unknown keys fall back to a readable rendering of the key.

pub mod flags;
pub mod hcpcs;
pub mod ml_features;
pub mod states;

pub use flags::{FlagInfo, flag_info, flag_label, merge_flags, parse_flags};
pub use hcpcs::{description as hcpcs_description, label as hcpcs_label};
pub use ml_features::feature_label;
pub use states::state_name;
