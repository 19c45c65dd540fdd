//! Number and text formatting for display
//!
//! Every function in this module is total: odd input (NaN, negatives,
//! unknown labels) produces a placeholder or a mirrored rendering instead
//! of an error.
//!
//! ## Thresholds
//!
//! | Input            | `format_money` | `format_number` |
//! |------------------|----------------|-----------------|
//! | `999`            | `$999`         | `999`           |
//! | `1_500`          | `$2K`          | `2K`            |
//! | `1_000_000`      | `$1.0M`        | `1.0M`          |
//! | `1e9`            | `$1.00B`       | `1.0B`          |
//! | `1e12`           | `$1.00T`       | `1000.0B`       |

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// Placeholder shown where a value is missing (an em-dash)
pub const PLACEHOLDER: &str = "\u{2014}";

/// Display tone used to color risk levels, flags and heat maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Highest severity
    Red,
    /// Severe
    Orange,
    /// Elevated
    Amber,
    /// Moderate
    Yellow,
    /// Healthy / below thresholds
    Green,
    /// Informational
    Blue,
    /// ML-driven signal
    Purple,
    /// Consistency-type signal
    Cyan,
    /// Neutral / unknown
    Slate,
}

// =============================================================================
// ROUNDING HELPERS
// =============================================================================

/// Render `value` with `digits` decimals, rounding half away from zero.
///
/// Anything that rounds to zero prints unsigned.
fn to_fixed(value: f64, digits: u8) -> String {
    let factor = 10f64.powi(i32::from(digits));
    let rounded = (value * factor).round() / factor;
    // `-0.0` would print as `-0`
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.prec$}", prec = usize::from(digits))
}

/// Insert `,` separators into a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped rendering of a non-negative value with a fixed number of decimals.
fn grouped(value: f64, digits: u8) -> String {
    let fixed = to_fixed(value, digits);
    match fixed.split_once('.') {
        Some((whole, frac)) => format!("{}.{frac}", group_thousands(whole)),
        None => group_thousands(&fixed),
    }
}

/// Prefix a rendered magnitude with `-`, unless it rounded to zero.
fn negate(body: String, zero: &str) -> String {
    if body == zero { body } else { format!("-{body}") }
}

// =============================================================================
// NUMBERS
// =============================================================================

/// Abbreviate a dollar amount into `$K`/`$M`/`$B`/`$T` buckets.
///
/// Negative amounts mirror the positive rendering with a leading `-`.
#[must_use]
pub fn format_money(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if n < 0.0 {
        return negate(format_money(-n), "$0");
    }

    if n >= 1e12 {
        format!("${}T", to_fixed(n / 1e12, 2))
    } else if n >= 1e9 {
        format!("${}B", to_fixed(n / 1e9, 2))
    } else if n >= 1e6 {
        format!("${}M", to_fixed(n / 1e6, 1))
    } else if n >= 1e3 {
        format!("${}K", to_fixed(n / 1e3, 0))
    } else {
        format!("${}", to_fixed(n, 0))
    }
}

/// Abbreviate a count into `K`/`M`/`B` buckets.
///
/// Values below one thousand keep up to three fraction digits with trailing
/// zeros removed.
#[must_use]
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if n < 0.0 {
        return negate(format_number(-n), "0");
    }

    if n >= 1e9 {
        format!("{}B", to_fixed(n / 1e9, 1))
    } else if n >= 1e6 {
        format!("{}M", to_fixed(n / 1e6, 1))
    } else if n >= 1e3 {
        format!("{}K", to_fixed(n / 1e3, 0))
    } else {
        let fixed = to_fixed(n, 3);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$1,234,568`.
#[must_use]
pub fn format_money_full(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if n < 0.0 {
        return negate(format_money_full(-n), "$0");
    }
    format!("${}", grouped(n, 0))
}

/// Cost per claim with cents, or the placeholder when absent.
#[must_use]
pub fn format_cpc(n: Option<f64>) -> String {
    match n {
        Some(v) if v.is_finite() => {
            if v < 0.0 {
                negate(format_cpc(Some(-v)), "$0.00")
            } else {
                format!("${}", grouped(v, 2))
            }
        },
        _ => PLACEHOLDER.to_string(),
    }
}

/// One-decimal percentage, e.g. `12.5%`.
#[must_use]
pub fn format_percent(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}%", to_fixed(n, 1))
}

/// Percentage with an explicit sign, e.g. `+8.1%` or `-2.0%`.
#[must_use]
pub fn format_growth(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if n >= 0.0 { format!("+{}", format_percent(n)) } else { format_percent(n) }
}

/// Multiplier with one decimal, e.g. `3.4×`.
#[must_use]
pub fn format_ratio(n: Option<f64>) -> String {
    match n {
        Some(v) if v.is_finite() => format!("{}\u{00d7}", to_fixed(v, 1)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Whole number with no decimals and no abbreviation, e.g. `250`.
#[must_use]
pub fn format_whole(n: f64) -> String {
    format_decimal(n, 0)
}

/// Plain number with a fixed count of decimals, e.g. `0.0412`.
#[must_use]
pub fn format_decimal(n: f64, digits: u8) -> String {
    if n.is_finite() { to_fixed(n, digits) } else { PLACEHOLDER.to_string() }
}

// =============================================================================
// TEXT
// =============================================================================

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s|[-/])\S").expect("static regex"));

/// Lowercase the input, then capitalize the first letter of every word.
///
/// Word boundaries are the start of input, whitespace, `-` and `/`.
#[must_use]
pub fn title_case(s: &str) -> String {
    let lower = s.to_lowercase();
    WORD_START
        .replace_all(&lower, |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Turn an OIG `YYYYMMDD` stamp into `MM/DD/YYYY`.
///
/// Shorter or non-ASCII input is returned unchanged.
#[must_use]
pub fn format_exclusion_date(raw: &str) -> String {
    if raw.len() < 8 {
        return raw.to_string();
    }
    match (raw.get(0..4), raw.get(4..6), raw.get(6..8)) {
        (Some(y), Some(m), Some(d)) => format!("{m}/{d}/{y}"),
        _ => raw.to_string(),
    }
}

// =============================================================================
// RISK SCALES
// =============================================================================

/// Risk level derived from the number of statistical flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// No flags
    Low,
    /// One flag
    Moderate,
    /// Two flags
    High,
    /// Three or more flags
    Critical,
}

impl RiskLevel {
    /// Classify a flag count
    #[must_use]
    pub const fn from_flag_count(count: usize) -> Self {
        match count {
            0 => Self::Low,
            1 => Self::Moderate,
            2 => Self::High,
            _ => Self::Critical,
        }
    }

    /// Uppercase display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Display tone
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Low => Tone::Slate,
            Self::Moderate => Tone::Yellow,
            Self::High => Tone::Amber,
            Self::Critical => Tone::Red,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tone for an ML fraud-similarity score in `[0, 1]`.
#[must_use]
pub fn ml_score_tone(score: f64) -> Tone {
    if score >= 0.8 {
        Tone::Red
    } else if score >= 0.6 {
        Tone::Orange
    } else if score >= 0.3 {
        Tone::Yellow
    } else {
        Tone::Green
    }
}

/// Tone for a cost-per-claim decile label such as `Top 5%`.
#[must_use]
pub fn decile_tone(decile: &str) -> Tone {
    match decile {
        "Top 1%" | "Top 5%" => Tone::Red,
        "Top 10%" => Tone::Orange,
        "Top 25%" => Tone::Yellow,
        _ => Tone::Green,
    }
}

/// Five-step heat scale for the state map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// Nothing flagged
    None,
    /// Lowest non-zero bucket
    Low,
    /// Second bucket
    Moderate,
    /// Third bucket
    Elevated,
    /// Top bucket
    Severe,
}

impl Intensity {
    /// Bucket flagged providers per 100k residents
    #[must_use]
    pub fn per_capita(rate: f64) -> Self {
        if rate <= 0.0 {
            Self::None
        } else if rate < 0.3 {
            Self::Low
        } else if rate <= 0.6 {
            Self::Moderate
        } else if rate <= 0.8 {
            Self::Elevated
        } else {
            Self::Severe
        }
    }

    /// Bucket an absolute flagged-provider count
    #[must_use]
    pub const fn flag_total(total: u64) -> Self {
        match total {
            0 => Self::None,
            1..=5 => Self::Low,
            6..=20 => Self::Moderate,
            21..=50 => Self::Elevated,
            _ => Self::Severe,
        }
    }

    /// Display tone
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::None => Tone::Slate,
            Self::Low => Tone::Blue,
            Self::Moderate => Tone::Cyan,
            Self::Elevated => Tone::Amber,
            Self::Severe => Tone::Red,
        }
    }
}
