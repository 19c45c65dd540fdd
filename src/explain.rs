//! Plain-language evidence for flags
//!
//! The pipeline attaches a free-form details object to some flags. Two
//! renderings exist: a compact one-liner for watchlist rows and a full
//! sentence for the provider profile. Unknown flags, or flags without
//! details, render as an empty string.

use serde_json::Value;

use crate::catalog::hcpcs_description;
use crate::format::{
    PLACEHOLDER, format_cpc, format_decimal, format_money, format_ratio, format_whole,
};

fn num(details: &Value, key: &str) -> Option<f64> {
    details.get(key).and_then(Value::as_f64)
}

/// Present and non-zero
fn nonzero(details: &Value, key: &str) -> Option<f64> {
    num(details, key).filter(|v| *v != 0.0)
}

fn text(details: &Value, key: &str) -> String {
    match details.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn money(details: &Value, key: &str) -> String {
    num(details, key).map_or_else(|| PLACEHOLDER.to_string(), format_money)
}

fn whole(details: &Value, key: &str) -> String {
    num(details, key).map_or_else(|| PLACEHOLDER.to_string(), format_whole)
}

fn first_seen(details: &Value) -> String {
    let month = text(details, "firstMonth");
    if month.is_empty() { text(details, "firstYear") } else { month }
}

fn outlier_codes(details: &Value, take: usize, render: impl Fn(&str, String) -> String) -> String {
    details
        .get("topOutlierCodes")
        .and_then(Value::as_array)
        .map(|codes| {
            codes
                .iter()
                .take(take)
                .map(|c| render(&text(c, "code"), format_ratio(num(c, "ratio"))))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

/// Compact evidence line for a watchlist row.
#[must_use]
pub fn flag_summary(flag: &str, details: Option<&Value>) -> String {
    let Some(d) = details else {
        return String::new();
    };

    match flag {
        "code_specific_outlier" => {
            let code = text(d, "code");
            let desc = hcpcs_description(&code);
            let desc = if desc.is_empty() { String::new() } else { format!(" ({desc})") };
            format!(
                "{code}{desc}: {}/claim vs {} median ({})",
                format_cpc(num(d, "providerCpc")),
                format_cpc(num(d, "nationalMedianCpc")),
                format_ratio(num(d, "ratio"))
            )
        },
        "billing_swing" => format!(
            "{} ({}) \u{2192} {} ({}), {}% change",
            money(d, "fromPay"),
            text(d, "fromYear"),
            money(d, "toPay"),
            text(d, "toYear"),
            whole(d, "pctChange")
        ),
        "massive_new_entrant" => format!(
            "First appeared {}, {} total, {}/mo",
            first_seen(d),
            money(d, "totalPaid"),
            money(d, "avgMonthlyBilling")
        ),
        "rate_outlier_multi_code" => {
            let codes = outlier_codes(d, 3, |code, ratio| format!("{code} ({ratio})"));
            let suffix = if codes.is_empty() { String::new() } else { format!(": {codes}") };
            format!("{} codes above p90{suffix}", whole(d, "codesAboveP90"))
        },
        _ => String::new(),
    }
}

/// Full-sentence evidence for a provider profile.
#[must_use]
pub fn flag_explanation(flag: &str, details: Option<&Value>) -> String {
    let Some(d) = details else {
        return String::new();
    };

    match flag {
        "code_specific_outlier" => {
            let code = text(d, "code");
            let desc = hcpcs_description(&code);
            let code_label = if desc.is_empty() { code } else { format!("{code} ({desc})") };
            format!(
                "This provider bills {} per claim for {code_label}, which is {} the national median of {}.",
                format_cpc(num(d, "providerCpc")),
                format_ratio(num(d, "ratio")),
                format_cpc(num(d, "nationalMedianCpc"))
            )
        },
        "billing_swing" => format!(
            "Billing changed from {} ({}) to {} ({}): a {}% swing with {} absolute change.",
            money(d, "fromPay"),
            text(d, "fromYear"),
            money(d, "toPay"),
            text(d, "toYear"),
            whole(d, "pctChange"),
            money(d, "absChange")
        ),
        "massive_new_entrant" => format!(
            "First appeared in {} and has already billed {}, averaging {}/month across {} months.",
            first_seen(d),
            money(d, "totalPaid"),
            money(d, "avgMonthlyBilling"),
            text(d, "monthsActive")
        ),
        "rate_outlier_multi_code" => {
            let count = num(d, "codesAboveP90").unwrap_or(0.0);
            let examples = outlier_codes(d, 2, |code, ratio| format!("{code} at {ratio} median"));
            let suffix = if examples.is_empty() { String::new() } else { format!(": {examples}") };
            format!(
                "Billing above the 90th percentile for {} procedure codes{suffix}.",
                format_whole(count)
            )
        },
        "outlier_spending" => nonzero(d, "total_paid").map_or_else(String::new, |v| {
            format!("Total spending of {} is significantly above median.", format_money(v))
        }),
        "unusual_cost_per_claim" | "unusual_cost" => {
            nonzero(d, "cost_per_claim").map_or_else(String::new, |v| {
                format!(
                    "Average cost per claim of {} is much higher than peers.",
                    format_cpc(Some(v))
                )
            })
        },
        "explosive_growth" => nonzero(d, "growth_pct").map_or_else(String::new, |v| {
            format!(
                "Billing grew {}% from {} to {}.",
                format_whole(v),
                text(d, "from_year"),
                text(d, "to_year")
            )
        }),
        "instant_high_volume" => nonzero(d, "first_year_payments").map_or_else(String::new, |v| {
            format!("Billed {} in first year ({}).", format_money(v), text(d, "first_year"))
        }),
        "procedure_concentration" => {
            let code = text(d, "primary_code");
            if code.is_empty() {
                String::new()
            } else {
                format!(
                    "Bills primarily for code {code} ({} unique codes).",
                    text(d, "unique_codes")
                )
            }
        },
        "billing_consistency" => num(d, "cv").map_or_else(String::new, |cv| {
            format!(
                "Monthly billing coefficient of variation: {} (near-zero variation).",
                format_decimal(cv, 4)
            )
        }),
        "beneficiary_stuffing" | "bene_stuffing" => {
            nonzero(d, "claims_per_bene").map_or_else(String::new, |v| {
                format!("{} claims per beneficiary.", format_decimal(v, 1))
            })
        },
        "extreme_beneficiary_stuffing" => {
            nonzero(d, "claims_per_bene").map_or_else(String::new, |v| {
                format!(
                    "{} claims per beneficiary, far exceeding normal patterns.",
                    format_decimal(v, 1)
                )
            })
        },
        "spending_spike" => nonzero(d, "growth_pct").map_or_else(String::new, |v| {
            format!("Month-over-month increase of {}%.", format_whole(v))
        }),
        _ => String::new(),
    }
}

/// Single-character marker used next to flag cards
#[must_use]
pub fn flag_marker(flag: &str) -> char {
    match flag {
        "code_specific_outlier" => '\u{26a0}',
        "billing_swing" => '\u{21c5}',
        "massive_new_entrant" => '\u{2605}',
        "rate_outlier_multi_code" => '\u{2261}',
        _ => '\u{25cf}',
    }
}
