//! Labels for the features the fraud-similarity model was trained on

const FEATURE_LABELS: &[(&str, &str)] = &[
    ("total_paid", "Total Payments"),
    ("total_claims", "Total Claims"),
    ("total_benes", "Total Beneficiaries"),
    ("code_count", "Unique Procedure Codes"),
    ("active_months", "Active Months"),
    ("cpc", "Cost Per Claim"),
    ("cpb", "Cost Per Beneficiary"),
    ("cpb_claims", "Claims Per Beneficiary"),
    ("paid_per_mo", "Payments Per Month"),
    ("claims_per_mo", "Claims Per Month"),
    ("top_code_conc", "Top Code Concentration"),
    ("self_bill_ratio", "Self-Billing Ratio"),
    ("short_burst", "Short Burst Billing"),
    ("low_code_high", "Low Codes / High Spend"),
];

/// Display label for a model feature; unknown names are returned unchanged.
#[must_use]
pub fn feature_label(name: &str) -> String {
    FEATURE_LABELS
        .iter()
        .find(|(key, _)| *key == name)
        .map_or_else(|| name.to_string(), |(_, label)| (*label).to_string())
}
