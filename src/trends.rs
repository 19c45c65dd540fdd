//! Year-over-year spending trends

use serde::Serialize;

use crate::models::YearlyTrend;

/// One year with growth rates filled in
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendYear {
    /// Calendar year
    pub year: i32,
    /// Total payments
    pub payments: f64,
    /// Total claims
    pub claims: f64,
    /// Active providers
    pub providers: f64,
    /// Payment growth over the previous year, in percent (0 for the first year)
    pub payment_growth: f64,
    /// Claim growth over the previous year, in percent (0 for the first year)
    pub claim_growth: f64,
    /// Bar height relative to the largest year, in percent
    pub bar_height: f64,
}

/// The full series with aggregate figures
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsReport {
    /// Years in ascending order
    pub years: Vec<TrendYear>,
    /// Sum of payments across all years
    pub total_payments: f64,
    /// Growth from the first to the last year, in percent
    pub total_growth: f64,
}

const fn growth(current: f64, previous: f64) -> f64 {
    if previous > 0.0 { (current - previous) / previous * 100.0 } else { 0.0 }
}

/// Order the series by year and fill in growth rates.
///
/// Payment growth recorded in the fixture wins over the derived value.
#[must_use]
pub fn yearly(trends: &[YearlyTrend]) -> TrendsReport {
    let mut sorted = trends.to_vec();
    sorted.sort_by_key(|t| t.year);

    let max_payments = sorted.iter().map(|t| t.payments).fold(0.0, f64::max);

    let years: Vec<TrendYear> = sorted
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let prev = i.checked_sub(1).and_then(|p| sorted.get(p));
            TrendYear {
                year: t.year,
                payments: t.payments,
                claims: t.claims,
                providers: t.providers,
                payment_growth: t
                    .payment_growth
                    .unwrap_or_else(|| prev.map_or(0.0, |p| growth(t.payments, p.payments))),
                claim_growth: prev.map_or(0.0, |p| growth(t.claims, p.claims)),
                bar_height: if max_payments > 0.0 { t.payments / max_payments * 100.0 } else { 0.0 },
            }
        })
        .collect();

    let total_growth = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) if sorted.len() > 1 => growth(last.payments, first.payments),
        _ => 0.0,
    };

    TrendsReport {
        total_payments: sorted.iter().map(|t| t.payments).sum(),
        total_growth,
        years,
    }
}
