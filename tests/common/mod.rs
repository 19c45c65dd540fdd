//! Shared test fixtures
//!
//! Writes a small but complete data directory covering every fixture file:
//!
//! ```text
//! NPI          top  smart  legacy  ml     detail
//! 1111111111   yes  3 fl   2 fl    0.75   yes
//! 2222222222   yes  -      -       -      -
//! 3333333333   yes  1 fl   -       -      -
//! 4444444444   -    -      2 fl    -      -
//! 5555555555   -    -      nameless, unpaid
//! 6666666666   -    -      -       0.90 (name only in name map)
//! 7777777777   -    -      -       0.55 (small provider)
//! 8888888888   -    -      -       0.40 (below listing threshold)
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

pub const ACME: &str = "1111111111";
pub const CLEAN: &str = "2222222222";
pub const SUNRISE: &str = "3333333333";
pub const LEGACY_ONLY: &str = "4444444444";
pub const VALLEY: &str = "6666666666";
pub const TINY: &str = "7777777777";

/// A temporary data directory populated with the standard fixtures
pub struct TestData {
    dir: TempDir,
}

impl TestData {
    /// Every fixture file, plus one provider and one state detail file
    pub fn new() -> Self {
        let data = Self::empty();
        data.write_all();
        data
    }

    /// An existing but empty data directory
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `value` to `name` (relative to the data root)
    pub fn write(&self, name: &str, value: &Value) {
        self.write_raw(name, &serde_json::to_string_pretty(value).unwrap());
    }

    /// Write raw text to `name`, creating subdirectories
    pub fn write_raw(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn write_all(&self) {
        self.write("stats.json", &stats());
        self.write("top-providers-1000.json", &top_providers());
        self.write("smart-watchlist.json", &smart_watchlist());
        self.write("expanded-watchlist.json", &legacy_watchlist());
        self.write("ml-scores.json", &ml_scores());
        self.write("ml-provider-names.json", &json!({ VALLEY: "Valley Pharmacy" }));
        self.write("states-summary.json", &states_summary());
        self.write("geographic-risk.json", &geographic_risk());
        self.write("yearly-trends.json", &yearly_trends());
        self.write("leie-matched.json", &exclusions());
        self.write(&format!("providers/{ACME}.json"), &acme_detail());
        self.write("states/NY.json", &new_york_detail());
    }
}

pub fn stats() -> Value {
    json!({ "totalPaid": 1.09e12, "records": 227_000_000, "providers": 617_503 })
}

pub fn top_providers() -> Value {
    json!([
        {
            "npi": ACME, "name": "Acme Home Care", "specialty": "Home Health",
            "city": "Brooklyn", "state": "NY",
            "totalPaid": 5_000_000, "totalClaims": 10_000, "totalBenes": 500,
            "flags": ["outlier_spending"]
        },
        {
            "npi": CLEAN, "name": "Clean Clinic", "specialty": "Family Practice",
            "city": "Albany", "state": "NY",
            "totalPaid": 3_000_000, "totalClaims": 20_000, "totalBenes": 4_000
        },
        {
            "npi": 3_333_333_333_u64, "name": "Sunrise Health", "city": "Miami", "state": "FL",
            "totalPaid": 8_000_000, "totalClaims": 4_000, "totalBenes": 100
        }
    ])
}

pub fn smart_watchlist() -> Value {
    json!([
        {
            "npi": ACME, "name": "Acme Home Care", "city": "Brooklyn", "state": "NY",
            "totalPaid": 5_000_000, "flagCount": 3,
            "flags": ["outlier_spending", "code_specific_outlier", "billing_swing"],
            "flagDetails": {
                "code_specific_outlier": {
                    "code": "T1019", "providerCpc": 120.5, "nationalMedianCpc": 20, "ratio": 6.03
                }
            }
        },
        {
            "npi": SUNRISE, "name": "Sunrise Health", "city": "Miami", "state": "FL",
            "totalPaid": 8_000_000, "flagCount": 1, "flags": ["massive_new_entrant"]
        }
    ])
}

pub fn legacy_watchlist() -> Value {
    json!([
        {
            "npi": ACME, "name": "Acme Home Care", "flag_count": 2,
            "flags": "outlier_spending|unusual_cost",
            "flag_details": { "unusual_cost": { "cost_per_claim": 500 } }
        },
        {
            "npi": LEGACY_ONLY, "name": "Legacy Labs", "city": "Dallas", "state": "TX",
            "totalPaid": 200_000, "totalClaims": 50, "flag_count": 2,
            "flags": "bene_stuffing | spending_spike"
        },
        { "npi": "5555555555", "flag_count": 1, "flags": "outlier_spending" }
    ])
}

pub fn ml_scores() -> Value {
    json!({
        "modelAuc": 0.883,
        "totalProviders": 594_235,
        "featuresUsed": ["total_paid", "cpc", "mystery_feature"],
        "scoreDistribution": { "p50": 0.12, "p90": 0.4, "p99": 0.8 },
        "topProviders": [
            { "npi": ACME, "mlScore": 0.75, "name": "Acme Home Care", "state": "NY" },
            { "npi": VALLEY, "mlScore": 0.9, "city": "Fresno", "state": "CA", "totalPaid": 900_000 }
        ],
        "smallProviderFlags": [
            {
                "npi": TINY, "score": 0.55, "name": "Tiny Therapy", "city": "Oakland",
                "state": "CA", "totalPaid": 40_000
            },
            { "npi": "8888888888", "mlScore": 0.4 }
        ]
    })
}

pub fn states_summary() -> Value {
    json!([
        { "state": "NY", "total_payments": 60_000_000, "total_claims": 1_000, "total_benes": 100, "provider_count": 20 },
        { "state": "FL", "total_payments": 20_000_000, "total_claims": 500, "total_benes": 50, "provider_count": 10 },
        { "state": "Unknown", "total_payments": 99_999_999_999_u64 }
    ])
}

pub fn geographic_risk() -> Value {
    json!([
        { "state": "FL", "flaggedCount": 3, "flagsPerCapita": 0.2, "statFlags": 2, "mlFlags": 1 },
        { "state": "NY", "flaggedCount": 12, "flagsPerCapita": 0.9, "statFlags": 10, "mlFlags": 2 },
        { "state": "Unknown", "flaggedCount": 99, "flagsPerCapita": 5.0 }
    ])
}

pub fn yearly_trends() -> Value {
    json!([
        { "year": 2019, "payments": 100_000_000_000_u64, "claims": 2_000, "providers": 10 },
        { "year": 2018, "payments": 80_000_000_000_u64, "claims": 1_600, "providers": 9 }
    ])
}

pub fn exclusions() -> Value {
    json!([
        {
            "lastName": "DOE", "firstName": "JANE", "midName": "", "npi": "9999999999",
            "city": "NEW YORK", "state": "NY", "specialty": "NURSING",
            "exclType": "1128a1", "exclTypeDesc": "Program-related conviction", "exclDate": "20190115"
        },
        {
            "busName": "BEST MEDICAL SUPPLY LLC", "npi": "1212121212", "city": "BUFFALO",
            "state": "NY", "exclType": "1128b4", "exclTypeDesc": "License revocation",
            "exclDate": "20200301"
        },
        {
            "lastName": "ROE", "firstName": "RICHARD", "state": "FL",
            "exclType": "1128a1", "exclTypeDesc": "Program-related conviction", "exclDate": "2021"
        }
    ])
}

pub fn acme_detail() -> Value {
    json!({
        "npi": ACME, "name": "Acme Home Care", "specialty": "Home Health",
        "city": "Brooklyn", "state": "NY",
        "totalPaid": 5_000_000, "totalClaims": 10_000, "totalBenes": 500, "growthRate": 42.5,
        "monthly": [
            { "month": "2023-01", "paid": 400_000, "claims": 800 },
            { "month": "2023-02", "payments": 420_000, "claims": 840 }
        ],
        "procedures": [
            {
                "code": "T1019", "paid": 3_000_000, "claims": 6_000, "providerCpc": 500,
                "nationalMedianCpc": 20, "cpcRatio": 25, "decile": "Top 1%"
            },
            { "code": "ZZZ99", "paid": 10, "claims": 1 }
        ],
        "flags": []
    })
}

pub fn new_york_detail() -> Value {
    json!({
        "summary": {
            "state": "NY", "total_payments": 61_000_000, "total_claims": 1_000,
            "total_benes": 100, "provider_count": 20
        },
        "top_providers": [
            { "npi": ACME, "name": "Acme Home Care", "total_paid": 5_000_000, "total_claims": 10_000 }
        ],
        "top_procedures": [
            { "code": "T1019", "total_payments": 3_000_000, "total_claims": 6_000 }
        ],
        "yearly_trends": [
            { "year": 2023, "total_payments": 61_000_000, "total_claims": 1_000 }
        ]
    })
}
