//! Flatten a CDR product payload into normalized `RateEntry` values.
//!
//! Normalization rules:
//!
//! - LVR bounds come from the first tier whose name contains "LVR"
//!   (case-insensitive); banks label these tiers inconsistently.
//! - Fixed terms are parsed from the `P<N>Y` form of `additionalValue`;
//!   month-granular terms (`P10M`) and anything else yield no term.
//! - Rates are decimal fractions; the percent form is rounded to 4 dp.
//! - An entry with no parseable rate is kept (with `rate: null`) so the raw
//!   list remains a faithful record of what the bank published.
//!
//! Output order matches payload order.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::cdr::{ProductData, RawLendingRate, RawTier};
use crate::domain::RateEntry;

static FIXED_TERM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"P(\d+)Y").unwrap());

/// Flatten `lendingRates` into `RateEntry` values, preserving order.
pub fn extract_lending_rates(product: &ProductData) -> Vec<RateEntry> {
    product.lending_rates.iter().map(extract_entry).collect()
}

fn extract_entry(raw: &RawLendingRate) -> RateEntry {
    let lvr_tier = find_lvr_tier(&raw.tiers);
    let rate = parse_rate(raw.rate.as_deref());
    let comparison_rate = parse_rate(raw.comparison_rate.as_deref());

    RateEntry {
        lending_rate_type: raw.lending_rate_type.clone(),
        rate,
        rate_percent: rate.map(to_percent),
        comparison_rate,
        comparison_rate_percent: comparison_rate.map(to_percent),
        repayment_type: raw.repayment_type.clone(),
        loan_purpose: raw.loan_purpose.clone(),
        fixed_years: raw.additional_value.as_deref().and_then(parse_fixed_years),
        lvr_min: lvr_tier.and_then(|t| t.minimum_value),
        lvr_max: lvr_tier.and_then(|t| t.maximum_value),
        additional_info: raw.additional_info.clone(),
        additional_info_uri: raw.additional_info_uri.clone(),
    }
}

/// First tier whose name contains "LVR", case-insensitively.
fn find_lvr_tier(tiers: &[RawTier]) -> Option<&RawTier> {
    tiers.iter().find(|t| {
        t.name
            .as_deref()
            .is_some_and(|name| name.to_uppercase().contains("LVR"))
    })
}

/// Parse a fixed-term length in years from an ISO-8601-like duration.
///
/// `"P3Y"` → `Some(3)`; `"P10M"`, `""` and arbitrary text → `None`.
pub fn parse_fixed_years(value: &str) -> Option<u32> {
    FIXED_TERM
        .captures(value)
        .and_then(|caps| caps[1].parse().ok())
}

fn parse_rate(raw: Option<&str>) -> Option<f64> {
    let parsed = raw?.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Decimal fraction → percent, rounded to 4 decimal places.
pub fn to_percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_rate() -> RawLendingRate {
        RawLendingRate {
            lending_rate_type: Some("VARIABLE".to_string()),
            rate: Some("0.0539".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn parses_fixed_term_years() {
        assert_eq!(parse_fixed_years("P3Y"), Some(3));
        assert_eq!(parse_fixed_years("P1Y"), Some(1));
        assert_eq!(parse_fixed_years("P10Y"), Some(10));
        assert_eq!(parse_fixed_years("P10M"), None);
        assert_eq!(parse_fixed_years(""), None);
        assert_eq!(parse_fixed_years("three years"), None);
    }

    #[test]
    fn converts_fraction_to_percent_with_4dp() {
        assert_eq!(to_percent(0.0539), 5.39);
        assert_eq!(to_percent(0.061234567), 6.1235);
        assert_eq!(to_percent(0.0), 0.0);
    }

    #[test]
    fn entry_without_rate_is_kept_with_null_rate() {
        let mut raw = raw_rate();
        raw.rate = None;
        let product = ProductData {
            lending_rates: vec![raw, raw_rate()],
            ..Default::default()
        };
        let entries = extract_lending_rates(&product);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rate, None);
        assert_eq!(entries[0].rate_percent, None);
        assert_eq!(entries[1].rate, Some(0.0539));
        assert_eq!(entries[1].rate_percent, Some(5.39));
    }

    #[test]
    fn unparseable_rate_string_is_treated_as_absent() {
        let mut raw = raw_rate();
        raw.rate = Some("n/a".to_string());
        let entries = extract_lending_rates(&ProductData {
            lending_rates: vec![raw],
            ..Default::default()
        });
        assert_eq!(entries[0].rate, None);
    }

    #[test]
    fn lvr_tier_matches_case_insensitively() {
        let mut raw = raw_rate();
        raw.tiers = vec![
            RawTier {
                name: Some("Loan amount".to_string()),
                minimum_value: Some(150_000.0),
                maximum_value: Some(500_000.0),
            },
            RawTier {
                name: Some("Max lvr 80%".to_string()),
                minimum_value: Some(70.0),
                maximum_value: Some(80.0),
            },
        ];
        let entries = extract_lending_rates(&ProductData {
            lending_rates: vec![raw],
            ..Default::default()
        });
        assert_eq!(entries[0].lvr_min, Some(70.0));
        assert_eq!(entries[0].lvr_max, Some(80.0));
    }

    #[test]
    fn no_lvr_tier_leaves_bounds_empty() {
        let mut raw = raw_rate();
        raw.tiers = vec![RawTier {
            name: Some("Interest rate type".to_string()),
            minimum_value: Some(1.0),
            maximum_value: Some(2.0),
        }];
        let entries = extract_lending_rates(&ProductData {
            lending_rates: vec![raw],
            ..Default::default()
        });
        assert_eq!(entries[0].lvr_min, None);
        assert_eq!(entries[0].lvr_max, None);
    }

    #[test]
    fn preserves_payload_order() {
        let mut first = raw_rate();
        first.rate = Some("0.01".to_string());
        let mut second = raw_rate();
        second.rate = Some("0.02".to_string());
        let mut third = raw_rate();
        third.rate = Some("0.03".to_string());
        let entries = extract_lending_rates(&ProductData {
            lending_rates: vec![first, second, third],
            ..Default::default()
        });
        let percents: Vec<_> = entries.iter().map(|e| e.rate_percent.unwrap()).collect();
        assert_eq!(percents, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn fixed_term_flows_from_additional_value() {
        let mut raw = raw_rate();
        raw.lending_rate_type = Some("FIXED".to_string());
        raw.additional_value = Some("P2Y".to_string());
        let entries = extract_lending_rates(&ProductData {
            lending_rates: vec![raw],
            ..Default::default()
        });
        assert_eq!(entries[0].fixed_years, Some(2));
    }
}
