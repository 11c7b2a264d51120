//! Reduce a flat rate list into the nested quick-lookup summary.
//!
//! Shape: `variable`/`fixed` → `oo`/`inv` → (LVR tier or fixed term) →
//! `pi`/`io`/`default` → rate percent. The site reads headline rates straight
//! out of this tree without walking the raw list.

use crate::domain::{RateEntry, RateSummary};

/// Build the summary lookup from extracted entries.
///
/// Entries with no rate (or a zero rate) are skipped entirely; fixed entries
/// additionally need a positive term to land in the fixed tree, though they
/// stay in the raw list either way. Duplicate keys overwrite (last write wins).
pub fn summarize_rates(rates: &[RateEntry]) -> RateSummary {
    let mut summary = RateSummary::default();

    for entry in rates {
        if !entry.rate.is_some_and(|r| r != 0.0) {
            continue;
        }
        let Some(percent) = entry.rate_percent else {
            continue;
        };

        let purpose = entry.purpose_key();
        let lvr = lvr_key(entry.lvr_max);
        let repayment = entry.repayment_key().to_string();

        if entry.is_variable() {
            summary
                .variable
                .bucket_mut(purpose)
                .entry(lvr.clone())
                .or_default()
                .insert(repayment.clone(), percent);
        }

        if entry.is_fixed() {
            let Some(years) = entry.fixed_years.filter(|y| *y > 0) else {
                continue;
            };
            summary
                .fixed
                .bucket_mut(purpose)
                .entry(format!("{years}yr"))
                .or_default()
                .entry(lvr)
                .or_default()
                .insert(repayment, percent);
        }
    }

    summary
}

/// `lvr<max>` when an LVR ceiling exists, else `default`. A zero ceiling is
/// treated as absent.
fn lvr_key(lvr_max: Option<f64>) -> String {
    match lvr_max {
        Some(max) if max != 0.0 => format!("lvr{}", trim_number(max)),
        _ => "default".to_string(),
    }
}

/// Format `80.0` as `80` but keep `70.5` as-is, matching the snapshot keys the
/// site already consumes.
fn trim_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rate_type: &str, rate: f64) -> RateEntry {
        RateEntry {
            lending_rate_type: Some(rate_type.to_string()),
            rate: Some(rate),
            rate_percent: Some((rate * 100.0 * 10_000.0).round() / 10_000.0),
            comparison_rate: None,
            comparison_rate_percent: None,
            repayment_type: None,
            loan_purpose: None,
            fixed_years: None,
            lvr_min: None,
            lvr_max: None,
            additional_info: None,
            additional_info_uri: None,
        }
    }

    #[test]
    fn variable_pi_and_io_land_under_default_tier() {
        let mut pi = entry("VARIABLE", 0.0599);
        pi.loan_purpose = Some("OWNER_OCCUPIED".to_string());
        pi.repayment_type = Some("PRINCIPAL_AND_INTEREST".to_string());
        let mut io = entry("VARIABLE", 0.0649);
        io.loan_purpose = Some("OWNER_OCCUPIED".to_string());
        io.repayment_type = Some("INTEREST_ONLY".to_string());

        let summary = summarize_rates(&[pi, io]);
        let tier = summary.variable.oo.get("default").unwrap();
        assert_eq!(tier.get("pi"), Some(&5.99));
        assert_eq!(tier.get("io"), Some(&6.49));
        assert!(summary.variable.inv.is_empty());
        assert!(summary.fixed.oo.is_empty());
    }

    #[test]
    fn lvr_ceiling_keys_the_variable_tier() {
        let mut e = entry("VARIABLE", 0.0585);
        e.lvr_max = Some(80.0);
        let summary = summarize_rates(&[e]);
        let tier = summary.variable.oo.get("lvr80").unwrap();
        assert_eq!(tier.get("default"), Some(&5.85));
    }

    #[test]
    fn fractional_lvr_ceiling_keeps_its_decimals() {
        let mut e = entry("VARIABLE", 0.05);
        e.lvr_max = Some(70.5);
        let summary = summarize_rates(&[e]);
        assert!(summary.variable.oo.contains_key("lvr70.5"));
    }

    #[test]
    fn zero_and_missing_rates_are_skipped() {
        let zero = entry("VARIABLE", 0.0);
        let mut missing = entry("VARIABLE", 0.05);
        missing.rate = None;
        missing.rate_percent = None;
        let summary = summarize_rates(&[zero, missing]);
        assert!(summary.variable.oo.is_empty());
    }

    #[test]
    fn investment_entries_go_to_the_inv_bucket() {
        let mut e = entry("VARIABLE", 0.0619);
        e.loan_purpose = Some("INVESTMENT".to_string());
        e.repayment_type = Some("PRINCIPAL_AND_INTEREST".to_string());
        let summary = summarize_rates(&[e]);
        assert!(summary.variable.oo.is_empty());
        let tier = summary.variable.inv.get("default").unwrap();
        assert_eq!(tier.get("pi"), Some(&6.19));
    }

    #[test]
    fn fixed_requires_a_positive_term() {
        let mut with_term = entry("FIXED", 0.0549);
        with_term.fixed_years = Some(3);
        let without_term = entry("FIXED", 0.0559);
        let mut zero_term = entry("FIXED", 0.0569);
        zero_term.fixed_years = Some(0);

        let summary = summarize_rates(&[with_term, without_term, zero_term]);
        assert_eq!(summary.fixed.oo.len(), 1);
        let term = summary.fixed.oo.get("3yr").unwrap();
        let tier = term.get("default").unwrap();
        assert_eq!(tier.get("default"), Some(&5.49));
    }

    #[test]
    fn fixed_nests_term_then_lvr_then_repayment() {
        let mut e = entry("FIXED", 0.0529);
        e.fixed_years = Some(2);
        e.lvr_max = Some(70.0);
        e.repayment_type = Some("PRINCIPAL_AND_INTEREST".to_string());
        let summary = summarize_rates(&[e]);
        let pct = summary.fixed.oo["2yr"]["lvr70"]["pi"];
        assert_eq!(pct, 5.29);
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let mut first = entry("VARIABLE", 0.0599);
        first.repayment_type = Some("PRINCIPAL_AND_INTEREST".to_string());
        let mut second = entry("VARIABLE", 0.0589);
        second.repayment_type = Some("PRINCIPAL_AND_INTEREST".to_string());
        let summary = summarize_rates(&[first, second]);
        assert_eq!(summary.variable.oo["default"]["pi"], 5.89);
    }

    #[test]
    fn other_rate_types_are_ignored() {
        let summary = summarize_rates(&[entry("DISCOUNT", 0.0499)]);
        assert!(summary.variable.oo.is_empty());
        assert!(summary.fixed.oo.is_empty());
    }
}
