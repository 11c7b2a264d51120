//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built in-memory during a crawl
//! - written to the JSON snapshot
//! - reloaded later for display or comparisons
//!
//! Field names serialize in camelCase to match the snapshot schema consumed by
//! the marketing site.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One normalized lending rate from a CDR product payload.
///
/// `lending_rate_type`, `repayment_type` and `loan_purpose` stay as the raw
/// CDR enumeration strings (`VARIABLE`, `PRINCIPAL_AND_INTEREST`, ...) rather
/// than closed Rust enums: banks ship values outside the documented set and an
/// unknown value must survive into the snapshot untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub lending_rate_type: Option<String>,
    /// Decimal fraction as published (e.g. `0.0539`).
    pub rate: Option<f64>,
    /// `rate * 100`, rounded to 4 decimal places (e.g. `5.39`).
    pub rate_percent: Option<f64>,
    pub comparison_rate: Option<f64>,
    pub comparison_rate_percent: Option<f64>,
    pub repayment_type: Option<String>,
    pub loan_purpose: Option<String>,
    /// Fixed-term length parsed from a `P<N>Y` duration, if any.
    pub fixed_years: Option<u32>,
    pub lvr_min: Option<f64>,
    pub lvr_max: Option<f64>,
    pub additional_info: Option<String>,
    pub additional_info_uri: Option<String>,
}

impl RateEntry {
    pub fn is_variable(&self) -> bool {
        self.lending_rate_type.as_deref() == Some("VARIABLE")
    }

    pub fn is_fixed(&self) -> bool {
        self.lending_rate_type.as_deref() == Some("FIXED")
    }

    /// `inv` for INVESTMENT, `oo` otherwise (owner-occupied is the default).
    pub fn purpose_key(&self) -> &'static str {
        if self.loan_purpose.as_deref() == Some("INVESTMENT") {
            "inv"
        } else {
            "oo"
        }
    }

    pub fn repayment_key(&self) -> &'static str {
        match self.repayment_type.as_deref() {
            Some("PRINCIPAL_AND_INTEREST") => "pi",
            Some("INTEREST_ONLY") => "io",
            _ => "default",
        }
    }
}

/// Repayment-style split at the leaf of the summary tree: `pi` / `io` /
/// `default` → rate percent.
pub type RepaymentSplit = IndexMap<String, f64>;

/// Variable-rate lookup: LVR tier key (`lvr80`, `default`, ...) → repayment split.
pub type VariableSummary = IndexMap<String, RepaymentSplit>;

/// Fixed-rate lookup: term key (`3yr`, ...) → LVR tier key → repayment split.
pub type FixedSummary = IndexMap<String, IndexMap<String, RepaymentSplit>>;

/// Owner-occupied / investment split used at each level of the summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurposeBuckets<T> {
    pub oo: T,
    pub inv: T,
}

impl<T> PurposeBuckets<T> {
    pub fn bucket_mut(&mut self, purpose_key: &str) -> &mut T {
        if purpose_key == "inv" { &mut self.inv } else { &mut self.oo }
    }
}

/// Quick-lookup summary of a product's rate list, keyed
/// (variable/fixed) × (oo/inv) × (LVR tier / fixed term) × (pi/io/default).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    pub variable: PurposeBuckets<VariableSummary>,
    pub fixed: PurposeBuckets<FixedSummary>,
}
