//! Shared domain types.

pub mod types;

pub use types::{FixedSummary, PurposeBuckets, RateEntry, RateSummary, RepaymentSplit, VariableSummary};
